//! Customer repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use juniper_goods_core::{CustomerId, CustomerRole, Email};

use super::RepositoryError;
use crate::models::Customer;

/// Internal row type for customer queries.
#[derive(Debug, sqlx::FromRow)]
struct CustomerRow {
    id: i32,
    email: String,
    first_name: String,
    last_name: String,
    phone: Option<String>,
    role: String,
    is_guest: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<CustomerRow> for Customer {
    type Error = RepositoryError;

    fn try_from(row: CustomerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        let role: CustomerRole = row.role.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid role in database: {e}"))
        })?;

        Ok(Self {
            id: CustomerId::new(row.id),
            email,
            first_name: row.first_name,
            last_name: row.last_name,
            phone: row.phone,
            role,
            is_guest: row.is_guest,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const CUSTOMER_COLUMNS: &str =
    "id, email, first_name, last_name, phone, role, is_guest, created_at, updated_at";

/// Repository for customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a customer by their email address.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_email(&self, email: &Email) -> Result<Option<Customer>, RepositoryError> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE email = $1"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(Customer::try_from).transpose()
    }

    /// Get a customer by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_by_id(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer WHERE id = $1"
        ))
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(Customer::try_from).transpose()
    }

    /// Create a new customer with email and password.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_with_password(
        &self,
        email: &Email,
        first_name: &str,
        last_name: &str,
        password_hash: &str,
    ) -> Result<Customer, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: CustomerRow = sqlx::query_as(&format!(
            "INSERT INTO customer (email, first_name, last_name)
             VALUES ($1, $2, $3)
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(first_name)
        .bind(last_name)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        sqlx::query(
            "INSERT INTO customer_password (customer_id, password_hash)
             VALUES ($1, $2)",
        )
        .bind(row.id)
        .bind(password_hash)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Customer::try_from(row)
    }

    /// Create a guest customer for an unauthenticated checkout.
    ///
    /// Guests have no password row; `email` is a generated unique
    /// placeholder.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the placeholder email collides.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_guest(
        &self,
        email: &Email,
        first_name: &str,
        last_name: &str,
        phone: &str,
    ) -> Result<Customer, RepositoryError> {
        let row: CustomerRow = sqlx::query_as(&format!(
            "INSERT INTO customer (email, first_name, last_name, phone, is_guest)
             VALUES ($1, $2, $3, $4, TRUE)
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(email.as_str())
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("guest email already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Customer::try_from(row)
    }

    /// Get a customer's password hash by email.
    ///
    /// Returns `None` if the customer doesn't exist or has no password set
    /// (guests and role-only accounts never do).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if stored data is invalid.
    pub async fn get_password_hash(
        &self,
        email: &Email,
    ) -> Result<Option<(Customer, String)>, RepositoryError> {
        #[derive(sqlx::FromRow)]
        struct CustomerWithHashRow {
            #[sqlx(flatten)]
            customer: CustomerRow,
            password_hash: String,
        }

        let row: Option<CustomerWithHashRow> = sqlx::query_as(
            "SELECT c.id, c.email, c.first_name, c.last_name, c.phone, c.role,
                    c.is_guest, c.created_at, c.updated_at, p.password_hash
             FROM customer c
             JOIN customer_password p ON p.customer_id = c.id
             WHERE c.email = $1",
        )
        .bind(email.as_str())
        .fetch_optional(self.pool)
        .await?;

        row.map(|r| Ok((Customer::try_from(r.customer)?, r.password_hash)))
            .transpose()
    }
}
