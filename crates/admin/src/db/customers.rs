//! Customer repository for admin database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use juniper_goods_core::{CustomerId, CustomerRole, Email};

use super::RepositoryError;
use crate::models::Customer;

/// Default page size for customer listings.
pub const DEFAULT_PER_PAGE: u32 = 50;

/// Maximum page size a client may request.
pub const MAX_PER_PAGE: u32 = 200;

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

/// Repository for admin customer database operations.
pub struct CustomerRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CustomerRepository<'a> {
    /// Create a new customer repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List customers, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, page: u32, per_page: u32) -> Result<Vec<Customer>, RepositoryError> {
        let limit = i64::from(per_page.clamp(1, MAX_PER_PAGE));
        let offset = i64::from(page.max(1) - 1) * limit;

        let rows: Vec<CustomerRow> = sqlx::query_as(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customer
             ORDER BY created_at DESC, id DESC
             LIMIT $1 OFFSET $2"
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Customer::try_from).collect()
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

    /// Change a customer's role. Super-admin only at the route layer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the customer doesn't exist.
    pub async fn set_role(
        &self,
        id: CustomerId,
        role: CustomerRole,
    ) -> Result<Customer, RepositoryError> {
        let row: Option<CustomerRow> = sqlx::query_as(&format!(
            "UPDATE customer SET role = $2, updated_at = now()
             WHERE id = $1
             RETURNING {CUSTOMER_COLUMNS}"
        ))
        .bind(id.as_i32())
        .bind(role.to_string())
        .fetch_optional(self.pool)
        .await?;

        row.map(Customer::try_from)
            .transpose()?
            .ok_or(RepositoryError::NotFound)
    }

    /// Get a customer's password hash by email, for admin login.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
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
