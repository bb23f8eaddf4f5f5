//! Admin authentication.
//!
//! Admin login uses the same customer table as the storefront; only
//! customers whose role passes `is_staff` may establish an admin session.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};
use sqlx::PgPool;
use thiserror::Error;

use juniper_goods_core::Email;

use crate::db::RepositoryError;
use crate::db::customers::CustomerRepository;
use crate::models::Customer;

/// Errors that can occur during admin authentication.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Invalid email format.
    #[error("invalid email: {0}")]
    InvalidEmail(#[from] juniper_goods_core::EmailError),

    /// Invalid credentials (wrong password or customer not found).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The account exists but is not staff.
    #[error("account is not an admin")]
    NotStaff,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,
}

/// Log in an admin with email and password.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` if the email/password is wrong,
/// `AuthError::NotStaff` if the account has no admin role.
pub async fn login(pool: &PgPool, email: &str, password: &str) -> Result<Customer, AuthError> {
    let email = Email::parse(email)?;

    let (customer, password_hash) = CustomerRepository::new(pool)
        .get_password_hash(&email)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    let parsed = PasswordHash::new(&password_hash).map_err(|_| AuthError::PasswordHash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidCredentials)?;

    if !customer.role.is_staff() {
        return Err(AuthError::NotStaff);
    }

    Ok(customer)
}
