//! Staff account management commands.
//!
//! ```bash
//! jg-cli admin create -e admin@example.com -p changeit --role super_admin
//! ```

use std::str::FromStr;

use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};

use juniper_goods_core::CustomerRole;

use super::{CommandError, connect};

/// Create a staff account with the given role.
///
/// # Errors
///
/// Returns `CommandError::InvalidInput` for an unknown or non-staff role or
/// a hashing failure, `CommandError::Database` on database errors (including
/// an already-registered email).
pub async fn create_user(
    email: &str,
    password: &str,
    first_name: &str,
    last_name: &str,
    role: &str,
) -> Result<(), CommandError> {
    let role = CustomerRole::from_str(role).map_err(CommandError::InvalidInput)?;
    if !role.is_staff() {
        return Err(CommandError::InvalidInput(format!(
            "role {role} is not a staff role"
        )));
    }

    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CommandError::InvalidInput(format!("password hashing failed: {e}")))?
        .to_string();

    let pool = connect().await?;
    let mut tx = pool.begin().await?;

    let (customer_id,): (i32,) = sqlx::query_as(
        "INSERT INTO customer (email, first_name, last_name, role)
         VALUES ($1, $2, $3, $4)
         RETURNING id",
    )
    .bind(email)
    .bind(first_name)
    .bind(last_name)
    .bind(role.to_string())
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        "INSERT INTO customer_password (customer_id, password_hash)
         VALUES ($1, $2)",
    )
    .bind(customer_id)
    .bind(&password_hash)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!(customer_id, email, role = %role, "Staff account created");
    Ok(())
}
