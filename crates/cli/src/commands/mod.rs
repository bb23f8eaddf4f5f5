//! CLI command implementations.

pub mod admin;
pub mod migrate;
pub mod seed;

use sqlx::PgPool;
use thiserror::Error;

/// Errors shared by CLI commands.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Connect to the database named by `DATABASE_URL`.
///
/// # Errors
///
/// Returns `CommandError::MissingEnvVar` if `DATABASE_URL` is unset,
/// `CommandError::Database` if the connection fails.
pub async fn connect() -> Result<PgPool, CommandError> {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").map_err(|_| CommandError::MissingEnvVar("DATABASE_URL"))?;

    Ok(PgPool::connect(&database_url).await?)
}
