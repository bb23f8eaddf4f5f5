//! Database migration command.
//!
//! Runs the SQL migrations from the top-level `migrations/` directory, then
//! creates the tower-sessions table (both server binaries share it).
//!
//! ```bash
//! jg-cli migrate
//! ```

use tower_sessions_sqlx_store::PostgresStore;

use super::{CommandError, connect};

/// Run all database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration
/// fails.
pub async fn run() -> Result<(), CommandError> {
    let pool = connect().await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../../migrations").run(&pool).await?;

    tracing::info!("Creating session table...");
    PostgresStore::new(pool.clone())
        .migrate()
        .await
        .map_err(CommandError::Database)?;

    tracing::info!("Migrations complete!");
    Ok(())
}
