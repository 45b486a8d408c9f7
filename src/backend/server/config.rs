/**
 * Server Configuration
 *
 * This module opens the SQLite connection pool and applies the schema
 * migrations found in `migrations/`.
 *
 * # Connection Modes
 *
 * - File databases (`sqlite://notes.db?mode=rwc`) get a regular pool.
 * - In-memory databases (`sqlite::memory:`) are private to a single
 *   connection, so the pool is pinned to exactly one connection that is
 *   never reaped. Tests rely on this to run the full stack without files.
 *
 * Foreign keys are always enabled so user deletion cascades.
 */

use std::str::FromStr;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

const MAX_CONNECTIONS: u32 = 10;

/// Whether a database URL names an in-memory SQLite database
pub fn is_in_memory(database_url: &str) -> bool {
    database_url.contains(":memory:") || database_url.contains("mode=memory")
}

/// Create the connection pool for a database URL
///
/// # Arguments
/// * `database_url` - SQLite connection URL
///
/// # Returns
/// A connected pool, without migrations applied
pub async fn connect_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = if is_in_memory(database_url) {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?
    } else {
        SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .connect_with(options)
            .await?
    };

    Ok(pool)
}

/// Load and initialize the database
///
/// This function:
/// 1. Creates the SQLite connection pool
/// 2. Runs database migrations
///
/// # Errors
///
/// Unlike optional integrations, the store is required: connection and
/// migration failures are returned to the caller and abort startup.
///
/// # Example
///
/// ```rust,no_run
/// use notes_backend::backend::server::config::load_database;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = load_database("sqlite::memory:").await?;
/// # Ok(())
/// # }
/// ```
pub async fn load_database(database_url: &str) -> Result<SqlitePool, DatabaseInitError> {
    tracing::info!("Connecting to database...");

    let pool = connect_pool(database_url).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        DatabaseInitError::Connect(e)
    })?;

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    sqlx::migrate!().run(&pool).await.map_err(|e| {
        tracing::error!("Failed to run database migrations: {}", e);
        DatabaseInitError::Migrate(e)
    })?;
    tracing::info!("Database migrations completed successfully");

    Ok(pool)
}

/// Database setup failures
#[derive(Debug, thiserror::Error)]
pub enum DatabaseInitError {
    #[error("failed to connect to database: {0}")]
    Connect(#[source] sqlx::Error),
    #[error("failed to run migrations: {0}")]
    Migrate(#[source] sqlx::migrate::MigrateError),
}
