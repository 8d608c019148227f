//! Session database for the storefront.
//!
//! The storefront keeps no catalog or order data of its own. The only table
//! is the tower-sessions store, which holds each shopper's serialized cart
//! and transient UI state.
//!
//! # Migrations
//!
//! Migrations are not run on server startup. Run them via:
//! ```bash
//! cargo run -p verse-wear-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use tower_sessions_sqlx_store::SqliteStore;

/// Create a `SQLite` connection pool.
///
/// In-memory databases exist per connection, so pass `max_connections = 1`
/// with `sqlite::memory:`.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &SecretString,
    max_connections: u32,
) -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Session store backed by `pool`.
#[must_use]
pub fn session_store(pool: &SqlitePool) -> SqliteStore {
    SqliteStore::new(pool.clone())
}

/// Create the session table if it does not exist.
///
/// # Errors
///
/// Returns `sqlx::Error` if the migration fails.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    session_store(pool).migrate().await?;
    tracing::info!("Session store migrated");
    Ok(())
}

/// Connectivity check for readiness.
///
/// # Errors
///
/// Returns `sqlx::Error` if the database is unreachable.
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await?;
    Ok(())
}
