//! Session store migrations.
//!
//! # Usage
//!
//! ```bash
//! vw-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `STOREFRONT_DATABASE_URL` - `SQLite` connection string for the session store

use verse_wear_storefront::config::StorefrontConfig;
use verse_wear_storefront::db;

/// Create the storefront's session table.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the database is
/// unreachable.
pub async fn storefront() -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    tracing::info!("Connecting to storefront database...");
    let pool = db::create_pool(&config.database_url, 1).await?;

    tracing::info!("Running storefront migrations...");
    db::migrate(&pool).await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}
