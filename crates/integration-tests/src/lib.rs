//! Integration tests for Verse Wear.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p verse-wear-integration-tests
//! ```
//!
//! Each [`TestContext`] boots the storefront router on an ephemeral port
//! with its own in-memory `SQLite` session store, so tests run in parallel
//! without shared state.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use reqwest::Client;
use sqlx::SqlitePool;
use verse_wear_core::Catalog;
use verse_wear_storefront::config::StorefrontConfig;
use verse_wear_storefront::state::AppState;
use verse_wear_storefront::{app, db};

/// Static assets shipped with the storefront crate.
const STATIC_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../storefront/static");

/// A running storefront plus a client that keeps its session cookie.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub pool: SqlitePool,
}

impl TestContext {
    /// Start a storefront with the default catalog.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn new() -> Self {
        let config = StorefrontConfig::from_lookup(|key| match key {
            "STOREFRONT_DATABASE_URL" => Some("sqlite::memory:".to_string()),
            "STOREFRONT_DATABASE_MAX_CONNECTIONS" => Some("1".to_string()),
            "STOREFRONT_STATIC_DIR" => Some(STATIC_DIR.to_string()),
            _ => None,
        })
        .expect("Invalid test configuration");

        let pool = db::create_pool(&config.database_url, config.database_max_connections)
            .await
            .expect("Failed to open in-memory database");
        db::migrate(&pool).await.expect("Failed to migrate session store");

        let session_store = db::session_store(&pool);
        let state = AppState::new(config, pool.clone(), Catalog::default());
        let router = app(state, session_store);

        let listener = tokio::net::TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Test server failed");
        });

        Self {
            client: new_client(),
            base_url: format!("http://{addr}"),
            pool,
        }
    }

    /// Absolute URL for `path` on the test server.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// A second shopper with its own cookie jar.
    #[must_use]
    pub fn other_client(&self) -> Client {
        new_client()
    }

    /// GET `path` and return status and body.
    ///
    /// # Panics
    ///
    /// Panics on transport errors.
    pub async fn get(&self, path: &str) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("GET failed");
        let status = resp.status();
        (status, resp.text().await.expect("Unreadable body"))
    }

    /// POST a form to `path` and return the raw response.
    ///
    /// # Panics
    ///
    /// Panics on transport errors.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("POST failed")
    }

    /// Number of persisted sessions.
    ///
    /// # Panics
    ///
    /// Panics if the session table is missing.
    pub async fn session_count(&self) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM tower_sessions")
            .fetch_one(&self.pool)
            .await
            .expect("Failed to count sessions")
    }
}

fn new_client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}
