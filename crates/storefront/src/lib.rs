//! Verse Wear Storefront library.
//!
//! This crate provides the storefront as a library so the router can be
//! built by the binary and by the integration tests alike.
//!
//! # Architecture
//!
//! - Axum web framework; forms are progressively enhanced by a small script
//! - Askama templates for server-side rendering
//! - Catalog is static and held in [`state::AppState`]
//! - Each shopper's cart lives in their session, stored in `SQLite`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod views;

use axum::{Router, middleware as axum_middleware};
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tower_sessions_sqlx_store::SqliteStore;

use crate::state::AppState;

/// Build the full application router.
///
/// Sentry layers are added by the binary, which owns the Sentry client.
pub fn app(state: AppState, session_store: SqliteStore) -> Router {
    let session_layer = middleware::create_session_layer(session_store, state.config());
    let static_dir = ServeDir::new(&state.config().static_dir);
    let session_locks = state.session_locks().clone();

    Router::new()
        .merge(routes::routes())
        .nest_service("/static", static_dir)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum_middleware::from_fn(middleware::request_id_middleware))
                .layer(axum_middleware::from_fn(
                    middleware::security_headers_middleware,
                ))
                .layer(axum_middleware::from_fn_with_state(
                    session_locks,
                    middleware::session_lock_middleware,
                ))
                .layer(session_layer),
        )
        .with_state(state)
}
