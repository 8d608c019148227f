//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Product grid
//! GET  /health            - Liveness check
//! GET  /health/ready      - Readiness check (session database)
//! *                       - Anything else: 404 plain text
//!
//! # Products
//! GET  /product?id=N      - Product detail
//! POST /product/size      - Select a size (returns size buttons fragment)
//!
//! # Cart (fragments)
//! GET  /cart              - Cart sidebar
//! POST /cart/add          - Add to cart (returns sidebar, triggers cart-updated)
//! POST /cart/update       - Change quantity (returns sidebar)
//! POST /cart/remove       - Remove line (returns sidebar)
//! GET  /cart/count        - Cart count badge
//! POST /cart/toggle       - Open/close sidebar
//!
//! # Checkout
//! POST /checkout          - Checkout stub (plain-text confirmation)
//!
//! # Mobile menu
//! POST /menu/toggle       - Open/close menu
//! POST /menu/cart         - Close menu, open cart
//! ```

pub mod cart;
pub mod home;
pub mod menu;
pub mod products;

use axum::{
    Router,
    extract::State,
    http::{StatusCode, Uri},
    routing::{get, post},
};

use crate::db;
use crate::error::AppError;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::show))
        .route("/size", post(products::select_size))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/toggle", post(cart::toggle))
}

/// Create the mobile menu routes router.
pub fn menu_routes() -> Router<AppState> {
    Router::new()
        .route("/toggle", post(menu::toggle))
        .route("/cart", post(menu::open_cart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/product", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(cart::checkout))
        .nest("/menu", menu_routes())
        .fallback(not_found)
}

/// Fallback for unknown paths.
async fn not_found(uri: Uri) -> AppError {
    tracing::debug!(path = %uri.path(), "No route");
    AppError::NotFound(uri.path().to_string())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the session database is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match db::ping(state.pool()).await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
