//! Cart route handlers.
//!
//! Every mutation loads the cart from the session, changes it, writes it
//! back, and returns the freshly rendered sidebar. Mutating responses carry
//! an `X-Cart-Event: cart-updated` header so the client refreshes the badge.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::instrument;
use verse_wear_core::{ProductId, QuantityChange, Size};

use crate::error::{AppError, Result, add_breadcrumb};
use crate::middleware::ShopperSession;
use crate::models::UiState;
use crate::state::AppState;
use crate::views::CartView;

/// Header the client listens on for cart changes.
pub const CART_EVENT_HEADER: &str = "X-Cart-Event";
pub const CART_UPDATED: &str = "cart-updated";

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: i32,
    /// Explicit size. Falls back to the size picked on the product page.
    pub size: Option<String>,
}

/// Update quantity form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub cart_id: String,
    pub change: i32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub cart_id: String,
}

/// Cart sidebar fragment: line list, quantity controls and total.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_sidebar.html")]
pub struct CartSidebarTemplate {
    pub cart: CartView,
    pub ui: UiState,
}

/// Cart count badge fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Render the sidebar from the current session state.
async fn sidebar(shopper: &ShopperSession) -> Result<CartSidebarTemplate> {
    Ok(CartSidebarTemplate {
        cart: CartView::from(&shopper.load_cart().await?),
        ui: shopper.ui_state().await?,
    })
}

fn updated(template: CartSidebarTemplate) -> Response {
    (AppendHeaders([(CART_EVENT_HEADER, CART_UPDATED)]), template).into_response()
}

/// Display the cart sidebar.
#[instrument(skip(shopper))]
pub async fn show(shopper: ShopperSession) -> Result<CartSidebarTemplate> {
    sidebar(&shopper).await
}

/// Add one unit of a product to the cart.
///
/// On success the size selection is cleared and the sidebar is opened.
#[instrument(skip(state, shopper))]
pub async fn add(
    State(state): State<AppState>,
    shopper: ShopperSession,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let product_id = ProductId::new(form.product_id);
    let size = match form.size.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            raw.parse::<Size>()
                .map_err(|e| AppError::BadRequest(e.to_string()))?,
        ),
        None => shopper.selected_size(product_id).await?,
    };

    let mut cart = shopper.load_cart().await?;
    let line = cart.add_from_catalog(state.catalog(), product_id, size)?;
    tracing::info!(cart_id = %line.key, quantity = line.quantity, "Added to cart");
    add_breadcrumb("cart", "Added to cart", &[("cart_id", line.key.to_string())]);

    shopper.save_cart(&cart).await?;
    shopper.clear_selected_size().await?;
    shopper.set_cart_open(true).await?;

    Ok(updated(sidebar(&shopper).await?))
}

/// Change a line's quantity by `change`; zero or below removes it.
#[instrument(skip(shopper))]
pub async fn update(shopper: ShopperSession, Form(form): Form<UpdateCartForm>) -> Result<Response> {
    let mut cart = shopper.load_cart().await?;
    match cart.update_quantity(&form.cart_id, form.change) {
        QuantityChange::Updated(quantity) => {
            tracing::info!(cart_id = %form.cart_id, quantity, "Updated cart quantity");
        }
        QuantityChange::Removed => {
            tracing::info!(cart_id = %form.cart_id, "Quantity reached zero, line removed");
        }
        QuantityChange::Missing => {
            tracing::debug!(cart_id = %form.cart_id, "Quantity update for missing line");
        }
    }
    shopper.save_cart(&cart).await?;

    Ok(updated(sidebar(&shopper).await?))
}

/// Remove a line from the cart.
#[instrument(skip(shopper))]
pub async fn remove(
    shopper: ShopperSession,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let mut cart = shopper.load_cart().await?;
    if cart.remove_item(&form.cart_id) {
        tracing::info!(cart_id = %form.cart_id, "Removed from cart");
    }
    shopper.save_cart(&cart).await?;

    Ok(updated(sidebar(&shopper).await?))
}

/// Get cart count badge.
#[instrument(skip(shopper))]
pub async fn count(shopper: ShopperSession) -> Result<CartCountTemplate> {
    Ok(CartCountTemplate {
        count: shopper.load_cart().await?.total_count(),
    })
}

/// Open or close the sidebar.
#[instrument(skip(shopper))]
pub async fn toggle(shopper: ShopperSession) -> Result<CartSidebarTemplate> {
    let ui = shopper.ui_state().await?;
    shopper.set_cart_open(!ui.cart_open).await?;
    sidebar(&shopper).await
}

/// Checkout stub: confirms what would be checked out.
#[instrument(skip(shopper))]
pub async fn checkout(shopper: ShopperSession) -> Result<String> {
    let cart = shopper.load_cart().await?;
    let summary = verse_wear_core::checkout::begin(&cart)?;
    tracing::info!(
        lines = summary.line_count,
        items = summary.item_count,
        total = %summary.total,
        "Checkout requested"
    );
    Ok(summary.message())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use verse_wear_core::{Cart, Catalog};

    use super::*;

    fn render(cart: &Cart, cart_open: bool) -> String {
        CartSidebarTemplate {
            cart: CartView::from(cart),
            ui: UiState {
                cart_open,
                menu_open: false,
            },
        }
        .render()
        .unwrap()
    }

    #[test]
    fn test_empty_sidebar() {
        let html = render(&Cart::new(), false);
        assert!(html.contains("Your cart is empty."));
        assert!(html.contains("$0.00"));
        assert!(!html.contains("cart-sidebar active"));
    }

    #[test]
    fn test_sidebar_lines_and_controls() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add_from_catalog(&catalog, ProductId::new(3), Some(Size::XL))
            .unwrap();
        cart.add_from_catalog(&catalog, ProductId::new(3), Some(Size::XL))
            .unwrap();

        let html = render(&cart, true);
        assert!(html.contains("cart-sidebar active"));
        assert!(html.contains("Size: XL"));
        assert!(html.contains("value=\"3-XL\""));
        assert!(html.contains("value=\"-1\""));
        assert!(html.contains("$130.00"));
        assert!(!html.contains("Your cart is empty."));
    }

    #[test]
    fn test_count_badge() {
        let html = CartCountTemplate { count: 7 }.render().unwrap();
        assert!(html.contains(">7<"));
    }
}
