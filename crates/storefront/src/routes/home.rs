//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::ShopperSession;
use crate::models::UiState;
use crate::state::AppState;
use crate::views::{CartView, ProductView};

/// Home page template: the product grid.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub products: Vec<ProductView>,
    pub cart: CartView,
    pub ui: UiState,
}

/// Display the home page.
#[instrument(skip(state, shopper))]
pub async fn home(State(state): State<AppState>, shopper: ShopperSession) -> Result<HomeTemplate> {
    let cart = shopper.load_cart().await?;
    let ui = shopper.ui_state().await?;

    Ok(HomeTemplate {
        products: state.catalog().products().iter().map(ProductView::from).collect(),
        cart: CartView::from(&cart),
        ui,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use verse_wear_core::{Cart, Catalog};

    use super::*;

    #[test]
    fn test_grid_lists_every_product() {
        let catalog = Catalog::default();
        let html = HomeTemplate {
            products: catalog.products().iter().map(ProductView::from).collect(),
            cart: CartView::from(&Cart::new()),
            ui: UiState::default(),
        }
        .render()
        .unwrap();

        for product in catalog.products() {
            assert!(html.contains(&format!("/product?id={}", product.id)));
            assert!(html.contains(&product.verse));
        }
        assert_eq!(html.matches("class=\"product-card\"").count(), 4);
        assert!(html.contains("$65.00"));
    }
}
