//! Mobile menu handlers.

use askama::Template;
use askama_web::WebTemplate;
use tracing::instrument;

use crate::error::Result;
use crate::middleware::ShopperSession;
use crate::models::UiState;
use crate::routes::cart::CartSidebarTemplate;
use crate::views::CartView;

/// Mobile menu fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/mobile_menu.html")]
pub struct MobileMenuTemplate {
    pub ui: UiState,
}

/// Open or close the mobile menu.
#[instrument(skip(shopper))]
pub async fn toggle(shopper: ShopperSession) -> Result<MobileMenuTemplate> {
    let mut ui = shopper.ui_state().await?;
    ui.menu_open = !ui.menu_open;
    shopper.set_menu_open(ui.menu_open).await?;
    Ok(MobileMenuTemplate { ui })
}

/// Close the menu and open the cart sidebar.
#[instrument(skip(shopper))]
pub async fn open_cart(shopper: ShopperSession) -> Result<CartSidebarTemplate> {
    shopper.set_menu_open(false).await?;
    shopper.set_cart_open(true).await?;

    Ok(CartSidebarTemplate {
        cart: CartView::from(&shopper.load_cart().await?),
        ui: shopper.ui_state().await?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_active_class() {
        let open = MobileMenuTemplate {
            ui: UiState {
                cart_open: false,
                menu_open: true,
            },
        }
        .render()
        .unwrap();
        assert!(open.contains("mobile-menu active"));

        let closed = MobileMenuTemplate {
            ui: UiState::default(),
        }
        .render()
        .unwrap();
        assert!(!closed.contains("mobile-menu active"));
    }
}
