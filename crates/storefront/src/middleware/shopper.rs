//! Shopper session extractor.
//!
//! Wraps the tower-sessions [`Session`] with typed accessors for the cart and
//! the transient page state. The cart is read fresh on every request and
//! written back after every mutation.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;
use verse_wear_core::{Cart, ProductId, Size};

use crate::error::{AppError, Result};
use crate::models::{SelectedSize, UiState, session_keys};

/// Extractor giving handlers access to the shopper's session state.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(shopper: ShopperSession) -> Result<String> {
///     let cart = shopper.load_cart().await?;
///     Ok(format!("{} items", cart.total_count()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ShopperSession(Session);

/// Returned when the session layer is missing from the router.
pub struct MissingSession;

impl IntoResponse for MissingSession {
    fn into_response(self) -> Response {
        tracing::error!("ShopperSession used without a session layer");
        StatusCode::INTERNAL_SERVER_ERROR.into_response()
    }
}

impl<S> FromRequestParts<S> for ShopperSession
where
    S: Send + Sync,
{
    type Rejection = MissingSession;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> std::result::Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(Self)
            .ok_or(MissingSession)
    }
}

impl ShopperSession {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// Load the cart.
    ///
    /// An absent or unreadable cart is treated as empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store itself fails.
    pub async fn load_cart(&self) -> Result<Cart> {
        let Some(raw) = self.0.get::<String>(session_keys::CART).await? else {
            return Ok(Cart::new());
        };

        Ok(Cart::from_json(&raw).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Discarding malformed stored cart");
            Cart::new()
        }))
    }

    /// Persist the cart, replacing what was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the session store fails.
    pub async fn save_cart(&self, cart: &Cart) -> Result<()> {
        let raw = cart
            .to_json()
            .map_err(|e| AppError::Internal(format!("serialize cart: {e}")))?;
        self.0.insert(session_keys::CART, raw).await?;
        Ok(())
    }

    /// The size picked for `product_id`, if the last pick was on that product.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn selected_size(&self, product_id: ProductId) -> Result<Option<Size>> {
        let selected = self
            .0
            .get::<SelectedSize>(session_keys::SELECTED_SIZE)
            .await?;
        Ok(selected
            .filter(|s| s.product_id == product_id)
            .map(|s| s.size))
    }

    /// Remember `size` as the pick for `product_id`, replacing any earlier pick.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn select_size(&self, product_id: ProductId, size: Size) -> Result<()> {
        self.0
            .insert(session_keys::SELECTED_SIZE, SelectedSize { product_id, size })
            .await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn clear_selected_size(&self) -> Result<()> {
        self.0
            .remove::<SelectedSize>(session_keys::SELECTED_SIZE)
            .await?;
        Ok(())
    }

    /// Open/closed state of the sidebar and menu.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn ui_state(&self) -> Result<UiState> {
        Ok(UiState {
            cart_open: self.flag(session_keys::CART_OPEN).await?,
            menu_open: self.flag(session_keys::MENU_OPEN).await?,
        })
    }

    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn set_cart_open(&self, open: bool) -> Result<()> {
        self.0.insert(session_keys::CART_OPEN, open).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns an error if the session store fails.
    pub async fn set_menu_open(&self, open: bool) -> Result<()> {
        self.0.insert(session_keys::MENU_OPEN, open).await?;
        Ok(())
    }

    async fn flag(&self, key: &str) -> Result<bool> {
        Ok(self.0.get::<bool>(key).await?.unwrap_or(false))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;
    use verse_wear_core::{Catalog, ProductId};

    use super::*;

    fn shopper() -> ShopperSession {
        let store = Arc::new(MemoryStore::default());
        ShopperSession::new(Session::new(None, store, None))
    }

    #[tokio::test]
    async fn test_absent_cart_is_empty() {
        let shopper = shopper();
        assert!(shopper.load_cart().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cart_round_trips_through_session() {
        let shopper = shopper();
        let mut cart = Cart::new();
        cart.add_from_catalog(&Catalog::default(), ProductId::new(2), Some(Size::L))
            .unwrap();

        shopper.save_cart(&cart).await.unwrap();
        assert_eq!(shopper.load_cart().await.unwrap(), cart);
    }

    #[tokio::test]
    async fn test_malformed_cart_is_empty() {
        let shopper = shopper();
        shopper
            .0
            .insert(session_keys::CART, "{not json".to_string())
            .await
            .unwrap();
        assert!(shopper.load_cart().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_selected_size_lifecycle() {
        let shopper = shopper();
        let peace = ProductId::new(1);
        assert_eq!(shopper.selected_size(peace).await.unwrap(), None);

        shopper.select_size(peace, Size::XL).await.unwrap();
        assert_eq!(shopper.selected_size(peace).await.unwrap(), Some(Size::XL));

        shopper.clear_selected_size().await.unwrap();
        assert_eq!(shopper.selected_size(peace).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_selected_size_belongs_to_one_product() {
        let shopper = shopper();
        shopper.select_size(ProductId::new(1), Size::S).await.unwrap();

        assert_eq!(shopper.selected_size(ProductId::new(2)).await.unwrap(), None);

        shopper.select_size(ProductId::new(2), Size::L).await.unwrap();
        assert_eq!(shopper.selected_size(ProductId::new(1)).await.unwrap(), None);
        assert_eq!(
            shopper.selected_size(ProductId::new(2)).await.unwrap(),
            Some(Size::L)
        );
    }

    #[tokio::test]
    async fn test_ui_flags_default_closed() {
        let shopper = shopper();
        assert_eq!(shopper.ui_state().await.unwrap(), UiState::default());

        shopper.set_cart_open(true).await.unwrap();
        let ui = shopper.ui_state().await.unwrap();
        assert!(ui.cart_open);
        assert!(!ui.menu_open);
    }
}
