//! Session-related types.
//!
//! Everything a shopper accumulates lives in their session: the cart itself
//! and a few flags describing what the page currently shows.

use serde::{Deserialize, Serialize};
use verse_wear_core::{ProductId, Size};

/// Session keys.
pub mod keys {
    /// Serialized cart (JSON array of cart lines).
    pub const CART: &str = verse_wear_core::CART_STORAGE_KEY;

    /// Size picked on a product page but not yet added ([`super::SelectedSize`]).
    pub const SELECTED_SIZE: &str = "selected_size";

    /// Whether the cart sidebar is open.
    pub const CART_OPEN: &str = "cart_open";

    /// Whether the mobile menu is open.
    pub const MENU_OPEN: &str = "menu_open";
}

/// Open/closed state of the page chrome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    pub cart_open: bool,
    pub menu_open: bool,
}

/// A size choice, tied to the product it was made on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedSize {
    pub product_id: ProductId,
    pub size: Size,
}
