//! Checkout hand-off.
//!
//! Payment is not handled here. Checkout only validates that there is
//! something to buy and summarizes it for the confirmation message.

use crate::cart::Cart;
use crate::error::CartError;
use crate::types::Price;

/// What the shopper is about to check out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutSummary {
    /// Distinct cart lines.
    pub line_count: usize,
    /// Total units.
    pub item_count: u32,
    pub total: Price,
}

impl CheckoutSummary {
    /// Confirmation shown to the shopper.
    #[must_use]
    pub fn message(&self) -> String {
        format!("Proceeding to checkout with {} items.", self.line_count)
    }
}

/// Start checkout for `cart`.
///
/// # Errors
///
/// [`CartError::EmptyCart`] if the cart has no lines.
pub fn begin(cart: &Cart) -> Result<CheckoutSummary, CartError> {
    if cart.is_empty() {
        return Err(CartError::EmptyCart);
    }
    Ok(CheckoutSummary {
        line_count: cart.line_count(),
        item_count: cart.total_count(),
        total: cart.total_price(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::types::{ProductId, Size};

    #[test]
    fn test_empty_cart_rejected() {
        let err = begin(&Cart::new()).unwrap_err();
        assert_eq!(err, CartError::EmptyCart);
        assert_eq!(err.to_string(), "Add items to your cart first!");
    }

    #[test]
    fn test_message_counts_lines() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add_from_catalog(&catalog, ProductId::new(1), Some(Size::M))
            .unwrap();
        cart.add_from_catalog(&catalog, ProductId::new(1), Some(Size::M))
            .unwrap();
        cart.add_from_catalog(&catalog, ProductId::new(4), Some(Size::XL))
            .unwrap();

        let summary = begin(&cart).unwrap();
        assert_eq!(summary.line_count, 2);
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.total.to_string(), "$195.00");
        assert_eq!(summary.message(), "Proceeding to checkout with 2 items.");
    }
}
