//! Domain errors.
//!
//! The `Display` text of [`CartError`] is what the shopper sees, so keep it
//! short and written for people rather than logs.

use crate::types::{ProductId, Size};

/// Errors from cart and checkout operations.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The product offers sizes but none was selected.
    #[error("Please select a size (S, M, L, or XL) before adding to cart.")]
    SizeRequired,

    /// The selected size is not one the product is offered in.
    #[error("Size {0} is not available for this product.")]
    SizeUnavailable(Size),

    /// No product with this id exists in the catalog.
    #[error("Product {0} does not exist.")]
    UnknownProduct(ProductId),

    /// Checkout was requested with nothing in the cart.
    #[error("Add items to your cart first!")]
    EmptyCart,
}

/// Errors from building a catalog.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product id must be positive (got {0})")]
    InvalidId(ProductId),

    #[error("duplicate product id {0}")]
    DuplicateId(ProductId),
}
