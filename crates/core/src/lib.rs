//! Verse Wear Core - Catalog and cart domain library.
//!
//! This crate provides the types shared by the Verse Wear components:
//! - `storefront` - Public-facing web shop
//! - `cli` - Command-line tools for migrations and local carts
//!
//! # Architecture
//!
//! The core crate contains only types and pure operations - no I/O, no
//! database access, no HTTP. Callers load a [`Cart`] from wherever it is
//! stored, mutate it, and write it back.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices and sizes
//! - [`catalog`] - The static product list
//! - [`cart`] - Cart lines and cart operations
//! - [`checkout`] - Checkout validation stub

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod types;

pub use cart::{CART_STORAGE_KEY, Cart, CartLine, CartLineKey, QuantityChange};
pub use catalog::{Catalog, Product};
pub use checkout::CheckoutSummary;
pub use error::{CartError, CatalogError};
pub use types::*;
