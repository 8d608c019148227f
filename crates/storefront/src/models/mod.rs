//! Domain models for storefront.
//!
//! Catalog and cart types come from `verse_wear_core`; this module only
//! holds what is specific to serving them over HTTP.

pub mod session;

pub use session::{SelectedSize, UiState, keys as session_keys};
