//! Core value types for Verse Wear.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod size;

pub use id::*;
pub use price::{CurrencyCode, Price, PriceError};
pub use size::{ParseSizeError, Size};
