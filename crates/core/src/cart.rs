//! Shopping cart state.
//!
//! A [`Cart`] is an ordered list of [`CartLine`]s with at most one line per
//! (product, size) pair. Every line has a quantity of at least one; a line
//! whose quantity would drop to zero is removed instead.
//!
//! The cart is persisted as JSON under [`CART_STORAGE_KEY`]. The serialized
//! field names (`id`, `stripeLink`, `cartId`, ...) are kept stable so carts
//! saved by earlier versions of the storefront still load.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, Product};
use crate::error::CartError;
use crate::types::{CurrencyCode, Price, ProductId, Size};

/// Storage key the serialized cart lives under.
pub const CART_STORAGE_KEY: &str = "brandCart";

/// Composite key of a cart line: `"{product_id}-{size}"`.
///
/// Keys coming back from the browser are plain strings, so lookups compare
/// the string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLineKey(String);

impl CartLineKey {
    #[must_use]
    pub fn new(product_id: ProductId, size: Size) -> Self {
        Self(format!("{product_id}-{size}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CartLineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for CartLineKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&str> for CartLineKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl AsRef<str> for CartLineKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One (product, size) entry in the cart.
///
/// Product fields are copied in so the cart renders without the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub name: String,
    pub verse: String,
    /// Unit price in the catalog currency.
    pub price: Decimal,
    pub image: String,
    #[serde(rename = "stripeLink", default)]
    pub purchase_link: String,
    #[serde(rename = "cartId")]
    pub key: CartLineKey,
    pub size: Size,
    pub quantity: u32,
}

impl CartLine {
    fn from_product(product: &Product, size: Size) -> Self {
        Self {
            product_id: product.id,
            name: product.name.clone(),
            verse: product.verse.clone(),
            price: product.price.amount(),
            image: product.image.clone(),
            purchase_link: product.purchase_link.clone(),
            key: CartLineKey::new(product.id, size),
            size,
            quantity: 1,
        }
    }

    #[must_use]
    pub fn unit_price(&self) -> Price {
        Price::new(self.price, CurrencyCode::USD).unwrap_or(Price::zero(CurrencyCode::USD))
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.unit_price().times(self.quantity)
    }

    fn is_valid(&self) -> bool {
        self.quantity >= 1 && !self.price.is_sign_negative()
    }
}

/// Result of [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// The line now has this quantity.
    Updated(u32),
    /// The quantity reached zero and the line was removed.
    Removed,
    /// No line has the given key.
    Missing,
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Lines in the order they were first added.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines (not units).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn find(&self, key: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.key.as_str() == key)
    }

    /// Add one unit of `product` in `size`.
    ///
    /// A product that offers sizes needs one picked; a one-size product goes
    /// in as the default size. Adding an existing (product, size) pair bumps
    /// that line's quantity instead of creating a second line.
    ///
    /// # Errors
    ///
    /// [`CartError::SizeRequired`] when a size is needed and missing,
    /// [`CartError::SizeUnavailable`] when the product isn't offered in it.
    /// The cart is unchanged on error.
    pub fn add_item(&mut self, product: &Product, size: Option<Size>) -> Result<&CartLine, CartError> {
        let size = match size {
            Some(size) if product.requires_size() && !product.offers(size) => {
                return Err(CartError::SizeUnavailable(size));
            }
            Some(size) => size,
            None if product.requires_size() => return Err(CartError::SizeRequired),
            None => Size::default(),
        };

        let key = CartLineKey::new(product.id, size);
        let index = match self.lines.iter().position(|line| line.key == key) {
            Some(index) => {
                if let Some(line) = self.lines.get_mut(index) {
                    line.quantity = line.quantity.saturating_add(1);
                }
                index
            }
            None => {
                self.lines.push(CartLine::from_product(product, size));
                self.lines.len() - 1
            }
        };

        self.lines.get(index).ok_or(CartError::UnknownProduct(product.id))
    }

    /// Look the product up in `catalog`, then [`add_item`](Self::add_item).
    ///
    /// # Errors
    ///
    /// [`CartError::UnknownProduct`] if the id is not in the catalog, plus
    /// anything [`add_item`](Self::add_item) returns.
    pub fn add_from_catalog(
        &mut self,
        catalog: &Catalog,
        product_id: ProductId,
        size: Option<Size>,
    ) -> Result<&CartLine, CartError> {
        let product = catalog
            .find(product_id)
            .ok_or(CartError::UnknownProduct(product_id))?;
        self.add_item(product, size)
    }

    /// Adjust a line's quantity by `delta`, removing it at zero or below.
    pub fn update_quantity(&mut self, key: &str, delta: i32) -> QuantityChange {
        let Some(index) = self.lines.iter().position(|line| line.key.as_str() == key) else {
            return QuantityChange::Missing;
        };
        let Some(line) = self.lines.get_mut(index) else {
            return QuantityChange::Missing;
        };

        let next = i64::from(line.quantity) + i64::from(delta);
        if next <= 0 {
            self.lines.remove(index);
            return QuantityChange::Removed;
        }

        line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
        QuantityChange::Updated(line.quantity)
    }

    /// Remove every line whose key equals `key`. Returns whether anything
    /// was removed.
    pub fn remove_item(&mut self, key: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.key.as_str() != key);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Total units across all lines, for the badge.
    #[must_use]
    pub fn total_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0u32, |sum, line| sum.saturating_add(line.quantity))
    }

    /// Sum of price × quantity across all lines.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Serialize for storage.
    ///
    /// # Errors
    ///
    /// Propagates `serde_json` failures.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Load a stored cart.
    ///
    /// Lines with a zero quantity or negative price are dropped and
    /// duplicate keys are merged, so the loaded cart always satisfies the
    /// one-line-per-pair invariant.
    ///
    /// # Errors
    ///
    /// Returns the parse error for malformed input. Callers treat that as an
    /// empty cart.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        let stored: Vec<CartLine> = serde_json::from_str(raw)?;

        let mut cart = Self::new();
        for line in stored.into_iter().filter(CartLine::is_valid) {
            match cart.lines.iter_mut().find(|l| l.key == line.key) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => cart.lines.push(line),
            }
        }
        Ok(cart)
    }
}
