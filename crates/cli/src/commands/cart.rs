//! Local cart commands.
//!
//! Each command reloads the cart from the store, applies one change and
//! writes it back, mirroring what the storefront does per request.
//!
//! # Usage
//!
//! ```bash
//! vw-cli cart add 1 --size L
//! vw-cli cart update 1-L -- -1
//! vw-cli cart show
//! vw-cli cart checkout
//! ```

use thiserror::Error;
use verse_wear_core::{
    CART_STORAGE_KEY, Cart, CartError, Catalog, CheckoutSummary, ProductId, QuantityChange, Size,
    checkout,
};

use crate::store::{FileStore, StoreError};

#[derive(Debug, Error)]
pub enum CartCommandError {
    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to serialize cart: {0}")]
    Serialize(#[from] serde_json::Error),
}

type Result<T> = std::result::Result<T, CartCommandError>;

/// Load the stored cart. Absent or unreadable cart data is an empty cart.
pub fn load(store: &FileStore) -> Result<Cart> {
    let Some(raw) = store.get(CART_STORAGE_KEY)? else {
        return Ok(Cart::new());
    };
    match Cart::from_json(&raw) {
        Ok(cart) => Ok(cart),
        Err(e) => {
            tracing::warn!(error = %e, path = %store.path().display(), "Discarding malformed cart");
            Ok(Cart::new())
        }
    }
}

fn save(store: &FileStore, cart: &Cart) -> Result<()> {
    store.set(CART_STORAGE_KEY, cart.to_json()?)?;
    Ok(())
}

pub fn add(
    store: &FileStore,
    catalog: &Catalog,
    product_id: ProductId,
    size: Option<Size>,
) -> Result<Cart> {
    let mut cart = load(store)?;
    let line = cart.add_from_catalog(catalog, product_id, size)?;
    tracing::info!(cart_id = %line.key, quantity = line.quantity, "Added to cart");
    save(store, &cart)?;
    Ok(cart)
}

pub fn update(store: &FileStore, cart_id: &str, change: i32) -> Result<(Cart, QuantityChange)> {
    let mut cart = load(store)?;
    let outcome = cart.update_quantity(cart_id, change);
    if outcome != QuantityChange::Missing {
        save(store, &cart)?;
    }
    Ok((cart, outcome))
}

pub fn remove(store: &FileStore, cart_id: &str) -> Result<(Cart, bool)> {
    let mut cart = load(store)?;
    let removed = cart.remove_item(cart_id);
    if removed {
        save(store, &cart)?;
    }
    Ok((cart, removed))
}

pub fn clear(store: &FileStore) -> Result<()> {
    save(store, &Cart::new())
}

/// Stubbed checkout. The cart is left as is.
pub fn begin_checkout(store: &FileStore) -> Result<CheckoutSummary> {
    let cart = load(store)?;
    Ok(checkout::begin(&cart)?)
}

/// Human-readable cart listing with a total line.
#[must_use]
pub fn render(cart: &Cart) -> String {
    if cart.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    for line in cart.lines() {
        out.push_str(&format!(
            "{:<8} {} ({}) x{}  {}\n",
            line.key.as_str(),
            line.name,
            line.size,
            line.quantity,
            line.line_total()
        ));
    }
    out.push_str(&format!(
        "{} item(s), total {}",
        cart.total_count(),
        cart.total_price()
    ));
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FileStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        (dir, store)
    }

    #[test]
    fn test_add_twice_merges_into_one_line() {
        let (_dir, store) = temp_store();
        let catalog = Catalog::default();

        add(&store, &catalog, ProductId::new(1), Some(Size::L)).unwrap();
        let cart = add(&store, &catalog, ProductId::new(1), Some(Size::L)).unwrap();

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_count(), 2);
        assert_eq!(load(&store).unwrap(), cart);
    }

    #[test]
    fn test_add_without_size_leaves_store_untouched() {
        let (_dir, store) = temp_store();
        let catalog = Catalog::default();

        let err = add(&store, &catalog, ProductId::new(1), None).unwrap_err();
        assert!(matches!(err, CartCommandError::Cart(CartError::SizeRequired)));
        assert_eq!(store.get(CART_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let (_dir, store) = temp_store();
        let catalog = Catalog::default();
        add(&store, &catalog, ProductId::new(2), Some(Size::S)).unwrap();

        let (cart, outcome) = update(&store, "2-S", -1).unwrap();
        assert_eq!(outcome, QuantityChange::Removed);
        assert!(cart.is_empty());
        assert!(load(&store).unwrap().is_empty());
    }

    #[test]
    fn test_remove_unknown_key_reports_false() {
        let (_dir, store) = temp_store();
        let (cart, removed) = remove(&store, "9-M").unwrap();
        assert!(!removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_malformed_cart_loads_empty() {
        let (_dir, store) = temp_store();
        store
            .set(CART_STORAGE_KEY, "{not json".to_string())
            .unwrap();
        assert!(load(&store).unwrap().is_empty());
    }

    #[test]
    fn test_checkout_empty_cart_fails() {
        let (_dir, store) = temp_store();
        let err = begin_checkout(&store).unwrap_err();
        assert_eq!(err.to_string(), "Add items to your cart first!");
    }

    #[test]
    fn test_checkout_keeps_cart() {
        let (_dir, store) = temp_store();
        let catalog = Catalog::default();
        add(&store, &catalog, ProductId::new(1), Some(Size::M)).unwrap();
        add(&store, &catalog, ProductId::new(3), Some(Size::XL)).unwrap();

        let summary = begin_checkout(&store).unwrap();
        assert_eq!(summary.message(), "Proceeding to checkout with 2 items.");
        assert_eq!(load(&store).unwrap().line_count(), 2);
    }

    #[test]
    fn test_render_shows_total() {
        let (_dir, store) = temp_store();
        let catalog = Catalog::default();
        add(&store, &catalog, ProductId::new(4), Some(Size::M)).unwrap();
        let cart = add(&store, &catalog, ProductId::new(4), Some(Size::M)).unwrap();

        let output = render(&cart);
        assert!(output.contains("4-M"));
        assert!(output.contains("The 'Love' Hoodie (M) x2"));
        assert!(output.ends_with("2 item(s), total $130.00"));
        assert_eq!(render(&Cart::new()), "Your cart is empty.");
    }
}
