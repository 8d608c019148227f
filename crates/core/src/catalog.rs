//! The product catalog.
//!
//! The catalog is built once at startup and never mutated. It only holds a
//! handful of products, so lookups are linear scans.

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::types::{Price, ProductId, Size};

/// A purchasable product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Scripture reference printed on the garment.
    pub verse: String,
    pub price: Price,
    /// Image filename, relative to the static images directory.
    pub image: String,
    /// External purchase link.
    pub purchase_link: String,
    /// Sizes the product is offered in. Empty means one size fits all.
    pub sizes: Vec<Size>,
}

impl Product {
    /// Whether a size must be chosen before the product can go in the cart.
    #[must_use]
    pub fn requires_size(&self) -> bool {
        !self.sizes.is_empty()
    }

    #[must_use]
    pub fn offers(&self, size: Size) -> bool {
        self.sizes.contains(&size)
    }
}

/// Read-only list of products.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, checking that ids are positive and unique.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] for a non-positive or repeated id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        for (index, product) in products.iter().enumerate() {
            if !product.id.is_positive() {
                return Err(CatalogError::InvalidId(product.id));
            }
            if products.iter().take(index).any(|p| p.id == product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// Look up a product by id.
    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    /// The hoodie line.
    fn default() -> Self {
        let hoodie = |id: i32, name: &str, verse: &str, image: &str| Product {
            id: ProductId::new(id),
            name: name.to_string(),
            verse: verse.to_string(),
            price: Price::from_cents(6500),
            image: image.to_string(),
            purchase_link: "#".to_string(),
            sizes: Size::ALL.to_vec(),
        };

        Self {
            products: vec![
                hoodie(1, "The 'Peace' Hoodie", "Philippians 4:7", "00.jpg"),
                hoodie(2, "The 'Strength' Hoodie", "Isaiah 40:31", "02.jpg"),
                hoodie(3, "The 'Light' Hoodie", "Matthew 5:14", "03.jpg"),
                hoodie(4, "The 'Love' Hoodie", "1 Corinthians 13:4", "04.jpg"),
            ],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: i32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            verse: "John 3:16".to_string(),
            price: Price::from_cents(1000),
            image: "x.jpg".to_string(),
            purchase_link: "#".to_string(),
            sizes: Vec::new(),
        }
    }

    #[test]
    fn test_default_catalog() {
        let catalog = Catalog::default();
        assert_eq!(catalog.len(), 4);
        assert!(Catalog::new(catalog.products().to_vec()).is_ok());

        let light = catalog.find(ProductId::new(3)).unwrap();
        assert_eq!(light.verse, "Matthew 5:14");
        assert_eq!(light.price.to_string(), "$65.00");
        assert!(light.requires_size());
    }

    #[test]
    fn test_find_missing() {
        let catalog = Catalog::default();
        assert!(catalog.find(ProductId::new(99)).is_none());
        assert!(catalog.find(ProductId::new(0)).is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = Catalog::new(vec![product(1), product(2), product(1)]);
        assert_eq!(result, Err(CatalogError::DuplicateId(ProductId::new(1))));
    }

    #[test]
    fn test_rejects_non_positive_ids() {
        let result = Catalog::new(vec![product(0)]);
        assert_eq!(result, Err(CatalogError::InvalidId(ProductId::new(0))));
    }

    #[test]
    fn test_one_size_product() {
        let p = product(5);
        assert!(!p.requires_size());
        assert!(!p.offers(Size::M));
    }
}
