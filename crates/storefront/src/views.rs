//! Display data for templates.
//!
//! Templates never see core types directly; everything is pre-formatted
//! here so rendering is a straight substitution.

use verse_wear_core::{Cart, CartLine, Product, Size};

/// Where product images are served from.
const IMAGE_BASE: &str = "/static/images";

fn image_url(filename: &str) -> String {
    format!("{IMAGE_BASE}/{filename}")
}

/// Product display data for the grid and the detail page.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i32,
    pub name: String,
    pub verse: String,
    pub price: String,
    pub image_url: String,
    pub detail_url: String,
    pub purchase_link: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.as_i32(),
            name: product.name.clone(),
            verse: product.verse.clone(),
            price: product.price.to_string(),
            image_url: image_url(&product.image),
            detail_url: format!("/product?id={}", product.id),
            purchase_link: product.purchase_link.clone(),
        }
    }
}

/// One size button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeOption {
    pub label: &'static str,
    pub selected: bool,
}

/// Size buttons for `sizes`, with `selected` highlighted.
#[must_use]
pub fn size_options(sizes: &[Size], selected: Option<Size>) -> Vec<SizeOption> {
    sizes
        .iter()
        .map(|size| SizeOption {
            label: size.label(),
            selected: selected == Some(*size),
        })
        .collect()
}

/// Cart line display data.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub key: String,
    pub name: String,
    pub image_url: String,
    pub size: String,
    pub quantity: u32,
    pub line_price: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            key: line.key.to_string(),
            name: line.name.clone(),
            image_url: image_url(&line.image),
            size: line.size.to_string(),
            quantity: line.quantity,
            line_price: line.line_total().to_string(),
        }
    }
}

/// Cart display data for the sidebar and badge.
#[derive(Debug, Clone)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: String,
    pub item_count: u32,
    pub is_empty: bool,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().iter().map(CartLineView::from).collect(),
            total: cart.total_price().to_string(),
            item_count: cart.total_count(),
            is_empty: cart.is_empty(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use verse_wear_core::{Catalog, ProductId};

    use super::*;

    #[test]
    fn test_product_view() {
        let catalog = Catalog::default();
        let view = ProductView::from(catalog.find(ProductId::new(2)).unwrap());

        assert_eq!(view.price, "$65.00");
        assert_eq!(view.image_url, "/static/images/02.jpg");
        assert_eq!(view.detail_url, "/product?id=2");
    }

    #[test]
    fn test_cart_view_totals() {
        let catalog = Catalog::default();
        let mut cart = Cart::new();
        cart.add_from_catalog(&catalog, ProductId::new(1), Some(Size::M))
            .unwrap();
        cart.add_from_catalog(&catalog, ProductId::new(1), Some(Size::M))
            .unwrap();

        let view = CartView::from(&cart);
        assert_eq!(view.items.len(), 1);
        assert_eq!(view.items[0].line_price, "$130.00");
        assert_eq!(view.total, "$130.00");
        assert_eq!(view.item_count, 2);
        assert!(!view.is_empty);
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from(&Cart::new());
        assert!(view.is_empty);
        assert_eq!(view.total, "$0.00");
    }

    #[test]
    fn test_size_options_mark_selection() {
        let options = size_options(&Size::ALL, Some(Size::L));
        let selected: Vec<_> = options.iter().filter(|o| o.selected).collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].label, "L");

        assert!(size_options(&Size::ALL, None).iter().all(|o| !o.selected));
    }
}
