//! Catalog listing.

use verse_wear_core::{Catalog, Product};

/// One line per product: id, name, verse, price and sizes.
#[must_use]
pub fn render(catalog: &Catalog) -> String {
    catalog
        .products()
        .iter()
        .map(render_product)
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_product(product: &Product) -> String {
    let sizes = if product.sizes.is_empty() {
        "one size".to_string()
    } else {
        product
            .sizes
            .iter()
            .map(|size| size.label())
            .collect::<Vec<_>>()
            .join("/")
    };
    format!(
        "{:>3}  {:<10} {:<20} {:>8}  {}",
        product.id, product.name, product.verse, product.price, sizes
    )
}
