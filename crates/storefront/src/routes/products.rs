//! Product route handlers.
//!
//! The detail page is addressed by query string (`/product?id=3`). A missing,
//! malformed or unknown id still renders the page, just with every product
//! field left blank.
//!
//! Opening a detail page drops any earlier size pick, so each visit starts
//! with no size selected.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
};
use serde::Deserialize;
use tracing::instrument;
use verse_wear_core::{CartError, ProductId, Size};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::ShopperSession;
use crate::models::UiState;
use crate::state::AppState;
use crate::views::{CartView, ProductView, SizeOption, size_options};

/// Detail page query parameters.
#[derive(Debug, Deserialize)]
pub struct DetailQuery {
    pub id: Option<String>,
}

impl DetailQuery {
    /// The requested id, if it is a usable one.
    fn product_id(&self) -> Option<ProductId> {
        self.id
            .as_deref()
            .and_then(|raw| raw.parse::<ProductId>().ok())
            .filter(ProductId::is_positive)
    }
}

/// Size selection form data.
#[derive(Debug, Deserialize)]
pub struct SelectSizeForm {
    pub size: String,
    pub product_id: i32,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: Option<ProductView>,
    pub sizes: Vec<SizeOption>,
    pub size_product_id: i32,
    pub cart: CartView,
    pub ui: UiState,
}

/// Size buttons fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/size_buttons.html")]
pub struct SizeButtonsTemplate {
    pub sizes: Vec<SizeOption>,
    pub size_product_id: i32,
}

/// Display product detail page.
#[instrument(skip(state, shopper))]
pub async fn show(
    State(state): State<AppState>,
    shopper: ShopperSession,
    Query(query): Query<DetailQuery>,
) -> Result<ProductShowTemplate> {
    let product = query.product_id().and_then(|id| state.catalog().find(id));
    if product.is_none() && query.id.is_some() {
        tracing::debug!(id = ?query.id, "Detail requested for unknown product");
    }

    shopper.clear_selected_size().await?;
    let cart = shopper.load_cart().await?;
    let ui = shopper.ui_state().await?;

    Ok(ProductShowTemplate {
        sizes: product.map_or_else(Vec::new, |p| size_options(&p.sizes, None)),
        size_product_id: product.map_or(0, |p| p.id.as_i32()),
        product: product.map(ProductView::from),
        cart: CartView::from(&cart),
        ui,
    })
}

/// Record the shopper's size choice for one product and re-render its size
/// buttons.
///
/// # Errors
///
/// 404 for an unknown product, 422 for a size the product is not offered in.
#[instrument(skip(state, shopper))]
pub async fn select_size(
    State(state): State<AppState>,
    shopper: ShopperSession,
    Form(form): Form<SelectSizeForm>,
) -> Result<SizeButtonsTemplate> {
    let size: Size = form
        .size
        .parse()
        .map_err(|e: verse_wear_core::ParseSizeError| AppError::BadRequest(e.to_string()))?;

    let product_id = ProductId::new(form.product_id);
    let product = state
        .catalog()
        .find(product_id)
        .ok_or(CartError::UnknownProduct(product_id))?;
    if !product.offers(size) {
        return Err(CartError::SizeUnavailable(size).into());
    }

    shopper.select_size(product_id, size).await?;

    Ok(SizeButtonsTemplate {
        sizes: size_options(&product.sizes, Some(size)),
        size_product_id: product_id.as_i32(),
    })
}
