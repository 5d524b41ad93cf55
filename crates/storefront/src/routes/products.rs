//! Product route handlers.

use art_haus_core::{CheckoutForm, OrderLine, Product};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::routes::checkout::OrderPlacedView;
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub image: String,
    pub description: String,
    pub collection: String,
    pub url: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            description: product.description.clone(),
            collection: product.collection.clone(),
            url: format!("/products/{}", product.id),
        }
    }
}

/// Catalog listing.
#[derive(Debug, Serialize)]
pub struct CatalogView {
    pub products: Vec<ProductView>,
}

/// Product detail with "You may also like" suggestions.
#[derive(Debug, Serialize)]
pub struct ProductDetailView {
    pub product: ProductView,
    pub related_products: Vec<ProductView>,
}

/// Catalog listing filters.
#[derive(Debug, Default, Deserialize)]
pub struct CatalogQuery {
    /// Only products in this collection (e.g. `Metallic Series`).
    pub collection: Option<String>,
}

/// Buy-now order: a quantity of one product plus contact fields.
#[derive(Debug, Deserialize)]
pub struct BuyNowRequest {
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(flatten)]
    pub contact: CheckoutForm,
}

const fn default_quantity() -> u32 {
    1
}

/// Display the catalog, optionally narrowed to one collection.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> Json<CatalogView> {
    let catalog = state.catalog();
    let products = match query.collection.as_deref() {
        Some(collection) => catalog
            .in_collection(collection)
            .map(ProductView::from)
            .collect(),
        None => catalog.all().iter().map(ProductView::from).collect(),
    };
    Json(CatalogView { products })
}

/// Display a product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetailView>> {
    let catalog = state.catalog();
    let product = catalog
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(Json(ProductDetailView {
        product: ProductView::from(product),
        related_products: catalog.related(&id).map(ProductView::from).collect(),
    }))
}

/// Order a single product directly, bypassing the cart.
///
/// The cart is left untouched.
#[instrument(skip(state, request))]
pub async fn buy_now(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<BuyNowRequest>,
) -> Result<Json<OrderPlacedView>> {
    let product = state
        .catalog()
        .get(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    if request.quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }

    let contact = request.contact.validate()?;
    let line = OrderLine::single(product.name.clone(), request.quantity, product.price);
    let total = line.subtotal;
    let order = state.composer().prepare(&[line], total, &contact);

    tracing::info!(product_id = %product.id, total = %total, "Buy-now order composed");
    add_breadcrumb("order", "Buy-now order composed", Some(&[("product_id", id.as_str())]));

    Ok(Json(OrderPlacedView::from(order)))
}
