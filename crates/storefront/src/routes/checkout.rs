//! Checkout route handler.
//!
//! Checkout never talks to a payment provider. It turns the cart into an
//! order message and hands back a messaging link for the browser to open.

use art_haus_core::{CheckoutForm, OutboundOrder};
use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::ShopSession;
use crate::state::AppState;

/// Seconds the success screen waits before returning to the catalog.
pub const REDIRECT_HOME_AFTER_SECS: u64 = 5;

/// A composed order and where to send it.
#[derive(Debug, Serialize)]
pub struct OrderPlacedView {
    pub message: String,
    pub redirect_url: String,
    pub redirect_home_after_secs: u64,
}

impl From<OutboundOrder> for OrderPlacedView {
    fn from(order: OutboundOrder) -> Self {
        Self {
            message: order.message,
            redirect_url: order.redirect_url,
            redirect_home_after_secs: REDIRECT_HOME_AFTER_SECS,
        }
    }
}

/// Place an order for the whole cart.
///
/// On success the cart is emptied. On a validation failure nothing changes.
#[instrument(skip(state, shop, form))]
pub async fn place_order(
    State(state): State<AppState>,
    shop: ShopSession,
    Json(form): Json<CheckoutForm>,
) -> Result<Json<OrderPlacedView>> {
    let mut cart = shop.cart().await;
    if cart.is_empty() {
        return Err(AppError::BadRequest("cart is empty".to_string()));
    }

    let contact = form.validate()?;
    let order = state
        .composer()
        .prepare(&cart.order_lines(), cart.total(), &contact);

    tracing::info!(
        lines = cart.items().len(),
        items = cart.item_count(),
        total = %cart.total(),
        "Order composed"
    );

    cart.clear();
    shop.save_cart(&cart).await?;
    add_breadcrumb("order", "Cart order composed", None);

    Ok(Json(OrderPlacedView::from(order)))
}
