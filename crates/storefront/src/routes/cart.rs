//! Cart route handlers.
//!
//! The cart lives in the shopper's session. Every mutation loads it, applies
//! one cart operation, writes it back, and returns the updated cart so the
//! next read always sees the committed state.

use art_haus_core::{AddMode, Cart, CartLineItem, ItemSnapshot, ProductId};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::ShopSession;
use crate::state::AppState;

/// Toast shown after a product is added.
pub const ADDED_TO_CART: &str = "Added to cart";

/// Cart item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(line: &CartLineItem) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            image: line.image.clone(),
            quantity: line.quantity,
            price: line.price.to_string(),
            line_price: line.subtotal().to_string(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            total: cart.total().to_string(),
            item_count: cart.item_count(),
        }
    }
}

/// Cart badge count.
#[derive(Debug, Serialize)]
pub struct CartCountView {
    pub count: u32,
}

/// Cart drawer open/closed flag.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawerView {
    pub open: bool,
}

/// Add to cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub id: ProductId,
    pub quantity: Option<u32>,
    #[serde(default)]
    pub replace: bool,
}

/// Request naming one cart line.
#[derive(Debug, Deserialize)]
pub struct LineRequest {
    pub id: ProductId,
}

/// Display the cart.
#[instrument(skip(shop))]
pub async fn show(shop: ShopSession) -> Json<CartView> {
    Json(CartView::from(&shop.cart().await))
}

/// Add a product to the cart and show a toast.
#[instrument(skip(state, shop))]
pub async fn add(
    State(state): State<AppState>,
    shop: ShopSession,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let product = state
        .catalog()
        .get(request.id.as_str())
        .ok_or_else(|| AppError::NotFound(format!("product {}", request.id)))?;

    let quantity = request.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "quantity must be at least 1".to_string(),
        ));
    }
    let mode = if request.replace {
        AddMode::Replace
    } else {
        AddMode::Accumulate
    };

    let view = update_cart(&shop, |cart| {
        cart.add(ItemSnapshot::from(product), quantity, mode);
    })
    .await?;

    let channel = shop.toast_channel().await?;
    state.toasts().queue(channel).await.show(ADDED_TO_CART);
    add_breadcrumb(
        "cart",
        "Added to cart",
        Some(&[("product_id", request.id.as_str())]),
    );

    Ok(view)
}

/// Increase a line's quantity by one.
#[instrument(skip(shop))]
pub async fn increase(shop: ShopSession, Json(request): Json<LineRequest>) -> Result<Json<CartView>> {
    update_cart(&shop, |cart| cart.increase(&request.id)).await
}

/// Decrease a line's quantity by one (never below one).
#[instrument(skip(shop))]
pub async fn decrease(shop: ShopSession, Json(request): Json<LineRequest>) -> Result<Json<CartView>> {
    update_cart(&shop, |cart| cart.decrease(&request.id)).await
}

/// Remove a line.
#[instrument(skip(shop))]
pub async fn remove(shop: ShopSession, Json(request): Json<LineRequest>) -> Result<Json<CartView>> {
    update_cart(&shop, |cart| cart.remove(&request.id)).await
}

/// Empty the cart.
#[instrument(skip(shop))]
pub async fn clear(shop: ShopSession) -> Result<Json<CartView>> {
    update_cart(&shop, Cart::clear).await
}

/// Get cart count badge.
#[instrument(skip(shop))]
pub async fn count(shop: ShopSession) -> Json<CartCountView> {
    Json(CartCountView {
        count: shop.cart().await.item_count(),
    })
}

/// Get the cart drawer flag.
#[instrument(skip(shop))]
pub async fn drawer(shop: ShopSession) -> Json<DrawerView> {
    Json(DrawerView {
        open: shop.drawer_open().await,
    })
}

/// Set the cart drawer flag.
#[instrument(skip(shop))]
pub async fn set_drawer(shop: ShopSession, Json(request): Json<DrawerView>) -> Result<Json<DrawerView>> {
    shop.set_drawer_open(request.open).await?;
    Ok(Json(request))
}

async fn update_cart(shop: &ShopSession, apply: impl FnOnce(&mut Cart) + Send) -> Result<Json<CartView>> {
    let mut cart = shop.cart().await;
    apply(&mut cart);
    shop.save_cart(&cart).await?;
    Ok(Json(CartView::from(&cart)))
}
