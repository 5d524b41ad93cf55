//! Toast route handlers.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::ShopSession;
use crate::services::{Toast, ToastId};
use crate::state::AppState;

/// List the session's live toasts, oldest first.
#[instrument(skip(state, shop))]
pub async fn index(State(state): State<AppState>, shop: ShopSession) -> Json<Vec<Toast>> {
    let Some(channel) = shop.existing_toast_channel().await else {
        return Json(Vec::new());
    };

    let toasts = match state.toasts().existing(channel).await {
        Some(queue) => queue.snapshot(),
        None => Vec::new(),
    };
    Json(toasts)
}

/// Dismiss a toast before it expires.
#[instrument(skip(state, shop))]
pub async fn dismiss(
    State(state): State<AppState>,
    shop: ShopSession,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    let not_found = || AppError::NotFound(format!("toast {id}"));

    let channel = shop.existing_toast_channel().await.ok_or_else(not_found)?;
    let queue = state.toasts().existing(channel).await.ok_or_else(not_found)?;

    if queue.dismiss(ToastId::new(id)) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
