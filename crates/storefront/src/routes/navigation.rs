//! Scroll restoration handler.
//!
//! The browser reports each route change: the path it is leaving and its
//! scroll offset, the path it is entering, and whether this is a history
//! traversal. The response says where to scroll.

use art_haus_core::NavigationKind;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::models::ShopSession;

/// The route being left.
#[derive(Debug, Deserialize)]
pub struct Departure {
    pub path: String,
    /// `window.scrollY`; may be fractional.
    pub offset: f64,
}

/// A route change.
#[derive(Debug, Deserialize)]
pub struct NavigationRequest {
    pub from: Option<Departure>,
    pub to: String,
    #[serde(default)]
    pub kind: NavigationKind,
}

/// Where to scroll on the new route.
#[derive(Debug, Serialize)]
pub struct ScrollTarget {
    pub path: String,
    pub offset: f64,
}

/// Record the departure and resolve the scroll target for the destination.
#[instrument(skip(shop))]
pub async fn navigate(
    shop: ShopSession,
    Json(request): Json<NavigationRequest>,
) -> Result<Json<ScrollTarget>> {
    let mut memory = shop.scroll_memory().await;

    if let Some(departure) = &request.from {
        memory
            .leave(&departure.path, departure.offset)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;
        shop.save_scroll_memory(&memory).await?;
    }

    let offset = memory.enter(&request.to, request.kind);
    Ok(Json(ScrollTarget {
        path: request.to,
        offset,
    }))
}
