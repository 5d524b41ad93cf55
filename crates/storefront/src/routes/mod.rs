//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                   - Health check
//!
//! # Catalog
//! GET    /                         - Catalog listing (`?collection=` filter)
//! GET    /products/{id}            - Product detail (with related products)
//! POST   /products/{id}/order      - Buy now: order one product directly
//!
//! # Cart
//! GET    /cart                     - Cart contents and total
//! POST   /cart/add                 - Add to cart (shows "Added to cart" toast)
//! POST   /cart/increase            - Increase line quantity
//! POST   /cart/decrease            - Decrease line quantity (floored at 1)
//! POST   /cart/remove              - Remove line
//! POST   /cart/clear               - Empty cart
//! GET    /cart/count               - Cart count badge
//! GET    /cart/drawer              - Drawer open/closed flag
//! PUT    /cart/drawer              - Set drawer flag
//!
//! # Checkout
//! POST   /order                    - Compose order for the whole cart
//!
//! # Session UI state
//! GET    /toasts                   - Live toasts
//! DELETE /toasts/{id}              - Dismiss toast
//! POST   /navigation               - Record scroll offset, get scroll target
//! ```
//!
//! Anything else is a 404 pointing back to the catalog.

pub mod cart;
pub mod checkout;
pub mod navigation;
pub mod products;
pub mod toasts;

use axum::{
    Router,
    extract::Request,
    http::Uri,
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tracing::Span;

use crate::error::AppError;
use crate::middleware::{create_session_layer, request_id_middleware, session_lock_middleware};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(products::show))
        .route("/{id}/order", post(products::buy_now))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/increase", post(cart::increase))
        .route("/decrease", post(cart::decrease))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
        .route("/drawer", get(cart::drawer).put(cart::set_drawer))
}

/// Create the toast routes router.
pub fn toast_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(toasts::index))
        .route("/{id}", delete(toasts::dismiss))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Catalog
        .route("/", get(products::index))
        .nest("/products", product_routes())
        // Cart
        .nest("/cart", cart_routes())
        // Checkout
        .route("/order", post(checkout::place_order))
        // Session UI state
        .nest("/toasts", toast_routes())
        .route("/navigation", post(navigation::navigate))
}

/// Build the complete application: routes, fallback, and middleware.
///
/// Sentry layers are added by the binary on top of this.
pub fn app(state: AppState) -> Router {
    let session_layer = create_session_layer(state.config());
    let session_locks = state.session_locks().clone();

    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http().make_span_with(request_span))
                .layer(from_fn(request_id_middleware))
                .layer(from_fn_with_state(session_locks, session_lock_middleware))
                .layer(session_layer),
        )
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("page {}", uri.path()))
}

fn request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = tracing::field::Empty,
    )
}
