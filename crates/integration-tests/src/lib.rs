//! Integration tests for Art Haus.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p art-haus-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `order_flow` - Catalog, cart, and order composition wired together
//! - `storefront_http` - The storefront router driven request by request
//! - `toasts` - Toast expiry over HTTP with paused time
//!
//! Everything runs in-process: [`TestApp`] drives the router with
//! `tower::ServiceExt::oneshot` and carries the session cookie from one
//! request to the next, like a browser would.

use art_haus_storefront::config::StorefrontConfig;
use art_haus_storefront::routes;
use art_haus_storefront::state::AppState;
use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode, header};
use serde_json::Value;
use tokio::task::JoinSet;
use tower::ServiceExt;

/// A storefront instance plus one shopper's cookie jar.
pub struct TestApp {
    router: Router,
    cookie: Option<String>,
}

/// A response with its body parsed as JSON (`Null` when empty or not JSON).
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub text: String,
    pub body: Value,
}

impl TestApp {
    /// Storefront with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(StorefrontConfig::default())
    }

    #[must_use]
    pub fn with_config(config: StorefrontConfig) -> Self {
        Self {
            router: routes::app(AppState::new(config)),
            cookie: None,
        }
    }

    /// Another shopper on the same storefront, with an empty cookie jar.
    #[must_use]
    pub fn new_shopper(&self) -> Self {
        Self {
            router: self.router.clone(),
            cookie: None,
        }
    }

    pub async fn get(&mut self, path: &str) -> TestResponse {
        self.send(Method::GET, path, None).await
    }

    pub async fn post(&mut self, path: &str, body: Value) -> TestResponse {
        self.send(Method::POST, path, Some(body)).await
    }

    pub async fn put(&mut self, path: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, path, Some(body)).await
    }

    pub async fn delete(&mut self, path: &str) -> TestResponse {
        self.send(Method::DELETE, path, None).await
    }

    /// Add a product to the cart and assert it succeeded.
    pub async fn add_to_cart(&mut self, id: &str, quantity: u32) -> TestResponse {
        let response = self
            .post("/cart/add", serde_json::json!({ "id": id, "quantity": quantity }))
            .await;
        assert_eq!(response.status, StatusCode::OK, "add {id}: {}", response.text);
        response
    }

    /// Send the same request `count` times at once on this shopper's cookie.
    ///
    /// Returns every response status. The cookie jar is not updated.
    pub async fn post_concurrently(&self, path: &str, body: &Value, count: usize) -> Vec<StatusCode> {
        let mut in_flight = JoinSet::new();
        for _ in 0..count {
            let request = build_request(self.cookie.as_deref(), Method::POST, path, Some(body.clone()));
            let router = self.router.clone();
            in_flight.spawn(async move {
                match router.oneshot(request).await {
                    Ok(response) => response.status(),
                    Err(never) => match never {},
                }
            });
        }
        in_flight.join_all().await
    }

    async fn send(&mut self, method: Method, path: &str, body: Option<Value>) -> TestResponse {
        let request = build_request(self.cookie.as_deref(), method, path, body);

        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let value = set_cookie.to_str().expect("cookie should be ascii");
            let pair = value.split(';').next().unwrap_or(value);
            self.cookie = Some(pair.to_string());
        }

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body should be readable");
        let text = String::from_utf8_lossy(&bytes).into_owned();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            text,
            body,
        }
    }
}

fn build_request(cookie: Option<&str>, method: Method, path: &str, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request should build")
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Valid checkout contact fields.
#[must_use]
pub fn contact_form() -> Value {
    serde_json::json!({
        "fullName": "Jane Doe",
        "phone": "+1 555 0100",
        "address": "1 Main St",
    })
}
