//! Serializes state-changing requests within one session.
//!
//! Sits outside the session layer so the lock covers the session's final
//! save. Safe methods and requests without a session cookie pass straight
//! through: the former never write, the latter have no session to share.

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use tower_sessions::cookie::Cookie;

use crate::middleware::session::SESSION_COOKIE_NAME;
use crate::services::SessionLocks;

/// Hold the session's lock for the whole of a non-safe request.
pub async fn session_lock_middleware(
    State(locks): State<SessionLocks>,
    request: Request,
    next: Next,
) -> Response {
    if request.method().is_safe() {
        return next.run(request).await;
    }
    let Some(key) = session_key(&request) else {
        return next.run(request).await;
    };

    let _guard = locks.acquire(&key).await;
    next.run(request).await
}

fn session_key(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_owned())
}
