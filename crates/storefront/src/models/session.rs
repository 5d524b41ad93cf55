//! Session-scoped shopper state.
//!
//! Everything a shopper accumulates (cart, drawer preference, scroll
//! positions) is stored in their tower-sessions session. Reads never fail:
//! missing, unreadable, or corrupt values come back as defaults so a broken
//! session degrades to an empty one instead of an error page.

use art_haus_core::{Cart, ScrollMemory};
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;
use uuid::Uuid;

/// Session keys for shopper data.
pub mod keys {
    /// Key for the shopping cart.
    pub const CART: &str = "cart";

    /// Key for the cart drawer open/closed flag.
    pub const DRAWER_OPEN: &str = "cartDrawerOpen";

    /// Key for per-path scroll offsets.
    pub const SCROLL_POSITIONS: &str = "scroll_positions";

    /// Key for the session's toast channel ID.
    pub const TOAST_CHANNEL: &str = "toast_channel";
}

/// Typed access to the current shopper's session.
#[derive(Debug, Clone)]
pub struct ShopSession(Session);

impl ShopSession {
    #[must_use]
    pub const fn new(session: Session) -> Self {
        Self(session)
    }

    /// The shopper's cart (empty if none yet).
    pub async fn cart(&self) -> Cart {
        self.read_or_default(keys::CART).await
    }

    /// Persist the shopper's cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn save_cart(&self, cart: &Cart) -> Result<(), SessionError> {
        self.0.insert(keys::CART, cart).await
    }

    /// Whether the cart drawer was left open (closed if unknown).
    pub async fn drawer_open(&self) -> bool {
        self.read_or_default(keys::DRAWER_OPEN).await
    }

    /// Persist the cart drawer flag.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn set_drawer_open(&self, open: bool) -> Result<(), SessionError> {
        self.0.insert(keys::DRAWER_OPEN, open).await
    }

    /// The shopper's scroll memory.
    pub async fn scroll_memory(&self) -> ScrollMemory {
        self.read_or_default(keys::SCROLL_POSITIONS).await
    }

    /// Persist the shopper's scroll memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the session store rejects the write.
    pub async fn save_scroll_memory(&self, memory: &ScrollMemory) -> Result<(), SessionError> {
        self.0.insert(keys::SCROLL_POSITIONS, memory).await
    }

    /// The session's toast channel, if one has been assigned.
    pub async fn existing_toast_channel(&self) -> Option<Uuid> {
        self.read(keys::TOAST_CHANNEL).await
    }

    /// The session's toast channel, assigning one on first use.
    ///
    /// # Errors
    ///
    /// Returns an error if a new channel cannot be stored.
    pub async fn toast_channel(&self) -> Result<Uuid, SessionError> {
        if let Some(channel) = self.existing_toast_channel().await {
            return Ok(channel);
        }
        let channel = Uuid::new_v4();
        self.0.insert(keys::TOAST_CHANNEL, channel).await?;
        Ok(channel)
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.0.get::<T>(key).await {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Unreadable session value, using default");
                None
            }
        }
    }

    async fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        self.read(key).await.unwrap_or_default()
    }

    /// Store a raw value under a key (used to simulate corrupted sessions).
    #[cfg(test)]
    pub(crate) async fn insert_raw<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: T,
    ) -> Result<(), SessionError> {
        self.0.insert(key, value).await
    }
}

impl<S> FromRequestParts<S> for ShopSession
where
    S: Send + Sync,
{
    type Rejection = <Session as FromRequestParts<S>>::Rejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Session::from_request_parts(parts, state).await.map(Self)
    }
}
