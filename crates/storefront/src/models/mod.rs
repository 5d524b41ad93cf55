//! Domain models for storefront.
//!
//! The domain itself (catalog, cart, orders) lives in `art-haus-core`; this
//! module holds what the storefront keeps in each shopper's session.

pub mod session;

pub use session::{ShopSession, keys as session_keys};
