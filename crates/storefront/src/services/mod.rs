//! Business logic services for storefront.
//!
//! # Services
//!
//! - `session_lock` - One writer at a time per shopper session
//! - `toast` - Per-session toast notifications with timed expiry

pub mod session_lock;
pub mod toast;

pub use session_lock::SessionLocks;
pub use toast::{TOAST_DURATION, Toast, ToastId, ToastQueue, ToastRegistry};
