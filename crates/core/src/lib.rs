//! Art Haus Core - Storefront domain library.
//!
//! This crate holds everything the storefront knows about products, carts,
//! and orders, independent of how it is served:
//! - `storefront` - HTTP service exposing the catalog, cart, and checkout
//!
//! # Architecture
//!
//! The core crate contains only types and pure logic - no I/O, no sessions,
//! no timers. State containers here are plain values owned by whoever serves
//! them.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices
//! - [`catalog`] - The static product list
//! - [`cart`] - The shopping cart
//! - [`checkout`] - Checkout form validation
//! - [`order`] - Order message and messaging link composition
//! - [`scroll`] - Per-route scroll position memory

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod order;
pub mod scroll;
pub mod types;

pub use cart::{AddMode, Cart, CartLineItem, ItemSnapshot};
pub use catalog::{Catalog, Product};
pub use checkout::{CheckoutForm, Field, FieldError, ValidationErrors};
pub use order::{
    BusinessNumber, BusinessNumberError, ContactDetails, OrderComposer, OrderLine, OutboundOrder,
    encode_message,
};
pub use scroll::{NavigationKind, OffsetError, ScrollMemory};
pub use types::*;
