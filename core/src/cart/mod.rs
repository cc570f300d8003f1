// storefront/src/cart/mod.rs

//! The cart aggregate service and its projection.

pub mod projection;
pub mod service;

pub use projection::{CartView, CartViewLine};
pub use service::{CartService, DEFAULT_ADD_QUANTITY};
