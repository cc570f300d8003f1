// storefront_server/src/models/mod.rs

//! Server-side entities and response bodies.

pub mod cart;
pub mod product;
pub mod user;

pub use cart::{CartItemResponse, CartResponse};
pub use product::ProductResponse;
pub use user::{Session, User};
