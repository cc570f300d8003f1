// storefront/src/model/mod.rs

//! Catalog and cart entities.

pub mod cart;
pub mod ids;
pub mod price;
pub mod product;

pub use cart::{Cart, CartLine};
pub use ids::{ProductId, UserId};
pub use product::{Category, Product};
