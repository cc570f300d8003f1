// storefront/src/lib.rs

//! Storefront: catalog querying and per-user carts.
//!
//!  - [`catalog::CatalogService`] turns [`catalog::ProductFilter`] criteria
//!    (category, inclusive price range, text search, sort) into a product list.
//!  - [`cart::CartService`] adds, updates, removes and clears cart lines, and
//!    projects every result as a [`cart::CartView`] priced from the live catalog.
//!  - [`view`] offers the same filtering and counting over data a client
//!    has already fetched.
//!
//! Storage is injected through the [`store::CatalogStore`] and
//! [`store::CartStore`] traits; [`store::InMemoryStore`] implements both.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod model;
pub mod store;
pub mod view;

pub use crate::cart::{CartService, CartView, CartViewLine};
pub use crate::catalog::{CatalogQuery, CatalogService, ProductFilter, SortBy};
pub use crate::error::{ErrorKind, StorefrontError, StorefrontResult};
pub use crate::model::{Cart, CartLine, Category, Product, ProductId, UserId};
pub use crate::store::{CartStore, CatalogStore, InMemoryStore};
