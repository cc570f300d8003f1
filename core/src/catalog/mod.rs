// storefront/src/catalog/mod.rs

//! Catalog criteria and the query service.

pub mod filter;
pub mod service;

pub use filter::{CatalogQuery, ProductFilter, SortBy, ALL_CATEGORIES};
pub use service::CatalogService;
