// storefront_server/src/lib.rs

//! HTTP front end for the storefront: configuration, persistence adapters,
//! authentication, and the actix-web routes over `storefront`'s services.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod web;

pub use config::{AppConfig, StoreBackend};
pub use errors::AppError;
pub use state::AppState;
