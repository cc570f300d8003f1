// storefront_server/src/web/mod.rs

pub mod cors;
pub mod extractors;
pub mod handlers;
pub mod routes;

pub use cors::cors_middleware;
pub use extractors::AuthenticatedUser;
pub use routes::configure_app_routes;
