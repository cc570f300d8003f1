// storefront_server/src/web/cors.rs

use actix_cors::Cors;
use actix_web::http::header;

use crate::config::AppConfig;

/// Cross-origin policy for the browser frontend. Only configured origins
/// receive CORS headers; requests without an `Origin` pass through.
pub fn cors_middleware(config: &AppConfig) -> Cors {
  config
    .cors_allowed_origins
    .iter()
    .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
    .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
    .supports_credentials()
    .max_age(3600)
}
