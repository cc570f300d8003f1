// storefront_server/src/web/routes.rs

use actix_web::{error, web, HttpRequest, HttpResponse};

use crate::errors::AppError;
use crate::web::handlers::{auth_handlers, cart_handlers, product_handlers};

async fn health_check_handler() -> HttpResponse {
  HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

async fn route_not_found_handler(req: HttpRequest) -> Result<HttpResponse, AppError> {
  Err(AppError::NotFound(format!("Route {} {} not found", req.method(), req.path())))
}

/// Extractor failures (bad JSON, bad query, non-UUID path) get the same
/// `{kind, message}` body as every other error.
fn extractor_configs(cfg: &mut web::ServiceConfig) {
  cfg
    .app_data(web::JsonConfig::default().error_handler(|err, _req| {
      error::Error::from(AppError::Validation(format!("Invalid JSON body: {}", err)))
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
      error::Error::from(AppError::Validation(format!("Invalid query string: {}", err)))
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
      error::Error::from(AppError::Validation(format!("Invalid path parameter: {}", err)))
    }));
}

pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  extractor_configs(cfg);
  // Unknown paths, and known paths hit with an unrouted method.
  cfg.default_service(web::route().to(route_not_found_handler));
  cfg.service(
    web::scope("/api")
      .route("/health", web::get().to(health_check_handler))
      .service(
        web::scope("/auth")
          .route("/register", web::post().to(auth_handlers::register_handler))
          .route("/login", web::post().to(auth_handlers::login_handler))
          .route("/me", web::get().to(auth_handlers::me_handler)),
      )
      .service(
        web::scope("/items")
          .route("", web::get().to(product_handlers::list_items_handler))
          .route("/{item_id}", web::get().to(product_handlers::get_item_handler)),
      )
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::get_cart_handler))
          .route("", web::post().to(cart_handlers::add_to_cart_handler))
          .route("", web::delete().to(cart_handlers::clear_cart_handler))
          .route("/{item_id}", web::put().to(cart_handlers::update_cart_item_handler))
          .route("/{item_id}", web::delete().to(cart_handlers::remove_cart_item_handler)),
      ),
  );
}
