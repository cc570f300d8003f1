// storefront_server/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use storefront::{CatalogQuery, ProductId};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::ProductResponse;
use crate::state::AppState;

#[instrument(name = "handler::list_items", skip(app_state, query_params))]
pub async fn list_items_handler(
  app_state: web::Data<AppState>,
  query_params: web::Query<CatalogQuery>,
) -> Result<HttpResponse, AppError> {
  let filter = query_params.parse()?;
  let products = app_state.catalog.query(&filter).await?;
  debug!(count = products.len(), "Catalog query served.");

  let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
  Ok(HttpResponse::Ok().json(body))
}

#[instrument(name = "handler::get_item", skip(app_state, path), fields(item_id = %path.as_ref()))]
pub async fn get_item_handler(app_state: web::Data<AppState>, path: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
  let product = app_state.catalog.get_by_id(ProductId(path.into_inner())).await?;
  Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}
