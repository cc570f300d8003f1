// storefront_server/src/models/cart.rs

use serde::Serialize;
use storefront::model::price::cents_to_decimal;
use storefront::view::item_count;
use storefront::CartView;
use uuid::Uuid;

use super::product::ProductResponse;

#[derive(Debug, Clone, Serialize)]
pub struct CartItemResponse {
  pub item: ProductResponse,
  pub quantity: u32,
}

/// Body of every `/cart` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
  pub items: Vec<CartItemResponse>,
  pub total: f64,
  pub item_count: u64,
  /// Ids of lines whose product was removed from the catalog.
  pub missing_items: Vec<Uuid>,
}

impl From<CartView> for CartResponse {
  fn from(view: CartView) -> Self {
    let count = item_count(&view);
    Self {
      total: cents_to_decimal(view.total_cents),
      item_count: count,
      missing_items: view.missing_products.iter().map(|id| id.0).collect(),
      items: view
        .lines
        .into_iter()
        .map(|line| CartItemResponse {
          item: line.product.into(),
          quantity: line.quantity,
        })
        .collect(),
    }
  }
}
