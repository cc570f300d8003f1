// storefront_server/src/models/product.rs

use serde::Serialize;
use storefront::model::price::cents_to_decimal;
use storefront::{Category, Product};
use uuid::Uuid;

/// Wire shape of a product; `price` is a decimal amount.
#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
  pub id: Uuid,
  pub name: String,
  pub price: f64,
  pub category: Category,
  pub image: String,
  pub description: String,
  pub stock: i32,
}

impl From<Product> for ProductResponse {
  fn from(p: Product) -> Self {
    Self {
      id: p.id.0,
      name: p.name,
      price: cents_to_decimal(p.price_cents),
      category: p.category,
      image: p.image,
      description: p.description,
      stock: p.stock,
    }
  }
}
