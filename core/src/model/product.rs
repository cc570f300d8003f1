// storefront/src/model/product.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::ProductId;
use crate::error::{StorefrontError, StorefrontResult};

/// The fixed set of catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
  Electronics,
  Fashion,
  Home,
}

impl Category {
  pub const ALL: [Category; 3] = [Category::Electronics, Category::Fashion, Category::Home];

  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Electronics => "Electronics",
      Category::Fashion => "Fashion",
      Category::Home => "Home",
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Case-insensitive: `"electronics"` and `"Electronics"` parse alike.
impl FromStr for Category {
  type Err = StorefrontError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim();
    Category::ALL
      .into_iter()
      .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
      .ok_or_else(|| {
        StorefrontError::invalid(
          "category",
          format!("'{}' is not one of Electronics, Fashion, Home", s),
        )
      })
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  pub id: ProductId,
  pub name: String,
  pub price_cents: i64,
  pub category: Category,
  pub image: String,
  pub description: String,
  pub stock: i32,
}

impl Product {
  pub fn new(name: impl Into<String>, price_cents: i64, category: Category) -> Self {
    Self {
      id: ProductId::new(),
      name: name.into(),
      price_cents,
      category,
      image: String::new(),
      description: String::new(),
      stock: 0,
    }
  }

  pub fn with_id(mut self, id: ProductId) -> Self {
    self.id = id;
    self
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn with_image(mut self, image: impl Into<String>) -> Self {
    self.image = image.into();
    self
  }

  pub fn with_stock(mut self, stock: i32) -> Self {
    self.stock = stock;
    self
  }

  pub fn validate(&self) -> StorefrontResult<()> {
    if self.name.trim().is_empty() {
      return Err(StorefrontError::invalid("name", "product name cannot be empty"));
    }
    if self.price_cents < 0 {
      return Err(StorefrontError::invalid("price", "price cannot be negative"));
    }
    if self.stock < 0 {
      return Err(StorefrontError::invalid("stock", "stock cannot be negative"));
    }
    Ok(())
  }
}
