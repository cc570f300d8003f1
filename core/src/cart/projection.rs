// storefront/src/cart/projection.rs

use serde::Serialize;
use std::collections::HashMap;

use crate::model::{Cart, Product, ProductId};

/// A cart line joined with its product as currently stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CartViewLine {
  pub product: Product,
  pub quantity: u32,
}

impl CartViewLine {
  pub fn line_total_cents(&self) -> i64 {
    self.product.price_cents.saturating_mul(i64::from(self.quantity))
  }
}

/// What every cart operation returns: resolved lines and their total at
/// current prices.
///
/// Lines whose product no longer exists are left out of `lines` and `total`
/// and listed in `missing_products` instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CartView {
  pub lines: Vec<CartViewLine>,
  pub total_cents: i64,
  pub missing_products: Vec<ProductId>,
}

impl CartView {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty() && self.missing_products.is_empty()
  }

  pub fn line(&self, product_id: ProductId) -> Option<&CartViewLine> {
    self.lines.iter().find(|l| l.product.id == product_id)
  }

  /// Joins `cart` with `products`, keeping the cart's line order.
  pub fn project(cart: &Cart, products: impl IntoIterator<Item = Product>) -> Self {
    let mut by_id: HashMap<ProductId, Product> = products.into_iter().map(|p| (p.id, p)).collect();
    let mut view = CartView::empty();

    for line in cart.lines() {
      match by_id.remove(&line.product_id) {
        Some(product) => {
          let resolved = CartViewLine {
            product,
            quantity: line.quantity,
          };
          view.total_cents = view.total_cents.saturating_add(resolved.line_total_cents());
          view.lines.push(resolved);
        }
        None => view.missing_products.push(line.product_id),
      }
    }
    view
  }
}
