// storefront/src/model/cart.rs

use serde::{Deserialize, Serialize};

use super::ids::{ProductId, UserId};
use crate::error::{StorefrontError, StorefrontResult};

/// One product's presence in a cart. `quantity` is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
  pub product_id: ProductId,
  pub quantity: u32,
}

/// A user's cart: at most one line per product, in insertion order.
///
/// Mutators keep the line invariants; prices are not stored here, totals are
/// computed at projection time from the live catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
  user_id: UserId,
  lines: Vec<CartLine>,
}

impl Cart {
  pub fn new(user_id: UserId) -> Self {
    Self {
      user_id,
      lines: Vec::new(),
    }
  }

  /// Rebuilds a cart from stored lines. Zero-quantity lines are dropped and
  /// repeated products are merged so a hand-edited record cannot break the
  /// one-line-per-product rule.
  pub fn from_lines(user_id: UserId, stored: impl IntoIterator<Item = CartLine>) -> Self {
    let mut cart = Self::new(user_id);
    for line in stored {
      if line.quantity == 0 {
        continue;
      }
      match cart.lines.iter_mut().find(|l| l.product_id == line.product_id) {
        Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
        None => cart.lines.push(line),
      }
    }
    cart
  }

  pub fn user_id(&self) -> UserId {
    self.user_id
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
    self.lines.iter().find(|l| l.product_id == product_id)
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn item_count(&self) -> u64 {
    self.lines.iter().map(|l| u64::from(l.quantity)).sum()
  }

  /// Merge semantics: increments an existing line or appends a new one.
  /// Returns the resulting quantity for the product.
  pub fn add_quantity(&mut self, product_id: ProductId, quantity: u32) -> StorefrontResult<u32> {
    if quantity == 0 {
      return Err(StorefrontError::invalid("quantity", "quantity must be a positive number"));
    }
    match self.lines.iter_mut().find(|l| l.product_id == product_id) {
      Some(existing) => {
        existing.quantity = existing
          .quantity
          .checked_add(quantity)
          .ok_or_else(|| StorefrontError::invalid("quantity", "resulting quantity is too large"))?;
        Ok(existing.quantity)
      }
      None => {
        self.lines.push(CartLine { product_id, quantity });
        Ok(quantity)
      }
    }
  }

  /// Absolute set. A quantity <= 0 removes the line. Returns the new
  /// quantity, or `None` when the line was removed.
  pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) -> StorefrontResult<Option<u32>> {
    let index = self
      .lines
      .iter()
      .position(|l| l.product_id == product_id)
      .ok_or_else(|| StorefrontError::CartLineNotFound {
        product_id: product_id.to_string(),
      })?;

    if quantity <= 0 {
      self.lines.remove(index);
      return Ok(None);
    }

    let quantity = u32::try_from(quantity)
      .map_err(|_| StorefrontError::invalid("quantity", format!("{} is too large", quantity)))?;
    self.lines[index].quantity = quantity;
    Ok(Some(quantity))
  }

  /// Returns whether a line was actually removed.
  pub fn remove_line(&mut self, product_id: ProductId) -> bool {
    let before = self.lines.len();
    self.lines.retain(|l| l.product_id != product_id);
    self.lines.len() != before
  }

  /// Returns whether anything was removed.
  pub fn clear(&mut self) -> bool {
    let had_lines = !self.lines.is_empty();
    self.lines.clear();
    had_lines
  }
}
