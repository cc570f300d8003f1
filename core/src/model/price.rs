// storefront/src/model/price.rs

//! Prices are held as integer cents. These helpers convert at the edges,
//! where prices travel as decimal numbers.

use crate::error::{StorefrontError, StorefrontResult};

/// Converts a decimal amount to cents, rounding to the nearest cent.
/// Returns `None` for negative or non-finite amounts.
pub fn cents_from_decimal(amount: f64) -> Option<i64> {
  if !amount.is_finite() || amount < 0.0 {
    return None;
  }
  let cents = (amount * 100.0).round();
  if cents > i64::MAX as f64 {
    return None;
  }
  Some(cents as i64)
}

pub fn cents_to_decimal(cents: i64) -> f64 {
  cents as f64 / 100.0
}

/// Parses a user-supplied price such as `"49.99"` into cents.
pub fn parse_price(field: &'static str, raw: &str) -> StorefrontResult<i64> {
  let amount: f64 = raw
    .trim()
    .parse()
    .map_err(|_| StorefrontError::invalid(field, format!("'{}' is not a number", raw)))?;
  cents_from_decimal(amount)
    .ok_or_else(|| StorefrontError::invalid(field, format!("'{}' must be a finite amount >= 0", raw)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn rounds_to_nearest_cent() {
    assert_eq!(cents_from_decimal(1299.99), Some(129_999));
    assert_eq!(cents_from_decimal(49.99), Some(4_999));
    assert_eq!(cents_from_decimal(0.0), Some(0));
    assert_eq!(cents_from_decimal(-0.01), None);
    assert_eq!(cents_from_decimal(f64::NAN), None);
  }

  #[test]
  fn parse_price_rejects_garbage() {
    assert_eq!(parse_price("minPrice", " 50 ").unwrap(), 5_000);
    assert!(parse_price("minPrice", "fifty").is_err());
    assert!(parse_price("maxPrice", "-3").is_err());
    assert!(parse_price("maxPrice", "inf").is_err());
  }
}
