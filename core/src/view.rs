// storefront/src/view.rs

//! Pure helpers for clients that already hold fetched data.

use crate::cart::CartView;
use crate::catalog::ProductFilter;
use crate::model::Product;

/// Total number of units across all resolved lines.
pub fn item_count(cart: &CartView) -> u64 {
  cart.lines.iter().map(|l| u64::from(l.quantity)).sum()
}

/// Filters and sorts an already-fetched product list without going back to
/// the store. Uses the same predicate as [`crate::catalog::CatalogService::query`].
pub fn filtered_view(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
  filter.apply(products)
}
