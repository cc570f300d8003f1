// storefront/src/store/mod.rs

//! Storage contracts the catalog and cart services depend on.
//!
//! Services receive these as `Arc<dyn ...>` so a database-backed store and
//! [`InMemoryStore`] are interchangeable.

pub mod memory;

use async_trait::async_trait;

use crate::catalog::ProductFilter;
use crate::error::StorefrontResult;
use crate::model::{Cart, Product, ProductId, UserId};

pub use memory::InMemoryStore;

#[async_trait]
pub trait CatalogStore: Send + Sync {
  async fn find_product_by_id(&self, id: ProductId) -> StorefrontResult<Option<Product>>;

  /// Products matching every criterion of `filter`, in store (insertion)
  /// order. Implementations do not need to honour `filter.sort_by`.
  async fn find_products_by_filter(&self, filter: &ProductFilter) -> StorefrontResult<Vec<Product>>;

  /// Resolves many ids at once. Missing ids are simply absent from the
  /// result; order is unspecified.
  async fn find_products_by_ids(&self, ids: &[ProductId]) -> StorefrontResult<Vec<Product>> {
    let mut found = Vec::with_capacity(ids.len());
    for id in ids {
      if let Some(product) = self.find_product_by_id(*id).await? {
        found.push(product);
      }
    }
    Ok(found)
  }

  async fn count_products(&self) -> StorefrontResult<u64>;

  async fn insert_product(&self, product: &Product) -> StorefrontResult<()>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
  async fn find_cart_by_user(&self, user_id: UserId) -> StorefrontResult<Option<Cart>>;

  /// Replaces the user's whole line set. Either the new cart is stored or
  /// the previous one is left untouched.
  async fn upsert_cart(&self, cart: &Cart) -> StorefrontResult<()>;
}
