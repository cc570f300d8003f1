// storefront/src/store/memory.rs

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, instrument, warn};

use super::{CartStore, CatalogStore};
use crate::catalog::ProductFilter;
use crate::error::{StorefrontError, StorefrontResult};
use crate::model::{Cart, Product, ProductId, UserId};

#[derive(Debug, thiserror::Error)]
#[error("in-memory store is configured to fail")]
struct InjectedFailure;

/// Process-local store backing both contracts.
///
/// Products keep insertion order. Lock guards are never held across an
/// `.await`.
#[derive(Debug, Default)]
pub struct InMemoryStore {
  products: RwLock<Vec<Product>>,
  carts: RwLock<HashMap<UserId, Cart>>,
  fail_reads: AtomicBool,
  fail_writes: AtomicBool,
}

impl InMemoryStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
    let store = Self::new();
    store.products.write().extend(products);
    store
  }

  /// Replaces a stored product in place, keeping its position. Returns
  /// `false` when no product has that id.
  pub fn replace_product(&self, product: Product) -> bool {
    let mut products = self.products.write();
    match products.iter_mut().find(|p| p.id == product.id) {
      Some(slot) => {
        *slot = product;
        true
      }
      None => false,
    }
  }

  pub fn remove_product(&self, id: ProductId) -> Option<Product> {
    let mut products = self.products.write();
    let index = products.iter().position(|p| p.id == id)?;
    Some(products.remove(index))
  }

  /// Makes every subsequent read fail with `Unavailable`.
  pub fn set_fail_reads(&self, fail: bool) {
    self.fail_reads.store(fail, Ordering::SeqCst);
  }

  /// Makes every subsequent write fail with `Unavailable`.
  pub fn set_fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }

  fn check_reads(&self) -> StorefrontResult<()> {
    if self.fail_reads.load(Ordering::SeqCst) {
      warn!("In-memory store read rejected (fail_reads set).");
      return Err(StorefrontError::unavailable("read failed", InjectedFailure));
    }
    Ok(())
  }

  fn check_writes(&self) -> StorefrontResult<()> {
    if self.fail_writes.load(Ordering::SeqCst) {
      warn!("In-memory store write rejected (fail_writes set).");
      return Err(StorefrontError::unavailable("write failed", InjectedFailure));
    }
    Ok(())
  }
}

#[async_trait]
impl CatalogStore for InMemoryStore {
  async fn find_product_by_id(&self, id: ProductId) -> StorefrontResult<Option<Product>> {
    self.check_reads()?;
    Ok(self.products.read().iter().find(|p| p.id == id).cloned())
  }

  #[instrument(name = "memory_store::find_products_by_filter", skip(self))]
  async fn find_products_by_filter(&self, filter: &ProductFilter) -> StorefrontResult<Vec<Product>> {
    self.check_reads()?;
    let products = self.products.read();
    let found: Vec<Product> = products.iter().filter(|p| filter.matches(p)).cloned().collect();
    debug!(scanned = products.len(), matched = found.len(), "Filtered in-memory catalog.");
    Ok(found)
  }

  async fn find_products_by_ids(&self, ids: &[ProductId]) -> StorefrontResult<Vec<Product>> {
    self.check_reads()?;
    Ok(
      self
        .products
        .read()
        .iter()
        .filter(|p| ids.contains(&p.id))
        .cloned()
        .collect(),
    )
  }

  async fn count_products(&self) -> StorefrontResult<u64> {
    self.check_reads()?;
    Ok(self.products.read().len() as u64)
  }

  async fn insert_product(&self, product: &Product) -> StorefrontResult<()> {
    self.check_writes()?;
    let mut products = self.products.write();
    if products.iter().any(|p| p.id == product.id) {
      return Err(StorefrontError::invalid(
        "product id",
        format!("product {} already exists", product.id),
      ));
    }
    products.push(product.clone());
    Ok(())
  }
}

#[async_trait]
impl CartStore for InMemoryStore {
  async fn find_cart_by_user(&self, user_id: UserId) -> StorefrontResult<Option<Cart>> {
    self.check_reads()?;
    Ok(self.carts.read().get(&user_id).cloned())
  }

  async fn upsert_cart(&self, cart: &Cart) -> StorefrontResult<()> {
    self.check_writes()?;
    self.carts.write().insert(cart.user_id(), cart.clone());
    Ok(())
  }
}
