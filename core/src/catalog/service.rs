// storefront/src/catalog/service.rs

use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::filter::ProductFilter;
use crate::error::{StorefrontError, StorefrontResult};
use crate::model::{Product, ProductId};
use crate::store::CatalogStore;

/// Read side of the catalog: filtered listing and single-product lookup.
#[derive(Clone)]
pub struct CatalogService {
  store: Arc<dyn CatalogStore>,
}

impl CatalogService {
  pub fn new(store: Arc<dyn CatalogStore>) -> Self {
    Self { store }
  }

  /// Products matching `filter`, sorted per `filter.sort_by`. No match is an
  /// empty list, not an error.
  #[instrument(name = "catalog::query", skip(self), err(Display))]
  pub async fn query(&self, filter: &ProductFilter) -> StorefrontResult<Vec<Product>> {
    filter.validate()?;
    let mut products = self.store.find_products_by_filter(filter).await?;
    filter.sort(&mut products);
    info!(matched = products.len(), sort_by = filter.sort_by.as_str(), "Catalog query served.");
    Ok(products)
  }

  #[instrument(name = "catalog::get_by_id", skip(self), fields(product_id = %id), err(Display))]
  pub async fn get_by_id(&self, id: ProductId) -> StorefrontResult<Product> {
    match self.store.find_product_by_id(id).await? {
      Some(product) => Ok(product),
      None => {
        warn!("Product {} not found.", id);
        Err(StorefrontError::ProductNotFound {
          product_id: id.to_string(),
        })
      }
    }
  }

  /// Validates then stores a product. Used by seeding.
  #[instrument(name = "catalog::insert", skip(self, product), fields(product_id = %product.id, name = %product.name), err(Display))]
  pub async fn insert(&self, product: &Product) -> StorefrontResult<()> {
    product.validate()?;
    self.store.insert_product(product).await
  }

  /// Inserts `products` only when the catalog is empty. Returns how many
  /// were inserted.
  #[instrument(name = "catalog::seed_if_empty", skip(self, products), err(Display))]
  pub async fn seed_if_empty(&self, products: &[Product]) -> StorefrontResult<usize> {
    let existing = self.store.count_products().await?;
    if existing > 0 {
      info!(existing, "Catalog already populated; skipping seed.");
      return Ok(0);
    }
    for product in products {
      self.insert(product).await?;
    }
    info!(inserted = products.len(), "Catalog seeded.");
    Ok(products.len())
  }
}
