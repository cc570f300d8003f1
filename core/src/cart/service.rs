// storefront/src/cart/service.rs

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::projection::CartView;
use crate::error::{StorefrontError, StorefrontResult};
use crate::model::{Cart, ProductId, UserId};
use crate::store::{CartStore, CatalogStore};

/// Quantity used by `add` when the caller omits one.
pub const DEFAULT_ADD_QUANTITY: i64 = 1;

/// Per-user cart operations.
///
/// Every mutation is load, validate, apply, then [`CartService::apply_and_project`].
/// There is no lock around the read-modify-write: concurrent edits of the
/// same cart are last-writer-wins.
#[derive(Clone)]
pub struct CartService {
  catalog: Arc<dyn CatalogStore>,
  carts: Arc<dyn CartStore>,
}

impl CartService {
  pub fn new(catalog: Arc<dyn CatalogStore>, carts: Arc<dyn CartStore>) -> Self {
    Self { catalog, carts }
  }

  /// The user's cart at current prices. A user without a cart gets an empty
  /// view and nothing is persisted.
  #[instrument(name = "cart::get", skip(self), fields(user_id = %user_id), err(Display))]
  pub async fn get(&self, user_id: UserId) -> StorefrontResult<CartView> {
    match self.carts.find_cart_by_user(user_id).await? {
      Some(cart) => self.project(&cart).await,
      None => {
        debug!("No cart stored for user; returning empty view.");
        Ok(CartView::empty())
      }
    }
  }

  /// Adds `quantity` (default 1) of a product, merging into an existing line.
  /// Non-positive quantities are rejected before anything is loaded.
  #[instrument(name = "cart::add", skip(self), fields(user_id = %user_id, product_id = %product_id), err(Display))]
  pub async fn add(&self, user_id: UserId, product_id: ProductId, quantity: Option<i64>) -> StorefrontResult<CartView> {
    let requested = quantity.unwrap_or(DEFAULT_ADD_QUANTITY);
    if requested <= 0 {
      warn!(requested, "Rejecting non-positive add quantity.");
      return Err(StorefrontError::invalid("quantity", "quantity must be a positive number"));
    }
    let requested = u32::try_from(requested)
      .map_err(|_| StorefrontError::invalid("quantity", format!("{} is too large", requested)))?;

    if self.catalog.find_product_by_id(product_id).await?.is_none() {
      warn!("Add to cart refused: product does not exist.");
      return Err(StorefrontError::ProductNotFound {
        product_id: product_id.to_string(),
      });
    }

    let mut cart = self
      .carts
      .find_cart_by_user(user_id)
      .await?
      .unwrap_or_else(|| Cart::new(user_id));
    let new_quantity = cart.add_quantity(product_id, requested)?;
    info!(added = requested, new_quantity, "Cart line merged.");

    self.apply_and_project(&cart).await
  }

  /// Sets a line's quantity absolutely; `quantity <= 0` removes the line.
  #[instrument(name = "cart::update_quantity", skip(self), fields(user_id = %user_id, product_id = %product_id), err(Display))]
  pub async fn update_quantity(&self, user_id: UserId, product_id: ProductId, quantity: i64) -> StorefrontResult<CartView> {
    let mut cart = self.load_existing(user_id).await?;
    match cart.set_quantity(product_id, quantity)? {
      Some(q) => info!(quantity = q, "Cart line quantity set."),
      None => info!("Cart line removed by non-positive quantity."),
    }
    self.apply_and_project(&cart).await
  }

  /// Removes a line if present. Removing an absent line changes nothing and
  /// is not an error.
  #[instrument(name = "cart::remove", skip(self), fields(user_id = %user_id, product_id = %product_id), err(Display))]
  pub async fn remove(&self, user_id: UserId, product_id: ProductId) -> StorefrontResult<CartView> {
    let mut cart = self.load_existing(user_id).await?;
    if cart.remove_line(product_id) {
      info!("Cart line removed.");
      self.apply_and_project(&cart).await
    } else {
      debug!("Product not in cart; nothing to remove.");
      self.project(&cart).await
    }
  }

  /// Empties the user's cart. Idempotent, and never creates a cart.
  #[instrument(name = "cart::clear", skip(self), fields(user_id = %user_id), err(Display))]
  pub async fn clear(&self, user_id: UserId) -> StorefrontResult<CartView> {
    let Some(mut cart) = self.carts.find_cart_by_user(user_id).await? else {
      return Ok(CartView::empty());
    };
    if !cart.clear() {
      return Ok(CartView::empty());
    }
    info!("Cart cleared.");
    self.apply_and_project(&cart).await
  }

  /// Persists `cart` and returns its projection. The single exit path of
  /// every mutation.
  pub async fn apply_and_project(&self, cart: &Cart) -> StorefrontResult<CartView> {
    self.carts.upsert_cart(cart).await?;
    self.project(cart).await
  }

  async fn project(&self, cart: &Cart) -> StorefrontResult<CartView> {
    if cart.is_empty() {
      return Ok(CartView::empty());
    }
    let ids: Vec<ProductId> = cart.lines().iter().map(|l| l.product_id).collect();
    let products = self.catalog.find_products_by_ids(&ids).await?;
    let view = CartView::project(cart, products);
    if !view.missing_products.is_empty() {
      warn!(
        missing = ?view.missing_products,
        "Cart references products that no longer exist; excluded from total."
      );
    }
    Ok(view)
  }

  async fn load_existing(&self, user_id: UserId) -> StorefrontResult<Cart> {
    self
      .carts
      .find_cart_by_user(user_id)
      .await?
      .ok_or_else(|| StorefrontError::CartNotFound {
        user_id: user_id.to_string(),
      })
  }
}
