// storefront_server/src/state.rs

use crate::config::AppConfig;
use crate::db::{InMemoryUserStore, PgStore, UserStore};
use crate::errors::Result;
use crate::services::AuthService;
use sqlx::PgPool;
use std::sync::Arc;
use storefront::{CartService, CartStore, CatalogService, CatalogStore, InMemoryStore};

#[derive(Clone)]
pub struct AppState {
  pub catalog: CatalogService,
  pub carts: CartService,
  pub auth: AuthService,
  pub config: Arc<AppConfig>, // Share loaded config
}

impl AppState {
  /// Wires the services onto explicit store handles.
  pub fn from_stores(
    catalog_store: Arc<dyn CatalogStore>,
    cart_store: Arc<dyn CartStore>,
    user_store: Arc<dyn UserStore>,
    config: Arc<AppConfig>,
  ) -> Result<Self> {
    Ok(Self {
      catalog: CatalogService::new(catalog_store.clone()),
      carts: CartService::new(catalog_store, cart_store),
      auth: AuthService::new(user_store, config.session_ttl_hours)?,
      config,
    })
  }

  pub fn postgres(pool: PgPool, config: Arc<AppConfig>) -> Result<Self> {
    let store = Arc::new(PgStore::new(pool));
    Self::from_stores(store.clone(), store.clone(), store, config)
  }

  pub fn in_memory(store: Arc<InMemoryStore>, config: Arc<AppConfig>) -> Result<Self> {
    Self::from_stores(store.clone(), store, Arc::new(InMemoryUserStore::new()), config)
  }
}
