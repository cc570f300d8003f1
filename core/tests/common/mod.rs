// tests/common/mod.rs
#![allow(dead_code)] // Not every test file uses every helper

use once_cell::sync::Lazy;
use std::sync::Arc;
use storefront::{CartService, CatalogService, Category, InMemoryStore, Product, ProductId, UserId};
use tracing::Level;

// --- Tracing setup (once per test binary) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Captured per test
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Catalog fixtures ---
pub fn laptop() -> Product {
  Product::new("Laptop", 129_999, Category::Electronics)
    .with_description("Powerful laptop for work and gaming")
    .with_stock(20)
}

pub fn desk_lamp() -> Product {
  Product::new("Desk Lamp", 4_999, Category::Home)
    .with_description("LED desk lamp with adjustable brightness")
    .with_stock(45)
}

/// A small catalog in a fixed store order.
pub fn demo_catalog() -> Vec<Product> {
  vec![
    Product::new("Wireless Headphones", 9_999, Category::Electronics)
      .with_description("High-quality wireless headphones with noise cancellation")
      .with_stock(50),
    Product::new("Smartphone", 69_999, Category::Electronics)
      .with_description("Latest smartphone with advanced features")
      .with_stock(30),
    Product::new("Running Shoes", 12_999, Category::Fashion)
      .with_description("Comfortable running shoes for daily workouts")
      .with_stock(40),
    Product::new("Coffee Maker", 8_999, Category::Home)
      .with_description("Automatic coffee maker with programmable settings")
      .with_stock(25),
    laptop(),
    Product::new("Winter Jacket", 19_999, Category::Fashion)
      .with_description("Warm winter jacket with premium insulation")
      .with_stock(35),
    desk_lamp(),
    Product::new("Fitness Tracker", 7_999, Category::Electronics)
      .with_description("Smart fitness tracker with heart rate monitor. Pairs with any Phone.")
      .with_stock(60),
  ]
}

pub struct Fixture {
  pub store: Arc<InMemoryStore>,
  pub catalog: CatalogService,
  pub carts: CartService,
  pub products: Vec<Product>,
}

impl Fixture {
  pub fn with_products(products: Vec<Product>) -> Self {
    setup_tracing();
    let store = Arc::new(InMemoryStore::with_products(products.clone()));
    Self {
      catalog: CatalogService::new(store.clone()),
      carts: CartService::new(store.clone(), store.clone()),
      store,
      products,
    }
  }

  pub fn demo() -> Self {
    Self::with_products(demo_catalog())
  }

  pub fn id_of(&self, name: &str) -> ProductId {
    self
      .products
      .iter()
      .find(|p| p.name == name)
      .map(|p| p.id)
      .unwrap_or_else(|| panic!("no fixture product named {}", name))
  }
}

pub fn new_user() -> UserId {
  UserId::new()
}
