// storefront_server/src/db/seed.rs

//! Demo catalog inserted when `SEED_DB=true` and the catalog is empty.

use storefront::{Category, Product};

fn item(name: &str, price_cents: i64, category: Category, image: &str, description: &str, stock: i32) -> Product {
  Product::new(name, price_cents, category)
    .with_image(format!("https://images.unsplash.com/{}?w=300&h=300&fit=crop", image))
    .with_description(description)
    .with_stock(stock)
}

pub fn demo_products() -> Vec<Product> {
  vec![
    item(
      "Wireless Headphones",
      9_999,
      Category::Electronics,
      "photo-1505740420928-5e560c06d30e",
      "High-quality wireless headphones with noise cancellation",
      50,
    ),
    item(
      "Smartphone",
      69_999,
      Category::Electronics,
      "photo-1511707171634-5f897ff02aa9",
      "Latest smartphone with advanced features",
      30,
    ),
    item(
      "Running Shoes",
      12_999,
      Category::Fashion,
      "photo-1542291026-7eec264c27ff",
      "Comfortable running shoes for daily workouts",
      40,
    ),
    item(
      "Coffee Maker",
      8_999,
      Category::Home,
      "photo-1495474472287-4d71bcdd2085",
      "Automatic coffee maker with programmable settings",
      25,
    ),
    item(
      "Laptop",
      129_999,
      Category::Electronics,
      "photo-1496181133206-80ce9b88a853",
      "Powerful laptop for work and gaming",
      20,
    ),
    item(
      "Winter Jacket",
      19_999,
      Category::Fashion,
      "photo-1551028719-00167b16eac5",
      "Warm winter jacket with premium insulation",
      35,
    ),
    item(
      "Desk Lamp",
      4_999,
      Category::Home,
      "photo-1507473885765-e6ed057f782c",
      "LED desk lamp with adjustable brightness",
      45,
    ),
    item(
      "Fitness Tracker",
      7_999,
      Category::Electronics,
      "photo-1575311373937-040b8e1fd5b6",
      "Smart fitness tracker with heart rate monitor",
      60,
    ),
  ]
}
