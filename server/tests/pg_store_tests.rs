// storefront_server/tests/pg_store_tests.rs
//
// Needs a reachable PostgreSQL in DATABASE_URL:
//   cargo test -p storefront_server --test pg_store_tests -- --ignored

use sqlx::PgPool;
use std::sync::Arc;
use storefront::view::filtered_view;
use storefront::{CatalogService, Category, Product, ProductFilter, SortBy};
use storefront_server::db::seed::demo_products;
use storefront_server::db::PgStore;

fn catalog_with_edge_cases() -> Vec<Product> {
  let mut products = demo_products();
  products.push(Product::new("50% Off Mug", 1_000, Category::Home).with_description("Sale item"));
  products.push(Product::new("Mug_Set", 10_000, Category::Home).with_description("Four mugs"));
  products.push(Product::new("apple cable", 4_999, Category::Electronics).with_description("USB-C"));
  products
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires a PostgreSQL DATABASE_URL"]
async fn sql_filter_agrees_with_client_filtered_view(pool: PgPool) {
  let catalog = CatalogService::new(Arc::new(PgStore::new(pool)));
  let products = catalog_with_edge_cases();
  for product in &products {
    catalog.insert(product).await.expect("insert product");
  }

  let filters = [
    ProductFilter::new(),
    ProductFilter::new().search("%"),
    ProductFilter::new().search("_"),
    ProductFilter::new().search("PHONE"),
    ProductFilter::new().min_price_cents(4_999).max_price_cents(10_000),
    ProductFilter::new().category(Category::Home).sort_by(SortBy::NameAsc),
    ProductFilter::new().category(Category::Electronics).sort_by(SortBy::PriceDesc),
    ProductFilter::new().sort_by(SortBy::NameDesc),
  ];
  for filter in filters {
    let from_sql: Vec<String> = catalog
      .query(&filter)
      .await
      .expect("query")
      .into_iter()
      .map(|p| p.name)
      .collect();
    let from_view: Vec<String> = filtered_view(&products, &filter).into_iter().map(|p| p.name).collect();
    assert_eq!(from_sql, from_view, "{:?}", filter);
  }
}
