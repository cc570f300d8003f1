// tests/catalog_query_tests.rs
mod common;

use common::*;
use storefront::{CatalogQuery, Category, ErrorKind, ProductFilter, ProductId, SortBy, StorefrontError};

fn names(products: &[storefront::Product]) -> Vec<&str> {
  products.iter().map(|p| p.name.as_str()).collect()
}

#[tokio::test]
async fn test_no_criteria_returns_everything_in_store_order() {
  let fx = Fixture::demo();
  let all = fx.catalog.query(&ProductFilter::new()).await.unwrap();
  assert_eq!(names(&all), names(&fx.products));
}

#[tokio::test]
async fn test_search_matches_description_case_insensitively() {
  let fx = Fixture::demo();
  let found = fx.catalog.query(&ProductFilter::new().search("phone")).await.unwrap();
  // "Wireless Headphones" and "Smartphone" by name, the tracker by description.
  assert_eq!(names(&found), vec!["Wireless Headphones", "Smartphone", "Fitness Tracker"]);

  let found = fx.catalog.query(&ProductFilter::new().search("NOISE")).await.unwrap();
  assert_eq!(names(&found), vec!["Wireless Headphones"]);
}

#[tokio::test]
async fn test_price_range_is_inclusive_on_both_bounds() {
  let fx = Fixture::with_products(vec![
    storefront::Product::new("Exactly Fifty", 5_000, Category::Home),
    storefront::Product::new("Just Under", 4_999, Category::Home),
    storefront::Product::new("Exactly Hundred", 10_000, Category::Home),
    storefront::Product::new("Just Over", 10_001, Category::Home),
  ]);
  let query = CatalogQuery {
    min_price: Some("50".into()),
    max_price: Some("100".into()),
    ..Default::default()
  };
  let found = fx.catalog.query(&query.parse().unwrap()).await.unwrap();
  assert_eq!(names(&found), vec!["Exactly Fifty", "Exactly Hundred"]);
  assert!(found.iter().all(|p| (5_000..=10_000).contains(&p.price_cents)));
}

#[tokio::test]
async fn test_single_bounds_are_independent() {
  let fx = Fixture::demo();
  let cheap = fx.catalog.query(&ProductFilter::new().max_price_cents(8_999)).await.unwrap();
  assert_eq!(names(&cheap), vec!["Coffee Maker", "Desk Lamp", "Fitness Tracker"]);

  let pricey = fx.catalog.query(&ProductFilter::new().min_price_cents(69_999)).await.unwrap();
  assert_eq!(names(&pricey), vec!["Smartphone", "Laptop"]);
}

#[tokio::test]
async fn test_criteria_are_anded_and_sorted_after_filtering() {
  let fx = Fixture::demo();
  let query = CatalogQuery {
    category: Some("electronics".into()),
    max_price: Some("1000".into()),
    sort_by: Some("price_asc".into()),
    ..Default::default()
  };
  let found = fx.catalog.query(&query.parse().unwrap()).await.unwrap();
  assert_eq!(names(&found), vec!["Fitness Tracker", "Wireless Headphones", "Smartphone"]);
}

#[tokio::test]
async fn test_sort_orders() {
  let fx = Fixture::demo();
  let by = |s: SortBy| ProductFilter::new().category(Category::Fashion).sort_by(s);

  let asc = fx.catalog.query(&by(SortBy::NameAsc)).await.unwrap();
  assert_eq!(names(&asc), vec!["Running Shoes", "Winter Jacket"]);
  let desc = fx.catalog.query(&by(SortBy::NameDesc)).await.unwrap();
  assert_eq!(names(&desc), vec!["Winter Jacket", "Running Shoes"]);
  let desc = fx.catalog.query(&by(SortBy::PriceDesc)).await.unwrap();
  assert_eq!(names(&desc), vec!["Winter Jacket", "Running Shoes"]);
}

#[tokio::test]
async fn test_no_match_is_empty_not_error() {
  let fx = Fixture::demo();
  let found = fx.catalog.query(&ProductFilter::new().search("submarine")).await.unwrap();
  assert!(found.is_empty());
}

#[tokio::test]
async fn test_query_rejects_inverted_range() {
  let fx = Fixture::demo();
  let filter = ProductFilter::new().min_price_cents(500).max_price_cents(100);
  let err = fx.catalog.query(&filter).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}

#[tokio::test]
async fn test_get_by_id() {
  let fx = Fixture::demo();
  let lamp = fx.id_of("Desk Lamp");
  assert_eq!(fx.catalog.get_by_id(lamp).await.unwrap().name, "Desk Lamp");

  let err = fx.catalog.get_by_id(ProductId::new()).await.unwrap_err();
  assert!(matches!(err, StorefrontError::ProductNotFound { .. }));
}

#[tokio::test]
async fn test_seed_if_empty_only_seeds_once() {
  let fx = Fixture::with_products(Vec::new());
  assert_eq!(fx.catalog.seed_if_empty(&demo_catalog()).await.unwrap(), 8);
  assert_eq!(fx.catalog.seed_if_empty(&demo_catalog()).await.unwrap(), 0);
  assert_eq!(fx.catalog.query(&ProductFilter::new()).await.unwrap().len(), 8);
}

#[tokio::test]
async fn test_insert_validates_product() {
  let fx = Fixture::with_products(Vec::new());
  let bad = storefront::Product::new("", 100, Category::Home);
  let err = fx.catalog.insert(&bad).await.unwrap_err();
  assert_eq!(err.kind(), ErrorKind::InvalidArgument);
}
