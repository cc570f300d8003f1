// storefront/src/catalog/filter.rs

use serde::Deserialize;
use std::cmp::Reverse;
use std::str::FromStr;

use crate::error::{StorefrontError, StorefrontResult};
use crate::model::price::parse_price;
use crate::model::{Category, Product};

/// Category value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
  /// Store order.
  #[default]
  Default,
  NameAsc,
  NameDesc,
  PriceAsc,
  PriceDesc,
}

impl SortBy {
  pub fn as_str(&self) -> &'static str {
    match self {
      SortBy::Default => "default",
      SortBy::NameAsc => "name_asc",
      SortBy::NameDesc => "name_desc",
      SortBy::PriceAsc => "price_asc",
      SortBy::PriceDesc => "price_desc",
    }
  }
}

impl FromStr for SortBy {
  type Err = StorefrontError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let key = s.trim().to_ascii_lowercase().replace('-', "_");
    match key.as_str() {
      "" | "default" | "none" => Ok(SortBy::Default),
      "name_asc" => Ok(SortBy::NameAsc),
      "name_desc" => Ok(SortBy::NameDesc),
      "price_asc" => Ok(SortBy::PriceAsc),
      "price_desc" => Ok(SortBy::PriceDesc),
      _ => Err(StorefrontError::invalid(
        "sortBy",
        format!(
          "'{}' is not one of default, name_asc, name_desc, price_asc, price_desc",
          s
        ),
      )),
    }
  }
}

/// Validated catalog criteria. Every present criterion must hold (AND);
/// sorting happens after filtering.
///
/// The same predicate backs the server query and the client-side view, so
/// both agree on which products match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
  pub category: Option<Category>,
  pub min_price_cents: Option<i64>,
  pub max_price_cents: Option<i64>,
  pub search: Option<String>,
  pub sort_by: SortBy,
}

impl ProductFilter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn category(mut self, category: Category) -> Self {
    self.category = Some(category);
    self
  }

  pub fn min_price_cents(mut self, cents: i64) -> Self {
    self.min_price_cents = Some(cents);
    self
  }

  pub fn max_price_cents(mut self, cents: i64) -> Self {
    self.max_price_cents = Some(cents);
    self
  }

  /// Blank terms are ignored.
  pub fn search(mut self, term: impl AsRef<str>) -> Self {
    let term = term.as_ref().trim();
    self.search = (!term.is_empty()).then(|| term.to_string());
    self
  }

  pub fn sort_by(mut self, sort_by: SortBy) -> Self {
    self.sort_by = sort_by;
    self
  }

  pub fn validate(&self) -> StorefrontResult<()> {
    if let Some(min) = self.min_price_cents {
      if min < 0 {
        return Err(StorefrontError::invalid("minPrice", "must be >= 0"));
      }
    }
    if let Some(max) = self.max_price_cents {
      if max < 0 {
        return Err(StorefrontError::invalid("maxPrice", "must be >= 0"));
      }
    }
    if let (Some(min), Some(max)) = (self.min_price_cents, self.max_price_cents) {
      if min > max {
        return Err(StorefrontError::invalid("minPrice", "must not exceed maxPrice"));
      }
    }
    Ok(())
  }

  pub fn matches(&self, product: &Product) -> bool {
    if let Some(category) = self.category {
      if product.category != category {
        return false;
      }
    }
    if let Some(min) = self.min_price_cents {
      if product.price_cents < min {
        return false;
      }
    }
    if let Some(max) = self.max_price_cents {
      if product.price_cents > max {
        return false;
      }
    }
    if let Some(term) = &self.search {
      let term = term.to_lowercase();
      if !product.name.to_lowercase().contains(&term) && !product.description.to_lowercase().contains(&term) {
        return false;
      }
    }
    true
  }

  /// Stable sort; ties keep their incoming order.
  pub fn sort(&self, products: &mut [Product]) {
    match self.sort_by {
      SortBy::Default => {}
      SortBy::NameAsc => products.sort_by_cached_key(|p| p.name.to_lowercase()),
      SortBy::NameDesc => products.sort_by_cached_key(|p| Reverse(p.name.to_lowercase())),
      SortBy::PriceAsc => products.sort_by_key(|p| p.price_cents),
      SortBy::PriceDesc => products.sort_by_key(|p| Reverse(p.price_cents)),
    }
  }

  /// Filters then sorts a slice of already-loaded products.
  pub fn apply<'a>(&self, products: impl IntoIterator<Item = &'a Product>) -> Vec<Product> {
    let mut selected: Vec<Product> = products.into_iter().filter(|p| self.matches(p)).cloned().collect();
    self.sort(&mut selected);
    selected
  }
}

/// Raw criteria as they arrive from a query string or filter form.
/// Empty strings count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogQuery {
  pub category: Option<String>,
  pub min_price: Option<String>,
  pub max_price: Option<String>,
  pub search: Option<String>,
  pub sort_by: Option<String>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
  value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

impl CatalogQuery {
  pub fn parse(&self) -> StorefrontResult<ProductFilter> {
    let mut filter = ProductFilter::new();

    if let Some(category) = non_blank(&self.category) {
      if !category.eq_ignore_ascii_case(ALL_CATEGORIES) {
        filter = filter.category(category.parse()?);
      }
    }
    if let Some(min) = non_blank(&self.min_price) {
      filter = filter.min_price_cents(parse_price("minPrice", min)?);
    }
    if let Some(max) = non_blank(&self.max_price) {
      filter = filter.max_price_cents(parse_price("maxPrice", max)?);
    }
    if let Some(term) = non_blank(&self.search) {
      filter = filter.search(term);
    }
    if let Some(sort_by) = non_blank(&self.sort_by) {
      filter = filter.sort_by(sort_by.parse()?);
    }

    filter.validate()?;
    Ok(filter)
  }
}
