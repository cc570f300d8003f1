// storefront_server/src/db/pg_store.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use storefront::{
  Cart, CartLine, CartStore, CatalogStore, Category, Product, ProductFilter, ProductId, StorefrontError,
  StorefrontResult, UserId,
};
use tracing::{debug, error, instrument};
use uuid::Uuid;

use super::UserStore;
use crate::errors::{AppError, Result};
use crate::models::{Session, User};

const PRODUCT_COLUMNS: &str = "id, name, price_cents, category, image, description, stock";

/// PostgreSQL-backed store for catalog, carts, users and sessions.
///
/// A cart is one row whose `lines` column holds the whole line set as JSONB,
/// so an upsert replaces it in a single statement.
#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

#[derive(Debug, FromRow)]
struct ProductRow {
  id: Uuid,
  name: String,
  price_cents: i64,
  category: String,
  image: String,
  description: String,
  stock: i32,
}

impl TryFrom<ProductRow> for Product {
  type Error = StorefrontError;

  fn try_from(row: ProductRow) -> StorefrontResult<Self> {
    let category: Category = row
      .category
      .parse()
      .map_err(|e| StorefrontError::unavailable(format!("stored product {} is corrupt", row.id), e))?;
    Ok(Product {
      id: ProductId(row.id),
      name: row.name,
      price_cents: row.price_cents,
      category,
      image: row.image,
      description: row.description,
      stock: row.stock,
    })
  }
}

fn unavailable(context: &'static str) -> impl FnOnce(sqlx::Error) -> StorefrontError {
  move |e| {
    error!(error = %e, "{}", context);
    StorefrontError::unavailable(context, e)
  }
}

/// Escapes LIKE wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
  let mut escaped = String::with_capacity(term.len());
  for ch in term.chars() {
    if matches!(ch, '\\' | '%' | '_') {
      escaped.push('\\');
    }
    escaped.push(ch);
  }
  escaped
}

/// SQL twin of `ProductFilter::matches`: inclusive price bounds, literal
/// case-insensitive search over name or description, insertion order.
fn product_filter_query(filter: &ProductFilter) -> QueryBuilder<'static, Postgres> {
  let mut qb = QueryBuilder::new(format!("SELECT {} FROM products WHERE TRUE", PRODUCT_COLUMNS));

  if let Some(category) = filter.category {
    qb.push(" AND category = ").push_bind(category.as_str());
  }
  if let Some(min) = filter.min_price_cents {
    qb.push(" AND price_cents >= ").push_bind(min);
  }
  if let Some(max) = filter.max_price_cents {
    qb.push(" AND price_cents <= ").push_bind(max);
  }
  if let Some(term) = &filter.search {
    let pattern = format!("%{}%", escape_like(term));
    qb.push(" AND (name ILIKE ")
      .push_bind(pattern.clone())
      .push(" ESCAPE '\\' OR description ILIKE ")
      .push_bind(pattern)
      .push(" ESCAPE '\\')");
  }
  qb.push(" ORDER BY seq ASC");
  qb
}

fn rows_to_products(rows: Vec<ProductRow>) -> StorefrontResult<Vec<Product>> {
  rows.into_iter().map(Product::try_from).collect()
}

#[async_trait]
impl CatalogStore for PgStore {
  #[instrument(name = "pg_store::find_product_by_id", skip(self), fields(product_id = %id))]
  async fn find_product_by_id(&self, id: ProductId) -> StorefrontResult<Option<Product>> {
    let row: Option<ProductRow> = sqlx::query_as(&format!("SELECT {} FROM products WHERE id = $1", PRODUCT_COLUMNS))
      .bind(id.0)
      .fetch_optional(&self.pool)
      .await
      .map_err(unavailable("Failed to fetch product"))?;
    row.map(Product::try_from).transpose()
  }

  #[instrument(name = "pg_store::find_products_by_filter", skip(self))]
  async fn find_products_by_filter(&self, filter: &ProductFilter) -> StorefrontResult<Vec<Product>> {
    let mut qb = product_filter_query(filter);
    let rows: Vec<ProductRow> = qb
      .build_query_as::<ProductRow>()
      .fetch_all(&self.pool)
      .await
      .map_err(unavailable("Failed to query products"))?;
    debug!(matched = rows.len(), "Product filter query executed.");
    rows_to_products(rows)
  }

  async fn find_products_by_ids(&self, ids: &[ProductId]) -> StorefrontResult<Vec<Product>> {
    let raw: Vec<Uuid> = ids.iter().map(|id| id.0).collect();
    let rows: Vec<ProductRow> = sqlx::query_as(&format!("SELECT {} FROM products WHERE id = ANY($1)", PRODUCT_COLUMNS))
      .bind(raw)
      .fetch_all(&self.pool)
      .await
      .map_err(unavailable("Failed to resolve cart products"))?;
    rows_to_products(rows)
  }

  async fn count_products(&self) -> StorefrontResult<u64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
      .fetch_one(&self.pool)
      .await
      .map_err(unavailable("Failed to count products"))?;
    Ok(count.max(0) as u64)
  }

  #[instrument(name = "pg_store::insert_product", skip(self, product), fields(product_id = %product.id))]
  async fn insert_product(&self, product: &Product) -> StorefrontResult<()> {
    sqlx::query(
      "INSERT INTO products (id, name, price_cents, category, image, description, stock) VALUES ($1, $2, $3, $4, $5, $6, $7)",
    )
    .bind(product.id.0)
    .bind(&product.name)
    .bind(product.price_cents)
    .bind(product.category.as_str())
    .bind(&product.image)
    .bind(&product.description)
    .bind(product.stock)
    .execute(&self.pool)
    .await
    .map_err(unavailable("Failed to insert product"))?;
    Ok(())
  }
}

#[async_trait]
impl CartStore for PgStore {
  #[instrument(name = "pg_store::find_cart_by_user", skip(self), fields(user_id = %user_id))]
  async fn find_cart_by_user(&self, user_id: UserId) -> StorefrontResult<Option<Cart>> {
    let lines: Option<Json<Vec<CartLine>>> = sqlx::query_scalar("SELECT lines FROM carts WHERE user_id = $1")
      .bind(user_id.0)
      .fetch_optional(&self.pool)
      .await
      .map_err(unavailable("Failed to load cart"))?;
    Ok(lines.map(|Json(lines)| Cart::from_lines(user_id, lines)))
  }

  #[instrument(name = "pg_store::upsert_cart", skip(self, cart), fields(user_id = %cart.user_id(), lines = cart.lines().len()))]
  async fn upsert_cart(&self, cart: &Cart) -> StorefrontResult<()> {
    sqlx::query(
      r#"
      INSERT INTO carts (user_id, lines, updated_at)
      VALUES ($1, $2, NOW())
      ON CONFLICT (user_id) DO UPDATE
      SET lines = EXCLUDED.lines, updated_at = NOW()
      "#,
    )
    .bind(cart.user_id().0)
    .bind(Json(cart.lines()))
    .execute(&self.pool)
    .await
    .map_err(unavailable("Failed to save cart"))?;
    Ok(())
  }
}

#[async_trait]
impl UserStore for PgStore {
  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1")
      .bind(email)
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }

  async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1")
      .bind(id.0)
      .fetch_optional(&self.pool)
      .await?;
    Ok(user)
  }

  #[instrument(name = "pg_store::insert_user", skip(self, user), fields(user_id = %user.id), err(Display))]
  async fn insert_user(&self, user: &User) -> Result<()> {
    let result = sqlx::query("INSERT INTO users (id, name, email, password_hash, created_at) VALUES ($1, $2, $3, $4, $5)")
      .bind(user.id)
      .bind(&user.name)
      .bind(&user.email)
      .bind(&user.password_hash)
      .bind(user.created_at)
      .execute(&self.pool)
      .await;

    match result {
      Ok(_) => Ok(()),
      Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
        Err(AppError::Conflict(format!("Email {} is already registered.", user.email)))
      }
      Err(e) => Err(AppError::Sqlx(e)),
    }
  }

  async fn insert_session(&self, session: &Session) -> Result<()> {
    sqlx::query("INSERT INTO sessions (token, user_id, expires_at) VALUES ($1, $2, $3)")
      .bind(&session.token)
      .bind(session.user_id)
      .bind(session.expires_at)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn find_session(&self, token: &str) -> Result<Option<Session>> {
    let session = sqlx::query_as::<_, Session>("SELECT token, user_id, expires_at FROM sessions WHERE token = $1")
      .bind(token)
      .fetch_optional(&self.pool)
      .await?;
    Ok(session)
  }

  async fn delete_session(&self, token: &str) -> Result<()> {
    sqlx::query("DELETE FROM sessions WHERE token = $1")
      .bind(token)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn delete_expired_sessions(&self, user_id: UserId, now: DateTime<Utc>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1 AND expires_at <= $2")
      .bind(user_id.0)
      .bind(now)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected())
  }
}
