// storefront_server/src/db/mod.rs

//! Storage adapters: PostgreSQL for everything, plus the in-memory user
//! store paired with `storefront::InMemoryStore` for the memory backend.

pub mod memory_users;
pub mod pg_store;
pub mod seed;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use storefront::UserId;

use crate::errors::Result;
use crate::models::{Session, User};

pub use memory_users::InMemoryUserStore;
pub use pg_store::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
  /// `email` is matched as given; callers normalize it first.
  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;

  async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>>;

  /// Fails with `AppError::Conflict` when the email is taken.
  async fn insert_user(&self, user: &User) -> Result<()>;

  async fn insert_session(&self, session: &Session) -> Result<()>;

  async fn find_session(&self, token: &str) -> Result<Option<Session>>;

  /// Deleting an unknown token is not an error.
  async fn delete_session(&self, token: &str) -> Result<()>;

  /// Drops the user's sessions that expired at or before `now`; returns how many.
  async fn delete_expired_sessions(&self, user_id: UserId, now: DateTime<Utc>) -> Result<u64>;
}
