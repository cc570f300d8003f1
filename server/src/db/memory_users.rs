// storefront_server/src/db/memory_users.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use storefront::UserId;
use uuid::Uuid;

use super::UserStore;
use crate::errors::{AppError, Result};
use crate::models::{Session, User};

#[derive(Debug, Default)]
pub struct InMemoryUserStore {
  users: RwLock<HashMap<Uuid, User>>,
  sessions: RwLock<HashMap<String, Session>>,
}

impl InMemoryUserStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
  async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
    Ok(self.users.read().values().find(|u| u.email == email).cloned())
  }

  async fn find_user_by_id(&self, id: UserId) -> Result<Option<User>> {
    Ok(self.users.read().get(id.as_uuid()).cloned())
  }

  async fn insert_user(&self, user: &User) -> Result<()> {
    let mut users = self.users.write();
    if users.values().any(|u| u.email == user.email) {
      return Err(AppError::Conflict(format!("Email {} is already registered.", user.email)));
    }
    users.insert(user.id, user.clone());
    Ok(())
  }

  async fn insert_session(&self, session: &Session) -> Result<()> {
    self.sessions.write().insert(session.token.clone(), session.clone());
    Ok(())
  }

  async fn find_session(&self, token: &str) -> Result<Option<Session>> {
    Ok(self.sessions.read().get(token).cloned())
  }

  async fn delete_session(&self, token: &str) -> Result<()> {
    self.sessions.write().remove(token);
    Ok(())
  }

  async fn delete_expired_sessions(&self, user_id: UserId, now: DateTime<Utc>) -> Result<u64> {
    let mut sessions = self.sessions.write();
    let before = sessions.len();
    sessions.retain(|_, s| s.user_id != user_id.0 || !s.is_expired_at(now));
    Ok((before - sessions.len()) as u64)
  }
}
