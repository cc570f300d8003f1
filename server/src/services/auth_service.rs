// storefront_server/src/services/auth_service.rs

//! Registration, login and bearer-token resolution.

use argon2::{
  password_hash::{
    rand_core::{OsRng, RngCore},
    PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
  },
  Argon2,
};
use chrono::{Duration, Utc};
use std::fmt::Write as _;
use std::sync::Arc;
use storefront::UserId;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

use crate::db::UserStore;
use crate::errors::AppError;
use crate::models::{Session, User};

pub const MIN_PASSWORD_LEN: usize = 6;
const TOKEN_BYTES: usize = 32;

/// Hashes a plain-text password using Argon2 with a random salt.
#[instrument(name = "auth_service::hash_password", skip(password), err(Display))]
pub fn hash_password(password: &str) -> Result<String, AppError> {
  if password.is_empty() {
    error!("Password hashing failed: Password cannot be empty.");
    return Err(AppError::Validation("Password cannot be empty.".to_string()));
  }

  let salt = SaltString::generate(&mut OsRng);
  Argon2::default()
    .hash_password(password.as_bytes(), &salt)
    .map(|hash| hash.to_string())
    .map_err(|argon_err| {
      error!(error = %argon_err, "Argon2 password hashing failed.");
      AppError::Internal(format!("Password hashing process failed: {}", argon_err))
    })
}

/// Verifies a plain-text password against a stored Argon2 hash.
///
/// Returns `Ok(false)` on mismatch; errors only for an unreadable stored hash.
#[instrument(name = "auth_service::verify_password", skip(hashed_password_str, provided_password), err(Display))]
pub fn verify_password(hashed_password_str: &str, provided_password: &str) -> Result<bool, AppError> {
  if provided_password.is_empty() {
    return Ok(false);
  }

  let parsed_hash = PasswordHash::new(hashed_password_str).map_err(|parse_err| {
    error!(error = %parse_err, "Failed to parse stored password hash string.");
    AppError::Internal(format!("Invalid stored password hash format: {}", parse_err))
  })?;

  match Argon2::default().verify_password(provided_password.as_bytes(), &parsed_hash) {
    Ok(()) => Ok(true),
    Err(argon2::password_hash::Error::Password) => {
      debug!("Password verification failed: Passwords do not match.");
      Ok(false)
    }
    Err(other_argon_err) => {
      error!(error = %other_argon_err, "Argon2 password verification process encountered an error.");
      Err(AppError::Internal(format!(
        "Password verification process failed: {}",
        other_argon_err
      )))
    }
  }
}

/// Opaque hex token from the OS RNG.
pub fn generate_session_token() -> String {
  let mut bytes = [0u8; TOKEN_BYTES];
  OsRng.fill_bytes(&mut bytes);
  bytes.iter().fold(String::with_capacity(TOKEN_BYTES * 2), |mut out, b| {
    let _ = write!(out, "{:02x}", b);
    out
  })
}

pub fn normalize_email(email: &str) -> Result<String, AppError> {
  let email = email.trim().to_lowercase();
  let valid = match email.split_once('@') {
    Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
    None => false,
  };
  if !valid {
    return Err(AppError::Validation("A valid email is required.".to_string()));
  }
  Ok(email)
}

/// A freshly authenticated user with the session issued for them.
#[derive(Debug, Clone)]
pub struct SignedIn {
  pub user: User,
  pub session: Session,
}

#[derive(Clone)]
pub struct AuthService {
  users: Arc<dyn UserStore>,
  session_ttl: Duration,
}

impl AuthService {
  /// Fails with `AppError::Config` when the TTL is not a positive
  /// representable number of hours.
  pub fn new(users: Arc<dyn UserStore>, session_ttl_hours: i64) -> Result<Self, AppError> {
    let session_ttl = Duration::try_hours(session_ttl_hours)
      .filter(|ttl| *ttl > Duration::zero())
      .ok_or_else(|| AppError::Config(format!("Session TTL of {} hours is out of range", session_ttl_hours)))?;
    Ok(Self { users, session_ttl })
  }

  /// Creates the account and signs it in.
  #[instrument(name = "auth_service::register", skip(self, name, password), err(Display))]
  pub async fn register(&self, name: &str, email: &str, password: &str) -> Result<SignedIn, AppError> {
    let name = name.trim();
    if name.is_empty() {
      return Err(AppError::Validation("Name is required.".to_string()));
    }
    let email = normalize_email(email)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
      return Err(AppError::Validation(format!(
        "Password must be at least {} characters.",
        MIN_PASSWORD_LEN
      )));
    }

    let user = User {
      id: Uuid::new_v4(),
      name: name.to_string(),
      email,
      password_hash: hash_password(password)?,
      created_at: Utc::now(),
    };
    self.users.insert_user(&user).await?;
    info!(user_id = %user.id, "User registered.");

    let session = self.issue_session(&user).await?;
    Ok(SignedIn { user, session })
  }

  /// Unknown email and wrong password fail identically.
  #[instrument(name = "auth_service::login", skip(self, password), err(Display))]
  pub async fn login(&self, email: &str, password: &str) -> Result<SignedIn, AppError> {
    let invalid = || AppError::Auth("Invalid email or password.".to_string());
    let email = normalize_email(email).map_err(|_| invalid())?;

    let user = self.users.find_user_by_email(&email).await?.ok_or_else(|| {
      warn!("Login attempt for unknown email.");
      invalid()
    })?;
    if !verify_password(&user.password_hash, password)? {
      warn!(user_id = %user.id, "Login attempt with wrong password.");
      return Err(invalid());
    }

    let session = self.issue_session(&user).await?;
    info!(user_id = %user.id, "User signed in.");
    Ok(SignedIn { user, session })
  }

  /// Resolves a bearer token to its user.
  pub async fn authenticate(&self, token: &str) -> Result<UserId, AppError> {
    let session = self
      .users
      .find_session(token)
      .await?
      .ok_or_else(|| AppError::Auth("Invalid or expired session token.".to_string()))?;
    if session.is_expired_at(Utc::now()) {
      debug!(user_id = %session.user_id, "Session token expired; deleting it.");
      self.users.delete_session(token).await?;
      return Err(AppError::Auth("Invalid or expired session token.".to_string()));
    }
    Ok(UserId(session.user_id))
  }

  pub async fn current_user(&self, user_id: UserId) -> Result<User, AppError> {
    self
      .users
      .find_user_by_id(user_id)
      .await?
      .ok_or_else(|| AppError::NotFound(format!("User {} not found.", user_id)))
  }

  /// Also prunes the user's expired sessions.
  async fn issue_session(&self, user: &User) -> Result<Session, AppError> {
    let now = Utc::now();
    let expires_at = now
      .checked_add_signed(self.session_ttl)
      .ok_or_else(|| AppError::Internal("Session expiry is out of range.".to_string()))?;

    let pruned = self.users.delete_expired_sessions(user.user_id(), now).await?;
    if pruned > 0 {
      debug!(user_id = %user.id, pruned, "Expired sessions removed.");
    }

    let session = Session {
      token: generate_session_token(),
      user_id: user.id,
      expires_at,
    };
    self.users.insert_session(&session).await?;
    Ok(session)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::db::InMemoryUserStore;

  fn service() -> AuthService {
    AuthService::new(Arc::new(InMemoryUserStore::new()), 24).unwrap()
  }

  #[test]
  fn hash_then_verify() {
    let hash = hash_password("hunter22").unwrap();
    assert!(verify_password(&hash, "hunter22").unwrap());
    assert!(!verify_password(&hash, "hunter23").unwrap());
    assert!(!verify_password(&hash, "").unwrap());
    assert!(hash_password("").is_err());
  }

  #[test]
  fn session_tokens_are_long_and_distinct() {
    let (a, b) = (generate_session_token(), generate_session_token());
    assert_eq!(a.len(), TOKEN_BYTES * 2);
    assert_ne!(a, b);
  }

  #[test]
  fn normalize_email_lowercases_and_validates() {
    assert_eq!(normalize_email("  Ada@Example.COM ").unwrap(), "ada@example.com");
    assert!(normalize_email("ada").is_err());
    assert!(normalize_email("@example.com").is_err());
    assert!(normalize_email("ada@localhost").is_err());
  }

  #[tokio::test]
  async fn register_login_authenticate() {
    let auth = service();
    let signed_up = auth.register("Ada", "ada@example.com", "secret1").await.unwrap();
    assert_eq!(
      auth.authenticate(&signed_up.session.token).await.unwrap(),
      signed_up.user.user_id()
    );

    let signed_in = auth.login("ADA@example.com", "secret1").await.unwrap();
    assert_eq!(signed_in.user.id, signed_up.user.id);
    assert_ne!(signed_in.session.token, signed_up.session.token);

    assert!(matches!(auth.login("ada@example.com", "wrong!!").await, Err(AppError::Auth(_))));
    assert!(matches!(auth.login("bob@example.com", "secret1").await, Err(AppError::Auth(_))));
    assert!(matches!(auth.authenticate("nope").await, Err(AppError::Auth(_))));
  }

  #[tokio::test]
  async fn register_rejects_duplicates_and_weak_input() {
    let auth = service();
    auth.register("Ada", "ada@example.com", "secret1").await.unwrap();
    assert!(matches!(
      auth.register("Ada Again", "Ada@Example.com", "secret1").await,
      Err(AppError::Conflict(_))
    ));
    assert!(matches!(
      auth.register("", "x@example.com", "secret1").await,
      Err(AppError::Validation(_))
    ));
    assert!(matches!(
      auth.register("Bo", "bo@example.com", "short").await,
      Err(AppError::Validation(_))
    ));
  }

  fn stale_session(token: &str, user_id: Uuid) -> Session {
    Session {
      token: token.to_string(),
      user_id,
      expires_at: Utc::now() - Duration::minutes(1),
    }
  }

  #[tokio::test]
  async fn expired_sessions_are_rejected_and_deleted() {
    let store = Arc::new(InMemoryUserStore::new());
    let auth = AuthService::new(store.clone(), 24).unwrap();
    let signed_up = auth.register("Ada", "ada@example.com", "secret1").await.unwrap();

    store.insert_session(&stale_session("stale-token", signed_up.user.id)).await.unwrap();
    assert!(matches!(auth.authenticate("stale-token").await, Err(AppError::Auth(_))));
    assert!(store.find_session("stale-token").await.unwrap().is_none());
    assert!(store.find_session(&signed_up.session.token).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn login_prunes_only_the_users_expired_sessions() {
    let store = Arc::new(InMemoryUserStore::new());
    let auth = AuthService::new(store.clone(), 24).unwrap();
    let ada = auth.register("Ada", "ada@example.com", "secret1").await.unwrap();
    let bob = auth.register("Bob", "bob@example.com", "secret1").await.unwrap();

    store.insert_session(&stale_session("ada-old", ada.user.id)).await.unwrap();
    store.insert_session(&stale_session("bob-old", bob.user.id)).await.unwrap();

    auth.login("ada@example.com", "secret1").await.unwrap();
    assert!(store.find_session("ada-old").await.unwrap().is_none());
    assert!(store.find_session(&ada.session.token).await.unwrap().is_some());
    assert!(store.find_session("bob-old").await.unwrap().is_some());
  }

  #[test]
  fn out_of_range_ttl_is_a_config_error() {
    let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
    for hours in [0, -1, 3_000_000_000_000, i64::MAX] {
      assert!(
        matches!(AuthService::new(users.clone(), hours), Err(AppError::Config(_))),
        "{}",
        hours
      );
    }
  }

  #[tokio::test]
  async fn largest_configured_ttl_issues_sessions() {
    let auth = AuthService::new(Arc::new(InMemoryUserStore::new()), crate::config::MAX_SESSION_TTL_HOURS).unwrap();
    let signed_up = auth.register("Ada", "ada@example.com", "secret1").await.unwrap();
    assert!(signed_up.session.expires_at > Utc::now());
  }
}
