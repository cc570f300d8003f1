// storefront_server/src/config.rs

use crate::errors::{AppError, Result};
use actix_web::http::Uri;
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// One hundred years.
pub const MAX_SESSION_TTL_HOURS: i64 = 24 * 365 * 100;

pub const DEFAULT_CORS_ALLOWED_ORIGINS: &str = "http://localhost:3000";

/// Where catalog, carts and users are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
  Postgres,
  /// Process-local; everything is lost on restart.
  Memory,
}

impl FromStr for StoreBackend {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "postgres" | "postgresql" | "pg" => Ok(StoreBackend::Postgres),
      "memory" | "in-memory" | "inmemory" => Ok(StoreBackend::Memory),
      other => Err(AppError::Config(format!(
        "Invalid STORE_BACKEND '{}': expected 'postgres' or 'memory'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub store_backend: StoreBackend,
  /// Required when `store_backend` is Postgres.
  pub database_url: Option<String>,
  pub database_max_connections: u32,
  pub seed_db: bool,
  pub session_ttl_hours: i64,
  /// Browser origins allowed to call the API cross-origin.
  pub cors_allowed_origins: Vec<String>,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      server_host: "127.0.0.1".to_string(),
      server_port: 8080,
      store_backend: StoreBackend::Postgres,
      database_url: None,
      database_max_connections: 5,
      seed_db: false,
      session_ttl_hours: 24,
      cors_allowed_origins: vec![DEFAULT_CORS_ALLOWED_ORIGINS.to_string()],
    }
  }
}

/// Comma-separated list of absolute http(s) origins; blanks are skipped.
fn parse_origins(raw: &str) -> Result<Vec<String>> {
  raw
    .split(',')
    .map(str::trim)
    .filter(|origin| !origin.is_empty())
    .map(|origin| {
      let uri: Uri = origin
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid CORS origin '{}': {}", origin, e)))?;
      let scheme_ok = matches!(uri.scheme_str(), Some("http") | Some("https"));
      if !scheme_ok || uri.host().is_none() {
        return Err(AppError::Config(format!(
          "Invalid CORS origin '{}': expected scheme://host[:port]",
          origin
        )));
      }
      Ok(origin.trim_end_matches('/').to_string())
    })
    .collect()
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source. `from_env` passes the
  /// process environment; tests pass a map.
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let get_or = |name: &str, default: &str| lookup(name).unwrap_or_else(|| default.to_string());

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = get_or("SERVER_PORT", "8080")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let store_backend: StoreBackend = get_or("STORE_BACKEND", "postgres").parse()?;
    let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());
    if store_backend == StoreBackend::Postgres && database_url.is_none() {
      return Err(AppError::Config(
        "Missing environment variable 'DATABASE_URL' (required for the postgres backend)".to_string(),
      ));
    }
    let database_max_connections = get_or("DATABASE_MAX_CONNECTIONS", "5")
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;
    let seed_db = get_or("SEED_DB", "false")
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;
    let session_ttl_hours = get_or("SESSION_TTL_HOURS", "24")
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid SESSION_TTL_HOURS: {}", e)))?;
    if !(1..=MAX_SESSION_TTL_HOURS).contains(&session_ttl_hours) {
      return Err(AppError::Config(format!(
        "SESSION_TTL_HOURS must be between 1 and {}",
        MAX_SESSION_TTL_HOURS
      )));
    }
    let cors_allowed_origins = parse_origins(&get_or("CORS_ALLOWED_ORIGINS", DEFAULT_CORS_ALLOWED_ORIGINS))?;

    tracing::info!(
      backend = ?store_backend,
      host = %server_host,
      port = server_port,
      seed_db,
      cors_origins = ?cors_allowed_origins,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      server_host,
      server_port,
      store_backend,
      database_url,
      database_max_connections,
      seed_db,
      session_ttl_hours,
      cors_allowed_origins,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashMap;

  fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |name| map.get(name).cloned()
  }

  #[test]
  fn memory_backend_needs_no_database_url() {
    let cfg = AppConfig::from_lookup(lookup(&[("STORE_BACKEND", "memory"), ("SEED_DB", "true")])).unwrap();
    assert_eq!(cfg.store_backend, StoreBackend::Memory);
    assert!(cfg.seed_db);
    assert_eq!(cfg.bind_address(), "127.0.0.1:8080");
  }

  #[test]
  fn postgres_backend_requires_database_url() {
    let err = AppConfig::from_lookup(lookup(&[])).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));

    let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/shop")])).unwrap();
    assert_eq!(cfg.store_backend, StoreBackend::Postgres);
  }

  #[test]
  fn defaults_agree_with_an_empty_environment() {
    let defaults = AppConfig::default();
    let cfg = AppConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/shop")])).unwrap();
    assert_eq!(cfg.store_backend, defaults.store_backend);
    assert_eq!(cfg.bind_address(), defaults.bind_address());
    assert_eq!(cfg.database_max_connections, defaults.database_max_connections);
    assert_eq!(cfg.seed_db, defaults.seed_db);
    assert_eq!(cfg.session_ttl_hours, defaults.session_ttl_hours);
    assert_eq!(cfg.cors_allowed_origins, defaults.cors_allowed_origins);
  }

  #[test]
  fn session_ttl_upper_bound_is_inclusive() {
    let max = MAX_SESSION_TTL_HOURS.to_string();
    let cfg = AppConfig::from_lookup(lookup(&[("STORE_BACKEND", "memory"), ("SESSION_TTL_HOURS", max.as_str())])).unwrap();
    assert_eq!(cfg.session_ttl_hours, MAX_SESSION_TTL_HOURS);

    let over = (MAX_SESSION_TTL_HOURS + 1).to_string();
    let err = AppConfig::from_lookup(lookup(&[("STORE_BACKEND", "memory"), ("SESSION_TTL_HOURS", over.as_str())])).unwrap_err();
    assert!(matches!(err, AppError::Config(_)));
  }

  #[test]
  fn cors_origins_are_split_and_validated() {
    let cfg = AppConfig::from_lookup(lookup(&[
      ("STORE_BACKEND", "memory"),
      ("CORS_ALLOWED_ORIGINS", " http://localhost:3000, https://shop.example.com/ ,"),
    ]))
    .unwrap();
    assert_eq!(
      cfg.cors_allowed_origins,
      vec!["http://localhost:3000", "https://shop.example.com"]
    );

    let cfg = AppConfig::from_lookup(lookup(&[("STORE_BACKEND", "memory"), ("CORS_ALLOWED_ORIGINS", "")])).unwrap();
    assert!(cfg.cors_allowed_origins.is_empty());

    for bad in ["*", "localhost:3000", "ftp://files.example.com"] {
      let err = AppConfig::from_lookup(lookup(&[("STORE_BACKEND", "memory"), ("CORS_ALLOWED_ORIGINS", bad)])).unwrap_err();
      assert!(matches!(err, AppError::Config(_)), "{}", bad);
    }
  }

  #[test]
  fn rejects_malformed_values() {
    for pairs in [
      vec![("STORE_BACKEND", "memory"), ("SERVER_PORT", "eighty")],
      vec![("STORE_BACKEND", "mongo")],
      vec![("STORE_BACKEND", "memory"), ("SEED_DB", "yes")],
      vec![("STORE_BACKEND", "memory"), ("SESSION_TTL_HOURS", "0")],
      vec![("STORE_BACKEND", "memory"), ("SESSION_TTL_HOURS", "5000000000")],
      vec![("STORE_BACKEND", "memory"), ("SESSION_TTL_HOURS", "3000000000000")],
    ] {
      assert!(AppConfig::from_lookup(lookup(&pairs)).is_err(), "{:?}", pairs);
    }
  }
}
