// storefront/src/error.rs
use thiserror::Error;

/// Stable, machine-readable classification of a [`StorefrontError`].
///
/// Transport layers map these to status codes; clients match on `as_str()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  NotFound,
  InvalidArgument,
  Unavailable,
}

impl ErrorKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      ErrorKind::NotFound => "not_found",
      ErrorKind::InvalidArgument => "invalid_argument",
      ErrorKind::Unavailable => "unavailable",
    }
  }
}

impl std::fmt::Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Error)]
pub enum StorefrontError {
  #[error("Product not found: {product_id}")]
  ProductNotFound { product_id: String },

  #[error("No cart exists for user {user_id}")]
  CartNotFound { user_id: String },

  #[error("Product {product_id} is not in the cart")]
  CartLineNotFound { product_id: String },

  #[error("Invalid {field}: {message}")]
  InvalidArgument { field: &'static str, message: String },

  #[error("Storage unavailable: {message}")]
  Unavailable {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
  },
}

impl StorefrontError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      StorefrontError::ProductNotFound { .. }
      | StorefrontError::CartNotFound { .. }
      | StorefrontError::CartLineNotFound { .. } => ErrorKind::NotFound,
      StorefrontError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
      StorefrontError::Unavailable { .. } => ErrorKind::Unavailable,
    }
  }

  pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
    StorefrontError::InvalidArgument {
      field,
      message: message.into(),
    }
  }

  /// Wraps a storage driver failure. The driver error is kept as the source
  /// so it shows up in logs but never in the message.
  pub fn unavailable<E>(message: impl Into<String>, source: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    StorefrontError::Unavailable {
      message: message.into(),
      source: Some(Box::new(source)),
    }
  }
}

pub type StorefrontResult<T, E = StorefrontError> = std::result::Result<T, E>;
