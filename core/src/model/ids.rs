// storefront/src/model/ids.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::StorefrontError;

macro_rules! uuid_id {
  ($(#[$meta:meta])* $name:ident, $field:literal) => {
    $(#[$meta])*
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct $name(pub Uuid);

    impl $name {
      pub fn new() -> Self {
        Self(Uuid::new_v4())
      }

      pub fn as_uuid(&self) -> &Uuid {
        &self.0
      }
    }

    impl Default for $name {
      fn default() -> Self {
        Self::new()
      }
    }

    impl From<Uuid> for $name {
      fn from(id: Uuid) -> Self {
        Self(id)
      }
    }

    impl fmt::Display for $name {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
      }
    }

    impl FromStr for $name {
      type Err = StorefrontError;

      fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
          .map(Self)
          .map_err(|e| StorefrontError::invalid($field, format!("'{}' is not a valid id: {}", s, e)))
      }
    }
  };
}

uuid_id!(
  /// Identity of a catalog product.
  ProductId,
  "product id"
);

uuid_id!(
  /// Opaque identity of the user owning a cart. Supplied by authentication.
  UserId,
  "user id"
);
