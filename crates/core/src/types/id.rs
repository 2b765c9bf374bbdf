//! Newtype IDs for type-safe entity references.
//!
//! Cart and catalog entries are addressed by string product ids (the widget
//! historically generated ids like `p-48213`), so [`ProductId`] wraps a
//! `String`. Database-backed users keep the integer [`UserId`] wrapper.

use core::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a catalog product and of the cart line it produces.
///
/// Stable per distinct product and unique within a cart. Any non-empty string
/// is a valid id; ids for newly created products are generated via
/// [`ProductId::generate`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id from an existing string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh `p-` prefixed id for a newly created product.
    #[must_use]
    pub fn generate() -> Self {
        Self(format!("p-{}", Uuid::new_v4()))
    }

    /// Get the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the id and return its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ProductId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

/// Identifier of a registered storefront user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Create a new user id from an i32 value.
    #[must_use]
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Get the underlying i32 value.
    #[must_use]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for UserId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<UserId> for i32 {
    fn from(id: UserId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_product_ids_are_prefixed_and_distinct() {
        let a = ProductId::generate();
        let b = ProductId::generate();
        assert!(a.as_str().starts_with("p-"));
        assert_ne!(a, b);
    }

    #[test]
    fn product_id_round_trips_through_string() {
        let id = ProductId::new("p-123");
        assert_eq!(id.to_string(), "p-123");
        assert_eq!(String::from(id), "p-123");
    }
}
