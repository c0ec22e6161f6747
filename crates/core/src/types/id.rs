//! Newtype IDs for type-safe product references.
//!
//! Product identifiers are opaque strings assigned by the catalog. The cart
//! never inspects them beyond equality, so no format validation happens here.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier of a catalog product.
///
/// Serialized as a bare JSON string (`#[serde(transparent)]`).
///
/// # Example
///
/// ```rust
/// # use go_marketplace_core::ProductId;
/// let id = ProductId::new("1234");
/// assert_eq!(id.as_str(), "1234");
/// assert_eq!(id, "1234");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Create a new ID from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the underlying string value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
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

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ProductId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ProductId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let id = ProductId::new("abc-123");
        assert_eq!(format!("{id}"), "abc-123");
    }

    #[test]
    fn test_serializes_as_bare_string() {
        let id = ProductId::new("abc-123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc-123\"");

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_conversions() {
        let from_str: ProductId = "a".into();
        let from_string: ProductId = String::from("a").into();
        assert_eq!(from_str, from_string);
        assert_eq!(String::from(from_str), "a");
    }

    #[test]
    fn test_compares_with_str() {
        let id = ProductId::new("a");
        assert_eq!(id, "a");
        assert_ne!(id, "b");
    }
}
