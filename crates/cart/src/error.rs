//! Cart store errors.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by cart store operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// `use_cart` was called with no active provider.
    #[error("use_cart must be used within a CartProvider")]
    OutsideProvider,

    /// The storage backend failed to read or write.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The stored value is not a valid cart.
    #[error("Stored cart is corrupt: {0}")]
    Corrupt(#[source] serde_json::Error),

    /// The cart could not be serialized.
    #[error("Failed to serialize cart: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;
