//! Asynchronous key-value string storage.
//!
//! The cart persists itself as a single string under a fixed key. Backends
//! only need to get and set strings; they never see cart types.
//!
//! # Backends
//!
//! - [`MemoryStorage`] - In-process map, for tests and throwaway sessions
//! - [`FileStorage`] - JSON document on disk, the device-local store

use async_trait::async_trait;
use thiserror::Error;

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Errors raised by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing document could not be encoded or decoded.
    #[error("Storage encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Any other backend-specific failure.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// An asynchronous string store addressed by key.
///
/// Implementations must be thread-safe (`Send + Sync`) so one backend can be
/// shared by every clone of a [`CartStore`](crate::CartStore).
#[async_trait]
pub trait KeyValueStorage: Send + Sync {
    /// Read the value stored under `key`, or `None` if there is none.
    async fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    async fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
