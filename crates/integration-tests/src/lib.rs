//! Integration tests for Go Marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Cart store against the file backend, across restarts
//! - `cart_provider` - Scoped accessor wiring

use std::path::PathBuf;

use go_marketplace_cart::{CartConfig, CartStore, NewLineItem};
use go_marketplace_core::Price;
use tempfile::TempDir;

/// Scratch storage directory plus a config pointing into it.
///
/// The directory is deleted when the context is dropped.
pub struct TestContext {
    _dir: TempDir,
    pub config: CartConfig,
}

impl TestContext {
    /// Create a fresh context with an empty storage file location.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory cannot be created.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let config = CartConfig {
            storage_path: dir.path().join("device").join("storage.json"),
            ..CartConfig::default()
        };
        Self { _dir: dir, config }
    }

    /// Path of the storage file.
    #[must_use]
    pub fn storage_path(&self) -> PathBuf {
        self.config.storage_path.clone()
    }

    /// Open a new store over the context's storage, as a fresh process would.
    #[must_use]
    pub fn open_store(&self) -> CartStore {
        self.config.open_store()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A product with a readable title and image derived from `id`.
#[must_use]
pub fn product(id: &str, cents: i64) -> NewLineItem {
    NewLineItem::new(
        id,
        format!("Product {id}"),
        format!("https://cdn.example/{id}.png"),
        Price::from_cents(cents),
    )
}
