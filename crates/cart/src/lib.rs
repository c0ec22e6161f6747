//! Go Marketplace Cart - Shopping cart store with local persistence.
//!
//! Holds the cart's line items in memory, mirrors them to an asynchronous
//! key-value store after every change, and hydrates them back on startup.
//!
//! # Architecture
//!
//! - [`Cart`] - Pure collection with the add/increment/decrement rules
//! - [`CartStore`] - Shared handle applying those rules under a lock and persisting
//! - [`KeyValueStorage`] - Storage seam, with [`MemoryStorage`] and [`FileStorage`]
//! - [`CartProvider`] / [`use_cart`] - Scoped access for code that can't take a handle
//! - [`CartConfig`] - Environment-driven configuration
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use go_marketplace_cart::{CartStore, MemoryStorage, NewLineItem};
//! use go_marketplace_core::{Price, ProductId};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), go_marketplace_cart::CartError> {
//! let store = CartStore::new(Arc::new(MemoryStorage::new()));
//! store.load().await?;
//!
//! store
//!     .add_to_cart(NewLineItem::new("A", "T", "u", Price::from(10_u32)))
//!     .await?;
//! store.increment(&ProductId::new("A")).await?;
//!
//! assert_eq!(store.products().await[0].quantity, 2);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod config;
pub mod error;
pub mod item;
pub mod provider;
pub mod storage;
pub mod store;

pub use cart::{Cart, CartChange};
pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use item::{LineItem, NewLineItem};
pub use provider::{CartProvider, use_cart};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use store::{CartStore, STORAGE_KEY};
