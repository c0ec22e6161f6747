//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `GO_MARKETPLACE_STORAGE_PATH` - Storage file (default: `.go-marketplace/storage.json`)
//! - `GO_MARKETPLACE_STORAGE_KEY` - Key the cart is stored under (default: `@GoMarketplace:products`)

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::storage::FileStorage;
use crate::store::{CartStore, STORAGE_KEY};

const STORAGE_PATH_VAR: &str = "GO_MARKETPLACE_STORAGE_PATH";
const STORAGE_KEY_VAR: &str = "GO_MARKETPLACE_STORAGE_KEY";
const DEFAULT_STORAGE_PATH: &str = ".go-marketplace/storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart store configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// File backing the device-local key-value store
    pub storage_path: PathBuf,
    /// Key the serialized cart is stored under
    pub storage_key: String,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_path: PathBuf::from(DEFAULT_STORAGE_PATH),
            storage_key: STORAGE_KEY.to_string(),
        }
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let storage_path = lookup(STORAGE_PATH_VAR)
            .map_or_else(|| PathBuf::from(DEFAULT_STORAGE_PATH), PathBuf::from);
        if storage_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                STORAGE_PATH_VAR.to_string(),
                "must not be empty".to_string(),
            ));
        }

        let storage_key = lookup(STORAGE_KEY_VAR).unwrap_or_else(|| STORAGE_KEY.to_string());
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                STORAGE_KEY_VAR.to_string(),
                "must not be empty".to_string(),
            ));
        }

        Ok(Self {
            storage_path,
            storage_key,
        })
    }

    /// Open a cart store over file storage at the configured path.
    #[must_use]
    pub fn open_store(&self) -> CartStore {
        let storage = Arc::new(FileStorage::new(&self.storage_path));
        CartStore::with_key(storage, &self.storage_key)
    }
}
