//! The cart store: in-memory cart mirrored to key-value storage.
//!
//! # Consistency
//!
//! Every operation goes through `CartStore::mutate`, which takes the state
//! lock, applies a reducer to the *current* cart, writes the whole cart to
//! storage and only then releases the lock. Operations issued from clones of
//! the same store therefore serialize: each one sees the result of the one
//! before it, and storage receives writes in the same order as the mutations.
//!
//! # Hydration
//!
//! The cart starts empty and is hydrated from storage by [`CartStore::load`].
//! Mutations hydrate first if `load` has not run yet, so an early write can
//! never clobber a stored cart with an empty one.

use std::sync::Arc;

use go_marketplace_core::{Price, ProductId};
use tokio::sync::{Mutex, OnceCell};
use tracing::instrument;

use crate::cart::{Cart, CartChange};
use crate::error::{CartError, Result};
use crate::item::{LineItem, NewLineItem};
use crate::storage::KeyValueStorage;

/// Storage key the cart is persisted under.
pub const STORAGE_KEY: &str = "@GoMarketplace:products";

/// Shopping cart store.
///
/// This struct is cheaply cloneable via `Arc`; all clones share one cart and
/// one storage backend.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<CartStoreInner>,
}

struct CartStoreInner {
    storage: Arc<dyn KeyValueStorage>,
    key: String,
    cart: Mutex<Cart>,
    loaded: OnceCell<()>,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("key", &self.inner.key)
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Create a store persisting under [`STORAGE_KEY`].
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        Self::with_key(storage, STORAGE_KEY)
    }

    /// Create a store persisting under a custom key.
    #[must_use]
    pub fn with_key(storage: Arc<dyn KeyValueStorage>, key: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(CartStoreInner {
                storage,
                key: key.into(),
                cart: Mutex::new(Cart::new()),
                loaded: OnceCell::new(),
            }),
        }
    }

    /// Storage key this store persists under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.inner.key
    }

    /// Whether the cart has been hydrated from storage.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.inner.loaded.initialized()
    }

    /// Hydrate the cart from storage.
    ///
    /// Runs at most once per store; later calls return the current snapshot
    /// without touching storage. A failed load leaves the store unloaded.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the backend read fails, or
    /// `CartError::Corrupt` if the stored value is not a valid cart.
    pub async fn load(&self) -> Result<Vec<LineItem>> {
        self.ensure_loaded().await?;
        Ok(self.products().await)
    }

    /// Snapshot of the current line items.
    pub async fn products(&self) -> Vec<LineItem> {
        self.inner.cart.lock().await.items().to_vec()
    }

    /// Snapshot of the current cart.
    pub async fn cart(&self) -> Cart {
        self.inner.cart.lock().await.clone()
    }

    /// Total number of units in the cart.
    pub async fn item_count(&self) -> u64 {
        self.inner.cart.lock().await.item_count()
    }

    /// Sum of line totals in the cart, or `None` if it overflows.
    pub async fn subtotal(&self) -> Option<Price> {
        self.inner.cart.lock().await.subtotal()
    }

    /// Add one unit of `product`, appending a new line if it isn't in the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if hydrating or persisting the cart fails. The
    /// in-memory cart keeps the change even when persisting fails.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(&self, product: NewLineItem) -> Result<CartChange> {
        self.mutate(|cart| cart.add(product)).await
    }

    /// Add one unit to the line for `id`. Unknown ids leave the cart unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if hydrating or persisting the cart fails.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn increment(&self, id: &ProductId) -> Result<CartChange> {
        self.mutate(|cart| cart.increment(id)).await
    }

    /// Remove one unit from the line for `id`, dropping the line when its last
    /// unit goes. Unknown ids leave the cart unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if hydrating or persisting the cart fails.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn decrement(&self, id: &ProductId) -> Result<CartChange> {
        self.mutate(|cart| cart.decrement(id)).await
    }

    /// Apply `update` to the current cart and persist the result.
    ///
    /// The cart is written on every call, whatever the reducer did.
    async fn mutate<F>(&self, update: F) -> Result<CartChange>
    where
        F: FnOnce(&mut Cart) -> CartChange,
    {
        self.ensure_loaded().await?;

        let mut cart = self.inner.cart.lock().await;
        let change = update(&mut cart);
        tracing::debug!(?change, lines = cart.len(), "Cart updated");

        if let Err(e) = self.persist(&cart).await {
            tracing::error!(error = %e, key = %self.inner.key, "Failed to persist cart");
            return Err(e);
        }

        Ok(change)
    }

    async fn persist(&self, cart: &Cart) -> Result<()> {
        let value = serde_json::to_string(cart).map_err(CartError::Serialize)?;
        self.inner
            .storage
            .set_item(&self.inner.key, &value)
            .await?;
        Ok(())
    }

    async fn ensure_loaded(&self) -> Result<()> {
        self.inner
            .loaded
            .get_or_try_init(|| self.hydrate())
            .await
            .map(|_| ())
    }

    #[instrument(skip(self), fields(key = %self.inner.key))]
    async fn hydrate(&self) -> Result<()> {
        let Some(raw) = self.inner.storage.get_item(&self.inner.key).await? else {
            tracing::info!("No stored cart, starting empty");
            return Ok(());
        };

        let mut stored: Cart = serde_json::from_str(&raw).map_err(CartError::Corrupt)?;
        let dropped = stored.normalize();
        if dropped > 0 {
            tracing::warn!(dropped, "Dropped invalid lines from stored cart");
        }

        tracing::info!(lines = stored.len(), "Loaded stored cart");
        *self.inner.cart.lock().await = stored;
        Ok(())
    }
}
