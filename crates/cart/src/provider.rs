//! Scoped access to the active cart store.
//!
//! Passing a [`CartStore`] handle explicitly is the primary API. For call
//! sites deep inside a task that cannot thread the handle through,
//! [`CartProvider::run`] installs a store for the duration of a future and
//! [`use_cart`] retrieves it. Calling [`use_cart`] anywhere else is a wiring
//! bug and fails with [`CartError::OutsideProvider`].

use std::future::Future;

use crate::error::{CartError, Result};
use crate::store::CartStore;

tokio::task_local! {
    static ACTIVE_CART: CartStore;
}

/// Makes a [`CartStore`] available to [`use_cart`] within a scope.
#[derive(Debug, Clone)]
pub struct CartProvider {
    store: CartStore,
}

impl CartProvider {
    #[must_use]
    pub const fn new(store: CartStore) -> Self {
        Self { store }
    }

    /// The provided store.
    #[must_use]
    pub const fn store(&self) -> &CartStore {
        &self.store
    }

    /// Hydrate the store, then run `f` with the store active.
    ///
    /// # Errors
    ///
    /// Returns the load error if the store cannot be hydrated; `f` is not run.
    pub async fn run<F: Future>(&self, f: F) -> Result<F::Output> {
        self.store.load().await?;
        Ok(ACTIVE_CART.scope(self.store.clone(), f).await)
    }

    /// Run a synchronous closure with the store active, without hydrating.
    pub fn run_sync<R>(&self, f: impl FnOnce() -> R) -> R {
        ACTIVE_CART.sync_scope(self.store.clone(), f)
    }
}

/// The store installed by the enclosing [`CartProvider`].
///
/// # Errors
///
/// Returns `CartError::OutsideProvider` when no provider is active.
pub fn use_cart() -> Result<CartStore> {
    ACTIVE_CART
        .try_with(CartStore::clone)
        .map_err(|_| CartError::OutsideProvider)
}
