//! Cart commands.
//!
//! Each command opens the store described by [`CartConfig`], hydrates it from
//! disk, applies at most one operation and reports the resulting cart.

use go_marketplace_cart::{Cart, CartChange, CartConfig, CartError, CartStore, NewLineItem};
use go_marketplace_core::{CurrencyCode, Price, ProductId};
use tracing::{info, warn};

/// Open and hydrate the configured store.
async fn open(config: &CartConfig) -> Result<CartStore, CartError> {
    let store = config.open_store();
    store.load().await?;
    info!(path = %config.storage_path.display(), key = %store.key(), "Cart loaded");
    Ok(store)
}

/// Show the cart.
///
/// # Errors
///
/// Returns an error if the stored cart cannot be read.
pub async fn list(config: &CartConfig, currency: CurrencyCode) -> Result<(), CartError> {
    let store = open(config).await?;
    report(&store.cart().await, currency);
    Ok(())
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the cart cannot be read or written.
pub async fn add(
    config: &CartConfig,
    product: NewLineItem,
    currency: CurrencyCode,
) -> Result<(), CartError> {
    let store = open(config).await?;
    let id = product.id.clone();
    let change = store.add_to_cart(product).await?;
    log_change(&id, change);
    report(&store.cart().await, currency);
    Ok(())
}

/// Add one unit to an existing line.
///
/// # Errors
///
/// Returns an error if the cart cannot be read or written.
pub async fn increment(
    config: &CartConfig,
    id: &ProductId,
    currency: CurrencyCode,
) -> Result<(), CartError> {
    let store = open(config).await?;
    let change = store.increment(id).await?;
    log_change(id, change);
    report(&store.cart().await, currency);
    Ok(())
}

/// Remove one unit from an existing line.
///
/// # Errors
///
/// Returns an error if the cart cannot be read or written.
pub async fn decrement(
    config: &CartConfig,
    id: &ProductId,
    currency: CurrencyCode,
) -> Result<(), CartError> {
    let store = open(config).await?;
    let change = store.decrement(id).await?;
    log_change(id, change);
    report(&store.cart().await, currency);
    Ok(())
}

fn log_change(id: &ProductId, change: CartChange) {
    match change {
        CartChange::Added => info!(%id, "Added to cart"),
        CartChange::QuantityChanged(quantity) => info!(%id, quantity, "Quantity updated"),
        CartChange::Removed => info!(%id, "Removed from cart"),
        CartChange::Unchanged => warn!(%id, "No such product in cart"),
    }
}

fn report(cart: &Cart, currency: CurrencyCode) {
    for line in render(cart, currency) {
        info!("{line}");
    }
}

/// Render the cart as display lines: one per item, then a totals line.
#[must_use]
pub fn render(cart: &Cart, currency: CurrencyCode) -> Vec<String> {
    if cart.is_empty() {
        return vec!["Cart is empty".to_string()];
    }

    let mut lines: Vec<String> = cart
        .items()
        .iter()
        .map(|item| {
            format!(
                "{id}  {title}  {quantity} x {price} = {total}",
                id = item.id,
                title = item.title,
                quantity = item.quantity,
                price = item.price.display(currency),
                total = display_total(item.line_total(), currency),
            )
        })
        .collect();

    lines.push(format!(
        "{count} item(s), subtotal {subtotal}",
        count = cart.item_count(),
        subtotal = display_total(cart.subtotal(), currency),
    ));
    lines
}

fn display_total(total: Option<Price>, currency: CurrencyCode) -> String {
    total.map_or_else(|| "overflow".to_string(), |price| price.display(currency))
}

/// Build the product for `add` from command-line arguments.
#[must_use]
pub fn new_product(id: String, title: String, image_url: String, price: Price) -> NewLineItem {
    NewLineItem::new(id, title, image_url, price)
}
