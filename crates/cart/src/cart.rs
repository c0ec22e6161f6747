//! The cart collection and its pure update rules.
//!
//! [`Cart`] knows nothing about storage or locking. Every mutation here is a
//! plain function of the current value, which is what lets
//! [`CartStore`](crate::CartStore) apply them as a reducer under its lock.

use go_marketplace_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

use crate::item::{LineItem, NewLineItem};

/// What a mutation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended with quantity 1.
    Added,
    /// An existing line's quantity changed to the given value.
    QuantityChanged(u32),
    /// The line was removed.
    Removed,
    /// No line matched the id.
    Unchanged,
}

/// Ordered collection of line items, unique by product id.
///
/// Serializes as a bare JSON array of line items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up a line by product id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of price times quantity across all lines.
    ///
    /// Returns `None` if a line total or the running sum overflows.
    #[must_use]
    pub fn subtotal(&self) -> Option<Price> {
        self.items
            .iter()
            .try_fold(Price::ZERO, |total, item| total.checked_add(item.line_total()?))
    }

    /// Add one unit of a product, appending a new line if it isn't in the cart.
    pub fn add(&mut self, product: NewLineItem) -> CartChange {
        if let Some(item) = self.get_mut(&product.id) {
            item.quantity = item.quantity.saturating_add(1);
            return CartChange::QuantityChanged(item.quantity);
        }

        self.items.push(product.with_quantity(1));
        CartChange::Added
    }

    /// Add one unit to an existing line.
    pub fn increment(&mut self, id: &ProductId) -> CartChange {
        self.get_mut(id).map_or(CartChange::Unchanged, |item| {
            item.quantity = item.quantity.saturating_add(1);
            CartChange::QuantityChanged(item.quantity)
        })
    }

    /// Remove one unit from an existing line, dropping the line at zero.
    pub fn decrement(&mut self, id: &ProductId) -> CartChange {
        let Some(position) = self.items.iter().position(|item| &item.id == id) else {
            return CartChange::Unchanged;
        };

        match self.items.get_mut(position) {
            Some(item) if item.quantity > 1 => {
                item.quantity -= 1;
                CartChange::QuantityChanged(item.quantity)
            }
            _ => {
                self.items.remove(position);
                CartChange::Removed
            }
        }
    }

    /// Drop lines that break the cart invariants: zero quantities, repeated
    /// ids (the first occurrence wins) and lines whose total would overflow
    /// the subtotal.
    ///
    /// Returns the number of lines dropped.
    pub fn normalize(&mut self) -> usize {
        let before = self.items.len();
        let mut seen = std::collections::HashSet::new();
        let mut total = Price::ZERO;
        self.items.retain(|item| {
            if item.quantity == 0 || !seen.insert(item.id.clone()) {
                return false;
            }
            match item.line_total().and_then(|line| total.checked_add(line)) {
                Some(next) => {
                    total = next;
                    true
                }
                None => false,
            }
        });
        before - self.items.len()
    }

    fn get_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|item| &item.id == id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    fn product(id: &str, cents: i64) -> NewLineItem {
        NewLineItem::new(id, format!("Product {id}"), format!("https://img/{id}.png"), Price::from_cents(cents))
    }

    fn id(s: &str) -> ProductId {
        ProductId::new(s)
    }

    #[test]
    fn test_add_fresh_id_appends_single_unit() {
        let mut cart = Cart::new();
        assert_eq!(cart.add(product("A", 1000)), CartChange::Added);
        assert_eq!(cart.add(product("B", 500)), CartChange::Added);

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id, "A");
        assert_eq!(cart.items()[1].id, "B");
        assert_eq!(cart.get(&id("A")).unwrap().quantity, 1);
    }

    #[test]
    fn test_add_existing_id_increments_without_growing() {
        let mut cart = Cart::new();
        cart.add(product("A", 1000));
        assert_eq!(cart.add(product("A", 1000)), CartChange::QuantityChanged(2));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.get(&id("A")).unwrap().quantity, 2);
    }

    #[test]
    fn test_increment_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("A", 1000));
        let before = cart.clone();

        assert_eq!(cart.increment(&id("missing")), CartChange::Unchanged);
        assert_eq!(cart, before);
    }

    #[test]
    fn test_decrement_last_unit_removes_line() {
        let mut cart = Cart::new();
        cart.add(product("A", 1000));
        cart.add(product("B", 1000));

        assert_eq!(cart.decrement(&id("A")), CartChange::Removed);
        assert_eq!(cart.len(), 1);
        assert!(cart.get(&id("A")).is_none());
    }

    #[test]
    fn test_decrement_above_one_keeps_line() {
        let mut cart = Cart::new();
        cart.add(product("A", 1000));
        cart.increment(&id("A"));
        cart.increment(&id("A"));

        assert_eq!(cart.decrement(&id("A")), CartChange::QuantityChanged(2));
        assert_eq!(cart.get(&id("A")).unwrap().quantity, 2);
    }

    #[test]
    fn test_decrement_absent_id_is_noop() {
        let mut cart = Cart::new();
        cart.add(product("A", 1000));

        assert_eq!(cart.decrement(&id("B")), CartChange::Unchanged);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn test_full_scenario() {
        let mut cart = Cart::new();
        cart.add(NewLineItem::new("A", "T", "u", Price::from(10_u32)));
        assert_eq!(cart.get(&id("A")).unwrap().quantity, 1);

        cart.increment(&id("A"));
        assert_eq!(cart.get(&id("A")).unwrap().quantity, 2);

        cart.decrement(&id("A"));
        assert_eq!(cart.get(&id("A")).unwrap().quantity, 1);

        cart.decrement(&id("A"));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add(product("A", 1999));
        cart.add(product("A", 1999));
        cart.add(product("B", 500));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.subtotal(), Some(Price::from_cents(4498)));
        assert_eq!(Cart::new().subtotal(), Some(Price::ZERO));
    }

    #[test]
    fn test_serialized_form_round_trips() {
        let mut cart = Cart::new();
        cart.add(product("A", 1999));
        cart.add(product("B", 500));
        cart.increment(&id("B"));

        let json = serde_json::to_string(&cart).unwrap();
        assert!(json.starts_with('['));

        let reloaded: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, cart);
    }

    #[test]
    fn test_normalize_drops_zero_quantity_and_duplicates() {
        let items = vec![
            product("A", 100).with_quantity(2),
            product("B", 100).with_quantity(0),
            product("A", 100).with_quantity(5),
            product("C", 100).with_quantity(1),
        ];
        let mut cart = Cart { items };

        assert_eq!(cart.normalize(), 2);
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.get(&id("A")).unwrap().quantity, 2);
        assert!(cart.get(&id("B")).is_none());
    }

    fn huge() -> Price {
        serde_json::from_str("50000000000000000000000000000").unwrap()
    }

    #[test]
    fn test_normalize_drops_overflowing_lines() {
        let items = vec![
            product("A", 100).with_quantity(1),
            NewLineItem::new("B", "T", "u", huge()).with_quantity(2),
            NewLineItem::new("C", "T", "u", huge()).with_quantity(1),
            NewLineItem::new("D", "T", "u", huge()).with_quantity(1),
        ];
        let mut cart = Cart { items };

        // B overflows on its own; D only overflows once C is counted.
        assert_eq!(cart.normalize(), 2);
        assert!(cart.get(&id("A")).is_some());
        assert!(cart.get(&id("B")).is_none());
        assert!(cart.get(&id("C")).is_some());
        assert!(cart.get(&id("D")).is_none());
        assert!(cart.subtotal().is_some());
    }

    #[test]
    fn test_subtotal_overflow_after_increment_is_none() {
        let mut cart = Cart::new();
        cart.add(NewLineItem::new("A", "T", "u", huge()));
        assert_eq!(cart.subtotal(), Some(huge()));

        assert_eq!(cart.increment(&id("A")), CartChange::QuantityChanged(2));
        assert_eq!(cart.get(&id("A")).unwrap().line_total(), None);
        assert_eq!(cart.subtotal(), None);
    }
}
