//! Cart line items.

use go_marketplace_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

/// One product in the cart.
///
/// The serialized field names (`id`, `title`, `image_url`, `price`, `quantity`)
/// are the stored format shared with other clients of the storage key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    /// Unit price.
    pub price: Price,
    /// Always at least 1 while the item is in a cart.
    pub quantity: u32,
}

impl LineItem {
    /// Unit price multiplied by quantity, or `None` if that overflows.
    #[must_use]
    pub fn line_total(&self) -> Option<Price> {
        self.price.checked_times(self.quantity)
    }
}

/// A product as offered to [`add_to_cart`](crate::CartStore::add_to_cart),
/// i.e. a [`LineItem`] without its quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLineItem {
    pub id: ProductId,
    pub title: String,
    pub image_url: String,
    pub price: Price,
}

impl NewLineItem {
    /// Create a new item.
    #[must_use]
    pub fn new(
        id: impl Into<ProductId>,
        title: impl Into<String>,
        image_url: impl Into<String>,
        price: impl Into<Price>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            image_url: image_url.into(),
            price: price.into(),
        }
    }

    /// Turn into a line item with the given quantity.
    #[must_use]
    pub fn with_quantity(self, quantity: u32) -> LineItem {
        LineItem {
            id: self.id,
            title: self.title,
            image_url: self.image_url,
            price: self.price,
            quantity,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_field_names() {
        let item = NewLineItem::new("A", "T", "u", Price::from(10_u32)).with_quantity(2);
        let value = serde_json::to_value(&item).unwrap();

        assert_eq!(value["id"], "A");
        assert_eq!(value["title"], "T");
        assert_eq!(value["image_url"], "u");
        assert_eq!(value["price"], 10.0);
        assert_eq!(value["quantity"], 2);
    }

    #[test]
    fn test_line_total() {
        let item = NewLineItem::new("A", "T", "u", Price::from_cents(250)).with_quantity(3);
        assert_eq!(item.line_total(), Some(Price::from_cents(750)));
    }

    #[test]
    fn test_negative_quantity_is_rejected() {
        let json = r#"{"id":"A","title":"T","image_url":"u","price":1,"quantity":-1}"#;
        assert!(serde_json::from_str::<LineItem>(json).is_err());
    }
}
