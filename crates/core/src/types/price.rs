//! Type-safe price representation using decimal arithmetic.
//!
//! Prices travel as plain JSON numbers (`"price": 19.99`) so that stored carts
//! stay readable by other clients of the same storage key. Arithmetic happens
//! on [`Decimal`] to avoid accumulating float error in subtotals, and is
//! checked: a stored price near [`Decimal::MAX`] must not be able to panic a
//! subtotal.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A unit or line price in the store's currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from an amount in the smallest currency unit (e.g. cents).
    #[must_use]
    pub fn from_cents(cents: i64) -> Self {
        Self(Decimal::new(cents, 2))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Multiply by a quantity, e.g. to get a line total.
    ///
    /// Returns `None` if the result does not fit in a [`Decimal`].
    #[must_use]
    pub fn checked_times(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Add two prices, returning `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Format for display in the given currency (e.g., "$19.99").
    #[must_use]
    pub fn display(&self, currency: CurrencyCode) -> String {
        format!("{}{:.2}", currency.symbol(), self.0.round_dp(2))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display(CurrencyCode::default()))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<u32> for Price {
    fn from(amount: u32) -> Self {
        Self(Decimal::from(amount))
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
    EUR,
    GBP,
    CAD,
    AUD,
    BRL,
}

impl CurrencyCode {
    /// Display symbol for the currency.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD | Self::CAD | Self::AUD => "$",
            Self::EUR => "€",
            Self::GBP => "£",
            Self::BRL => "R$",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_json_number() {
        let price = Price::from_cents(1999);
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "19.99");
    }

    #[test]
    fn test_deserializes_integer_and_float() {
        let whole: Price = serde_json::from_str("10").unwrap();
        assert_eq!(whole, Price::from(10_u32));

        let fractional: Price = serde_json::from_str("19.99").unwrap();
        assert_eq!(fractional, Price::from_cents(1999));
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::from_cents(1999).display(CurrencyCode::USD), "$19.99");
        assert_eq!(Price::from(10_u32).display(CurrencyCode::BRL), "R$10.00");
        assert_eq!(Price::from(10_u32).to_string(), "$10.00");
    }

    #[test]
    fn test_checked_times_and_add() {
        let line = Price::from_cents(1999).checked_times(2).unwrap();
        assert_eq!(line, Price::from_cents(3998));

        let total = line.checked_add(Price::from(5_u32)).unwrap();
        assert_eq!(total, Price::from_cents(4498));
    }

    #[test]
    fn test_checked_arithmetic_overflow_is_none() {
        let huge: Price = serde_json::from_str("50000000000000000000000000000").unwrap();

        assert_eq!(huge.checked_times(1), Some(huge));
        assert_eq!(huge.checked_times(2), None);
        assert_eq!(huge.checked_add(huge), None);
        assert_eq!(Price::new(Decimal::MAX).checked_add(Price::from(1_u32)), None);
    }

    #[test]
    fn test_negative_cents() {
        assert_eq!(Price::from_cents(-250).amount(), Decimal::new(-250, 2));
    }
}
