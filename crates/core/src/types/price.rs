//! Type-safe price representation using decimal arithmetic.
//!
//! The storefront trades in a single currency. Amounts travel over the wire
//! as JSON numbers and are held as [`Decimal`] to keep cart arithmetic exact.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, Mul};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Symbol prefixed to every displayed amount.
pub const CURRENCY_SYMBOL: &str = "Rs.";

/// A price in the store currency.
///
/// Displays as `Rs. 1,234` (rounded to whole units).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Price {
    /// Zero in the store currency.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// The raw decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns `true` for amounts below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Price of `quantity` units, saturating at the decimal bounds.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity)))
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, rhs: u32) -> Self {
        self.times(rhs)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::format_price(self.0))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserializes_from_json_number() {
        let price: Price = serde_json::from_str("1499.5").unwrap();
        assert_eq!(price.amount(), Decimal::new(14995, 1));
    }

    #[test]
    fn test_serializes_as_json_number() {
        let json = serde_json::to_string(&Price::new(Decimal::new(250, 0))).unwrap();
        assert_eq!(json, "250.0");
    }

    #[test]
    fn test_times_and_sum() {
        let unit = Price::new(Decimal::new(1050, 2));
        let total: Price = [unit * 2, unit.times(1)].into_iter().sum();
        assert_eq!(total.amount(), Decimal::new(3150, 2));
    }

    #[test]
    fn test_arithmetic_saturates() {
        let max = Price::new(Decimal::MAX);
        assert_eq!(max.times(2), max);
        assert_eq!(max + Price::new(Decimal::ONE), max);
        assert_eq!(Price::new(Decimal::MIN).times(3).amount(), Decimal::MIN);
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::new(Decimal::new(123_456, 1)).to_string(), "Rs. 12,346");
    }
}
