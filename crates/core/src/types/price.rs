//! Prices in Chilean pesos.
//!
//! The store sells in CLP only, which has no minor unit, so amounts are kept
//! as [`Decimal`] and rounded to whole pesos when displayed.

use core::fmt;
use core::ops::{Add, Mul};
use std::iter::Sum;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An amount of Chilean pesos.
///
/// Serialized as a JSON number, which is what the catalog and checkout
/// services exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// Zero pesos.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Create a price from a whole number of pesos.
    #[must_use]
    pub fn from_pesos(pesos: i64) -> Self {
        Self(Decimal::from(pesos))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is below zero.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Amount rounded to whole pesos, half away from zero.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        rust_decimal::serde::float::deserialize(deserializer).map(Self)
    }
}

impl From<Decimal> for Price {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Mul<u32> for Price {
    type Output = Self;

    fn mul(self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::format_currency(*self))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        assert_eq!(Price::from_pesos(1000) * 3, Price::from_pesos(3000));
    }

    #[test]
    fn test_sum_of_lines() {
        let total: Price = [Price::from_pesos(1500), Price::from_pesos(2500)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_pesos(4000));
    }

    #[test]
    fn test_rounded_half_away_from_zero() {
        assert_eq!(Price::new(Decimal::new(4995, 1)).rounded(), Decimal::from(500));
        assert_eq!(Price::new(Decimal::new(-4995, 1)).rounded(), Decimal::from(-500));
    }

    #[test]
    fn test_deserializes_backend_numbers() {
        let price: Price = serde_json::from_str("15000").unwrap();
        assert_eq!(price, Price::from_pesos(15000));
        let price: Price = serde_json::from_str("9990.5").unwrap();
        assert_eq!(price.amount(), Decimal::new(99905, 1));
    }
}
