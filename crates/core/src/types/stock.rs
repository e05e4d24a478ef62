//! Inventory levels.

use serde::{Deserialize, Serialize};

/// Available inventory for a product.
///
/// Memberships and classes never run out and carry [`Stock::Unlimited`].
/// On the wire unlimited stock is `null` (or a missing field), matching what
/// the catalog service returns for non-depleting items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<i64>", into = "Option<u32>")]
pub enum Stock {
    /// A finite number of units.
    Limited(u32),
    /// Never depletes.
    Unlimited,
}

impl Stock {
    /// Clamp a requested quantity to what is available.
    #[must_use]
    pub fn clamp(self, quantity: u32) -> u32 {
        match self {
            Self::Limited(available) => quantity.min(available),
            Self::Unlimited => quantity,
        }
    }

    /// Units available, or `None` when unlimited.
    #[must_use]
    pub const fn available(self) -> Option<u32> {
        match self {
            Self::Limited(available) => Some(available),
            Self::Unlimited => None,
        }
    }
}

impl Default for Stock {
    fn default() -> Self {
        Self::Limited(0)
    }
}

impl From<Option<i64>> for Stock {
    fn from(value: Option<i64>) -> Self {
        value.map_or(Self::Unlimited, |units| {
            Self::Limited(u32::try_from(units.max(0)).unwrap_or(u32::MAX))
        })
    }
}

impl From<Stock> for Option<u32> {
    fn from(stock: Stock) -> Self {
        stock.available()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_limited_bounds() {
        let stock = Stock::Limited(10);
        assert_eq!(stock.clamp(10), 10);
        assert_eq!(stock.clamp(15), 10);
        assert_eq!(stock.available(), Some(10));
    }

    #[test]
    fn test_unlimited_never_bounds() {
        assert_eq!(Stock::Unlimited.clamp(u32::MAX), u32::MAX);
        assert_eq!(Stock::Unlimited.clamp(500), 500);
        assert_eq!(Stock::Unlimited.available(), None);
    }

    #[test]
    fn test_null_means_unlimited() {
        let stock: Stock = serde_json::from_str("null").unwrap();
        assert_eq!(stock, Stock::Unlimited);
        assert_eq!(serde_json::to_string(&Stock::Unlimited).unwrap(), "null");
    }

    #[test]
    fn test_negative_stock_reads_as_zero() {
        let stock: Stock = serde_json::from_str("-3").unwrap();
        assert_eq!(stock, Stock::Limited(0));
    }
}
