//! Orders placed through checkout.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::types::{OrderStatus, Price};

/// Order reference.
///
/// Orders created locally at checkout get `ORD-<epoch millis>`; orders read
/// back from the checkout service carry that service's id as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Reference for an order placed at `at`.
    #[must_use]
    pub fn at(at: DateTime<Utc>) -> Self {
        Self(format!("ORD-{}", at.timestamp_millis()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shipping and contact details entered at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetails {
    pub first_name: String,
    pub last_names: String,
    pub email: String,
    pub street: String,
    #[serde(default)]
    pub apartment: Option<String>,
    pub region: String,
    pub commune: String,
}

/// Snapshot of a purchase at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub date: DateTime<Utc>,
    pub customer: CustomerDetails,
    pub items: Vec<CartLine>,
    pub total: Price,
    pub status: OrderStatus,
}

impl Order {
    /// Units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_local_order_reference() {
        let at = DateTime::from_timestamp_millis(1_720_137_600_000).unwrap();
        assert_eq!(OrderId::at(at).as_str(), "ORD-1720137600000");
    }
}
