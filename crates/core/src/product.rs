//! Catalog products.

use serde::{Deserialize, Serialize};

use crate::types::{Category, Price, ProductId, Stock};

/// A product as shown in the store.
///
/// Products are created and edited from the back-office and are read-only
/// to shoppers. Carts embed a full copy, so this is also the shape of the
/// persisted cart snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Absolute URL or site-relative path.
    #[serde(default)]
    pub image: String,
    pub price: Price,
    /// `null` in JSON when unlimited.
    #[serde(default = "unlimited")]
    pub stock: Stock,
    #[serde(default)]
    pub category: Category,
}

const fn unlimited() -> Stock {
    Stock::Unlimited
}

impl Product {
    /// Whether the product is in stock at all.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        match self.stock {
            Stock::Limited(units) => units > 0,
            Stock::Unlimited => true,
        }
    }
}
