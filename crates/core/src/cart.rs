//! Shopping cart lines and the rules that keep them consistent.
//!
//! A [`Cart`] holds at most one line per product, every line has a quantity
//! of at least one, and a line never holds more units than its product's
//! stock unless the stock is unlimited. Persistence is the storefront's job;
//! everything here is plain data.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::product::Product;
use crate::types::{Price, ProductId};

/// Errors raised when a cart change is rejected. The cart is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Asked to add zero units.
    #[error("La cantidad debe ser al menos 1.")]
    ZeroQuantity,

    /// The addition would take the line past the product's stock.
    #[error("¡Stock insuficiente! Solo quedan {available} unidades.")]
    InsufficientStock {
        /// Units the product has.
        available: u32,
        /// Units already in the cart.
        in_cart: u32,
        /// Units the shopper asked to add.
        requested: u32,
    },
}

/// A product paired with how many units the shopper wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Price × quantity.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.product.price * self.quantity
    }
}

/// Outcome of setting a line's quantity directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// Stored as requested.
    Set(u32),
    /// Requested more than the stock; stored the stock instead.
    Clamped { requested: u32, max: u32 },
    /// Quantity reached zero and the line was dropped.
    Removed,
    /// No line for that product.
    NotInCart,
}

impl QuantityChange {
    /// Message to show the shopper, if any.
    #[must_use]
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Clamped { max, .. } => {
                Some(format!("No puedes superar el stock máximo ({max})."))
            }
            _ => None,
        }
    }
}

/// Ordered collection of cart lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from restored lines, restoring the invariants: empty
    /// lines are dropped and repeated products are merged in first-seen
    /// order.
    #[must_use]
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut cart = Self::new();
        for line in lines.into_iter().filter(|line| line.quantity > 0) {
            match cart.position(line.product.id) {
                Some(index) => {
                    if let Some(existing) = cart.lines.get_mut(index) {
                        existing.quantity = existing.quantity.saturating_add(line.quantity);
                    }
                }
                None => cart.lines.push(line),
            }
        }
        cart
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines
            .iter()
            .position(|line| line.product.id == product_id)
    }

    /// Add `quantity` units of `product`, merging with an existing line.
    ///
    /// The stock checked is the one on `product` as passed in, which is the
    /// freshest copy the caller has.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::ZeroQuantity`] for a zero quantity and
    /// [`CartError::InsufficientStock`] when the line would exceed a limited
    /// stock. The cart is unchanged in both cases.
    pub fn add(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::ZeroQuantity);
        }

        let index = self.position(product.id);
        let in_cart = index
            .and_then(|i| self.lines.get(i))
            .map_or(0, |line| line.quantity);
        let wanted = in_cart.saturating_add(quantity);

        if let Some(available) = product.stock.available()
            && wanted > available
        {
            return Err(CartError::InsufficientStock {
                available,
                in_cart,
                requested: quantity,
            });
        }

        match index.and_then(|i| self.lines.get_mut(i)) {
            Some(line) => line.quantity = wanted,
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity,
            }),
        }
        Ok(())
    }

    /// Set a line's quantity, clamped to `[0, stock]`. Zero removes it.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> QuantityChange {
        let Some(index) = self.position(product_id) else {
            return QuantityChange::NotInCart;
        };

        let Some(line) = self.lines.get_mut(index) else {
            return QuantityChange::NotInCart;
        };
        let applied = line.product.stock.clamp(quantity);

        if applied == 0 {
            self.lines.remove(index);
            return QuantityChange::Removed;
        }

        line.quantity = applied;
        if applied < quantity {
            QuantityChange::Clamped {
                requested: quantity,
                max: applied,
            }
        } else {
            QuantityChange::Set(applied)
        }
    }

    /// Drop the line for `product_id`. Returns whether one was present.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Σ price × quantity.
    #[must_use]
    pub fn total_price(&self) -> Price {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    /// Σ quantity.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::types::{Category, Stock};

    fn protein(stock: Stock) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Proteína Test".to_owned(),
            description: "Desc".to_owned(),
            image: "img.jpg".to_owned(),
            price: Price::from_pesos(1000),
            stock,
            category: Category::Supplements,
        }
    }

    fn membership() -> Product {
        Product {
            id: ProductId::new(2),
            name: "Plan Anual".to_owned(),
            description: String::new(),
            image: String::new(),
            price: Price::from_pesos(250_000),
            stock: Stock::Unlimited,
            category: Category::Memberships,
        }
    }

    #[test]
    fn test_starts_empty() {
        let cart = Cart::new();
        assert!(cart.is_empty());
        assert_eq!(cart.total_price(), Price::ZERO);
        assert_eq!(cart.count(), 0);
    }

    #[test]
    fn test_add_same_product_accumulates() {
        let mut cart = Cart::new();
        let product = protein(Stock::Limited(10));
        cart.add(&product, 1).unwrap();
        cart.add(&product, 2).unwrap();

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
        assert_eq!(cart.total_price(), Price::from_pesos(3000));
    }

    #[test]
    fn test_add_beyond_stock_is_rejected_unchanged() {
        let mut cart = Cart::new();
        let product = protein(Stock::Limited(3));
        cart.add(&product, 2).unwrap();
        let before = cart.clone();

        let err = cart.add(&product, 2).unwrap_err();
        assert_eq!(
            err,
            CartError::InsufficientStock {
                available: 3,
                in_cart: 2,
                requested: 2
            }
        );
        assert_eq!(err.to_string(), "¡Stock insuficiente! Solo quedan 3 unidades.");
        assert_eq!(cart, before);
    }

    #[test]
    fn test_add_zero_is_rejected() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.add(&protein(Stock::Limited(3)), 0),
            Err(CartError::ZeroQuantity)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_unlimited_stock_never_rejects() {
        let mut cart = Cart::new();
        cart.add(&membership(), 1_000).unwrap();
        cart.add(&membership(), 1_000_000).unwrap();
        assert_eq!(cart.count(), 1_001_000);
    }

    #[test]
    fn test_remove_recomputes_totals() {
        let mut cart = Cart::new();
        cart.add(&protein(Stock::Limited(10)), 2).unwrap();
        cart.add(&membership(), 1).unwrap();

        assert!(cart.remove(ProductId::new(1)));
        assert!(cart.line(ProductId::new(1)).is_none());
        assert_eq!(cart.total_price(), Price::from_pesos(250_000));
        assert_eq!(cart.count(), 1);
        assert!(!cart.remove(ProductId::new(1)));
    }

    #[test]
    fn test_set_quantity_clamps_to_stock() {
        let mut cart = Cart::new();
        cart.add(&protein(Stock::Limited(5)), 1).unwrap();

        let change = cart.set_quantity(ProductId::new(1), 9);
        assert_eq!(change, QuantityChange::Clamped { requested: 9, max: 5 });
        assert_eq!(
            change.notice().unwrap(),
            "No puedes superar el stock máximo (5)."
        );
        assert_eq!(cart.line(ProductId::new(1)).unwrap().quantity, 5);

        assert_eq!(cart.set_quantity(ProductId::new(1), 4), QuantityChange::Set(4));
        assert_eq!(cart.set_quantity(ProductId::new(1), 4).notice(), None);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add(&protein(Stock::Limited(5)), 3).unwrap();
        assert_eq!(cart.set_quantity(ProductId::new(1), 0), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_on_sold_out_line_removes() {
        let mut cart = Cart::from_lines(vec![CartLine {
            product: protein(Stock::Limited(0)),
            quantity: 2,
        }]);
        assert_eq!(cart.set_quantity(ProductId::new(1), 1), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_missing_line() {
        let mut cart = Cart::new();
        assert_eq!(
            cart.set_quantity(ProductId::new(99), 1),
            QuantityChange::NotInCart
        );
    }

    #[test]
    fn test_from_lines_restores_invariants() {
        let cart = Cart::from_lines(vec![
            CartLine {
                product: protein(Stock::Limited(10)),
                quantity: 1,
            },
            CartLine {
                product: membership(),
                quantity: 0,
            },
            CartLine {
                product: protein(Stock::Limited(10)),
                quantity: 2,
            },
        ]);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 3);
    }

    #[test]
    fn test_snapshot_is_plain_line_array() {
        let mut cart = Cart::new();
        cart.add(&membership(), 1).unwrap();
        let json = serde_json::to_value(&cart).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["quantity"], 1);
        assert!(json[0]["product"]["stock"].is_null());
    }
}
