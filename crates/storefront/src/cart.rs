//! Persistent shopping cart.
//!
//! [`CartStore`] wraps the core [`Cart`] rules and writes the whole cart to
//! storage under [`keys::CART`] after every change. Opening a store restores
//! the last snapshot; a missing or unreadable snapshot gives an empty cart.

use tracing::{debug, instrument, warn};

use gymtastic_core::{Cart, CartError, CartLine, Price, Product, ProductId, QuantityChange};

use crate::storage::{Storage, keys};

/// Cart container backed by a [`Storage`].
#[derive(Debug)]
pub struct CartStore<S: Storage> {
    storage: S,
    cart: Cart,
}

impl<S: Storage> CartStore<S> {
    /// Open the cart, restoring the persisted snapshot if there is one.
    pub fn open(storage: S) -> Self {
        let cart = restore(&storage);
        Self { storage, cart }
    }

    /// Add `quantity` units of `product`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] when the quantity is zero or the product does
    /// not have enough stock; nothing is changed or persisted then.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub fn add_to_cart(&mut self, product: &Product, quantity: u32) -> Result<(), CartError> {
        self.cart.add(product, quantity)?;
        debug!(count = self.cart.count(), "Added to cart");
        self.persist();
        Ok(())
    }

    /// Set a line's quantity, clamped to the product's stock.
    #[instrument(skip(self))]
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: u32) -> QuantityChange {
        let change = self.cart.set_quantity(product_id, quantity);
        if change != QuantityChange::NotInCart {
            self.persist();
        }
        change
    }

    /// Remove a product's line. Returns whether it was in the cart.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        let removed = self.cart.remove(product_id);
        self.persist();
        removed
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
        self.persist();
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    #[must_use]
    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.cart.line(product_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    #[must_use]
    pub fn total_price(&self) -> Price {
        self.cart.total_price()
    }

    /// Units across all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.cart.count()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Write the snapshot. Failures are logged and otherwise ignored: the
    /// in-memory cart stays authoritative for this run.
    fn persist(&self) {
        let json = match serde_json::to_string(&self.cart) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.storage.set_item(keys::CART, &json) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}

fn restore(storage: &impl Storage) -> Cart {
    let raw = match storage.get_item(keys::CART) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Cart::new(),
        Err(e) => {
            warn!(error = %e, "Failed to read stored cart, starting empty");
            return Cart::new();
        }
    };

    match serde_json::from_str::<Vec<CartLine>>(&raw) {
        Ok(lines) => Cart::from_lines(lines),
        Err(e) => {
            warn!(error = %e, "Stored cart is corrupted, starting empty");
            Cart::new()
        }
    }
}
