//! Turning the cart into an order.

use thiserror::Error;
use tracing::{info, instrument, warn};

use gymtastic_core::validation::{CustomerDetailsError, validate_customer_details};
use gymtastic_core::{CustomerDetails, Order};

use crate::api::{ApiError, OrderClient};
use crate::cart::CartStore;
use crate::storage::Storage;

/// Why an order was not placed.
#[derive(Debug, Error)]
pub enum CheckoutError {
    #[error("Tu carrito está vacío.")]
    EmptyCart,

    #[error(transparent)]
    Validation(#[from] CustomerDetailsError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Validate the details, submit the cart and empty it.
///
/// The cart is cleared only once the checkout service accepts the order;
/// on any error it is left exactly as it was.
///
/// # Errors
///
/// Returns [`CheckoutError::EmptyCart`] for an empty cart,
/// [`CheckoutError::Validation`] when the details fail validation, and
/// [`CheckoutError::Api`] when the service refuses the order.
#[instrument(skip_all, fields(items = cart.count()))]
pub async fn place_order<S: Storage>(
    cart: &mut CartStore<S>,
    orders: &OrderClient,
    customer: &CustomerDetails,
) -> Result<Order, CheckoutError> {
    if cart.is_empty() {
        return Err(CheckoutError::EmptyCart);
    }
    validate_customer_details(customer)?;

    let order = orders
        .create(customer, cart.lines(), cart.total_price())
        .await
        .inspect_err(|e| warn!(error = %e, "Checkout refused, cart kept"))?;

    cart.clear_cart();
    info!(order_id = %order.id, "Cart checked out");
    Ok(order)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use gymtastic_core::{Category, Price, Product, ProductId, Stock};

    use super::*;
    use crate::storage::MemoryStorage;

    /// Nothing listens here; tests that reach the network would fail.
    fn offline_orders() -> OrderClient {
        OrderClient::new("http://127.0.0.1:9")
    }

    fn details() -> CustomerDetails {
        CustomerDetails {
            first_name: "Pedro".to_owned(),
            last_names: "Hacker".to_owned(),
            email: "pedro@example.com".to_owned(),
            street: "Los crisantemos 123".to_owned(),
            apartment: None,
            region: "Región Metropolitana de Santiago".to_owned(),
            commune: "Cerrillos".to_owned(),
        }
    }

    fn creatine() -> Product {
        Product {
            id: ProductId::new(3),
            name: "Creatina".to_owned(),
            description: String::new(),
            image: String::new(),
            price: Price::from_pesos(15000),
            stock: Stock::Limited(5),
            category: Category::Supplements,
        }
    }

    #[tokio::test]
    async fn test_empty_cart_is_refused() {
        let mut cart = CartStore::open(MemoryStorage::new());
        let result = place_order(&mut cart, &offline_orders(), &details()).await;
        assert!(matches!(result, Err(CheckoutError::EmptyCart)));
    }

    #[tokio::test]
    async fn test_invalid_details_keep_cart() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_to_cart(&creatine(), 2).unwrap();

        let customer = CustomerDetails {
            email: "no-es-correo".to_owned(),
            ..details()
        };
        let result = place_order(&mut cart, &offline_orders(), &customer).await;
        assert!(matches!(
            result,
            Err(CheckoutError::Validation(CustomerDetailsError::InvalidEmail))
        ));
        assert_eq!(cart.count(), 2);
    }

    #[tokio::test]
    async fn test_unreachable_service_keeps_cart() {
        let mut cart = CartStore::open(MemoryStorage::new());
        cart.add_to_cart(&creatine(), 1).unwrap();

        let result = place_order(&mut cart, &offline_orders(), &details()).await;
        assert!(matches!(result, Err(CheckoutError::Api(ApiError::Http(_)))));
        assert_eq!(cart.count(), 1);
    }
}
