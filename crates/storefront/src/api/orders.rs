//! Checkout service client.

use std::sync::Arc;

use chrono::Utc;
use secrecy::SecretString;
use tracing::{info, instrument};

use gymtastic_core::{CartLine, CustomerDetails, Order, OrderId, OrderStatus, Price};

use super::conversions::{order_from_backend, product_kind};
use super::types::{BackendOrder, CheckoutItem, CheckoutRequest, MAIN_BRANCH};
use super::{ApiError, authorize, decode, expect_success};

const CHECKOUT_FALLBACK: &str = "Error al procesar el pago o stock insuficiente";

/// Client for the checkout service.
#[derive(Clone)]
pub struct OrderClient {
    inner: Arc<OrderClientInner>,
    token: Option<SecretString>,
}

struct OrderClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl OrderClient {
    /// Create a client for the service rooted at `checkout_url`.
    #[must_use]
    pub fn new(checkout_url: &str) -> Self {
        Self {
            inner: Arc::new(OrderClientInner {
                client: reqwest::Client::new(),
                base_url: checkout_url.trim_end_matches('/').to_owned(),
            }),
            token: None,
        }
    }

    /// Send `token` as a bearer token.
    #[must_use]
    pub fn with_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }

    /// Submit a purchase.
    ///
    /// The service decrements stock itself and answers with no usable body,
    /// so the returned order is built here from what was sent.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] with the service's message (or a generic
    /// payment/stock message) when the purchase is refused.
    #[instrument(skip_all, fields(email = %customer.email, lines = lines.len()))]
    pub async fn create(
        &self,
        customer: &CustomerDetails,
        lines: &[CartLine],
        total: Price,
    ) -> Result<Order, ApiError> {
        let request = CheckoutRequest {
            user_email: customer.email.trim(),
            items: lines
                .iter()
                .map(|line| CheckoutItem {
                    product_id: line.product.id,
                    qty: line.quantity,
                    tipo: product_kind(line.product.category),
                    nombre: &line.product.name,
                    precio: line.product.price,
                })
                .collect(),
            sede: MAIN_BRANCH,
        };

        let url = format!("{}/checkout", self.inner.base_url);
        let http = self.inner.client.post(&url).json(&request);
        let response = authorize(http, self.token.as_ref()).send().await?;
        expect_success(response, CHECKOUT_FALLBACK).await?;

        let now = Utc::now();
        let order = Order {
            id: OrderId::at(now),
            date: now,
            customer: customer.clone(),
            items: lines.to_vec(),
            total,
            status: OrderStatus::Completed,
        };
        info!(order_id = %order.id, total = %order.total, "Order placed");
        Ok(order)
    }

    /// Every order the service has recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Order>, ApiError> {
        let url = format!("{}/orders", self.inner.base_url);
        let request = self.inner.client.get(&url);
        let response = authorize(request, self.token.as_ref()).send().await?;
        let data: Vec<BackendOrder> = decode(response, "Error al cargar las órdenes").await?;
        Ok(data.into_iter().map(order_from_backend).collect())
    }

    /// One order, looked up in the listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no order has `id`.
    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Order, ApiError> {
        self.list()
            .await?
            .into_iter()
            .find(|order| order.id.as_str() == id)
            .ok_or_else(|| ApiError::NotFound(format!("Orden {id}")))
    }
}

impl std::fmt::Debug for OrderClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderClient")
            .field("base_url", &self.inner.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}
