//! Catalog service client.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use secrecy::SecretString;
use tracing::{debug, instrument};

use gymtastic_core::{Category, Product, ProductId};

use super::conversions::{new_product_payload, product_from_backend, update_payload};
use super::types::{BackendProduct, DecrementStockRequest, NewProduct, ProductUpdate, StockItem};
use super::{ApiError, authorize, decode, expect_success};

const CATALOG_KEY: &str = "catalog";

/// Client for the catalog service.
///
/// The full listing is cached for the configured TTL; every mutation
/// drops it. Clones share the cache.
#[derive(Clone)]
pub struct ProductClient {
    inner: Arc<ProductClientInner>,
    token: Option<SecretString>,
}

struct ProductClientInner {
    client: reqwest::Client,
    base_url: String,
    cache: Cache<&'static str, Arc<[Product]>>,
}

impl ProductClient {
    /// Create a client for the service at `products_url`.
    #[must_use]
    pub fn new(products_url: &str, cache_ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(cache_ttl)
            .build();

        Self {
            inner: Arc::new(ProductClientInner {
                client: reqwest::Client::new(),
                base_url: products_url.trim_end_matches('/').to_owned(),
                cache,
            }),
            token: None,
        }
    }

    /// Send `token` as a bearer token on protected calls.
    #[must_use]
    pub fn with_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }

    /// All catalog products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is not a product
    /// list.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Arc<[Product]>, ApiError> {
        if let Some(products) = self.inner.cache.get(&CATALOG_KEY).await {
            debug!("Cache hit for catalog");
            return Ok(products);
        }

        let response = self.inner.client.get(&self.inner.base_url).send().await?;
        let data: Vec<BackendProduct> = decode(response, "Error al cargar los productos").await?;
        let products: Arc<[Product]> = data.into_iter().map(product_from_backend).collect();
        debug!(count = products.len(), "Fetched catalog");

        self.inner
            .cache
            .insert(CATALOG_KEY, Arc::clone(&products))
            .await;

        Ok(products)
    }

    /// Drop the cached listing so the next [`list`](Self::list) refetches.
    pub async fn invalidate(&self) {
        self.inner.cache.invalidate(&CATALOG_KEY).await;
    }

    /// One product. The service has no single-product endpoint, so this
    /// searches the listing.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if no product has `id`.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: ProductId) -> Result<Product, ApiError> {
        self.list()
            .await?
            .iter()
            .find(|product| product.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("Producto {id}")))
    }

    /// Products in `category`.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing cannot be fetched.
    #[instrument(skip(self), fields(category = %category))]
    pub async fn by_category(&self, category: Category) -> Result<Vec<Product>, ApiError> {
        Ok(self
            .list()
            .await?
            .iter()
            .filter(|product| product.category == category)
            .cloned()
            .collect())
    }

    /// Add a product to the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the service rejects the product.
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(&self, product: &NewProduct) -> Result<Product, ApiError> {
        let request = self
            .inner
            .client
            .post(&self.inner.base_url)
            .json(&new_product_payload(product));
        let response = authorize(request, self.token.as_ref()).send().await?;
        let created: BackendProduct = decode(response, "Error al crear el producto").await?;

        self.invalidate().await;
        Ok(product_from_backend(created))
    }

    /// Edit a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, or another error if
    /// the service rejects the update.
    #[instrument(skip(self, update), fields(product_id = %id))]
    pub async fn update(&self, id: ProductId, update: &ProductUpdate) -> Result<Product, ApiError> {
        let url = format!("{}/{id}", self.inner.base_url);
        let request = self.inner.client.put(&url).json(&update_payload(update));
        let response = authorize(request, self.token.as_ref()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("Producto {id}")));
        }
        let updated: BackendProduct = decode(response, "Error al actualizar el producto").await?;

        self.invalidate().await;
        Ok(product_from_backend(updated))
    }

    /// Remove a product.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown id, or another error if
    /// the service refuses.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete(&self, id: ProductId) -> Result<(), ApiError> {
        let url = format!("{}/{id}", self.inner.base_url);
        let request = self.inner.client.delete(&url);
        let response = authorize(request, self.token.as_ref()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("Producto {id}")));
        }
        expect_success(response, "Error al eliminar el producto").await?;

        self.invalidate().await;
        Ok(())
    }

    /// Take `quantity` units of a product out of stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the service refuses, typically for lack of stock.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn decrement_stock(&self, id: ProductId, quantity: u32) -> Result<(), ApiError> {
        let url = format!("{}/decrement-stock", self.inner.base_url);
        let body = DecrementStockRequest {
            items: vec![StockItem {
                product_id: id,
                qty: quantity,
            }],
        };
        let request = self.inner.client.post(&url).json(&body);
        let response = authorize(request, self.token.as_ref()).send().await?;
        expect_success(response, "Stock insuficiente").await?;

        self.invalidate().await;
        Ok(())
    }
}

impl std::fmt::Debug for ProductClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductClient")
            .field("base_url", &self.inner.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}
