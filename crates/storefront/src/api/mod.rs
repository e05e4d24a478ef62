//! REST clients for the gym backend services.
//!
//! # Architecture
//!
//! - One client per service: catalog, users, checkout
//! - The backend is the source of truth; only the catalog listing is cached,
//!   in memory via `moka`
//! - Backend records use Spanish field names and are mapped to the core
//!   domain types in [`conversions`]
//! - Calls are single attempts with no retry; failures surface once as
//!   [`ApiError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use gymtastic_storefront::api::ProductClient;
//!
//! let products = ProductClient::new(&config.api.products_url, config.catalog_cache_ttl);
//! for product in products.list().await?.iter() {
//!     println!("{} {}", product.name, product.price);
//! }
//! ```

mod conversions;
mod orders;
mod products;
mod types;
mod users;

pub use orders::OrderClient;
pub use products::ProductClient;
pub use types::{LoginSession, NewProduct, ProductUpdate, ProfileUpdate, RegisterRequest};
pub use users::UserClient;

use reqwest::{RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the backend services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Response body did not have the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials were rejected.
    #[error("{0}")]
    Unauthorized(String),
}

impl ApiError {
    /// Message the backend sent with a failure, if any.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } | Self::Unauthorized(message) => Some(message),
            _ => None,
        }
    }
}

/// Error body the services return on failure.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Attach the bearer token when there is one.
fn authorize(request: RequestBuilder, token: Option<&SecretString>) -> RequestBuilder {
    match token {
        Some(token) => request.bearer_auth(token.expose_secret()),
        None => request,
    }
}

/// Turn a non-success response into [`ApiError::Api`], preferring the
/// backend's `message` over `fallback`.
async fn api_error(response: Response, fallback: &str) -> ApiError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ApiError::Api {
        status,
        message: error_message(&body, fallback),
    }
}

fn error_message(body: &str, fallback: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| fallback.to_owned())
}

/// Check the status, then decode the JSON body.
async fn decode<T: serde::de::DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, ApiError> {
    if !response.status().is_success() {
        return Err(api_error(response, fallback).await);
    }
    response
        .json()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Check the status and discard the body.
async fn expect_success(response: Response, fallback: &str) -> Result<(), ApiError> {
    if !response.status().is_success() {
        return Err(api_error(response, fallback).await);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_backend() {
        assert_eq!(
            error_message(r#"{"message":"Stock insuficiente para Creatina"}"#, "fallback"),
            "Stock insuficiente para Creatina"
        );
    }

    #[test]
    fn test_error_message_falls_back() {
        assert_eq!(error_message("", "Error de credenciales"), "Error de credenciales");
        assert_eq!(error_message("<html>", "Error de credenciales"), "Error de credenciales");
        assert_eq!(error_message(r#"{"message":" "}"#, "fallback"), "fallback");
        assert_eq!(error_message(r#"{"error":"x"}"#, "fallback"), "fallback");
    }

    #[test]
    fn test_backend_message() {
        let err = ApiError::Api {
            status: 409,
            message: "Sin stock".to_owned(),
        };
        assert_eq!(err.backend_message(), Some("Sin stock"));
        assert_eq!(ApiError::NotFound("x".to_owned()).backend_message(), None);
    }
}
