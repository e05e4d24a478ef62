//! Unified error handling.
//!
//! Provides a unified `AppError` type for everything a storefront action can
//! fail with. Front ends show [`AppError::user_message`] and log the full
//! `Display` form.

use thiserror::Error;

use gymtastic_core::CartError;
use gymtastic_core::validation::{CustomerDetailsError, MissingCredentials, RegistrationError};

use crate::api::ApiError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::session::AccessError;
use crate::storage::StorageError;

/// Shown when the backend could not be reached or answered garbage.
const CONNECTION_MESSAGE: &str = "Error de conexión con el servidor";

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Local storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Cart rule violated.
    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    /// Role-gated action refused.
    #[error("Access error: {0}")]
    Access(#[from] AccessError),

    /// Registration form rejected.
    #[error("Validation error: {0}")]
    Registration(#[from] RegistrationError),

    /// Login form rejected.
    #[error("Validation error: {0}")]
    Login(#[from] MissingCredentials),

    /// Checkout details rejected.
    #[error("Validation error: {0}")]
    CustomerDetails(#[from] CustomerDetailsError),

    /// Backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Bad input from the user outside the forms above.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<CheckoutError> for AppError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::EmptyCart => Self::BadRequest(err.to_string()),
            CheckoutError::Validation(e) => Self::CustomerDetails(e),
            CheckoutError::Api(e) => Self::Api(e),
        }
    }
}

impl AppError {
    /// Message safe to show the shopper.
    ///
    /// Validation and access errors are already user-facing. Service errors
    /// show the backend's message when it sent one; transport and parse
    /// failures collapse to a generic connection message.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Config(_) | Self::Storage(_) => "Error interno de la aplicación".to_string(),
            Self::Cart(e) => e.to_string(),
            Self::Access(e) => e.to_string(),
            Self::Registration(e) => e.to_string(),
            Self::Login(e) => e.to_string(),
            Self::CustomerDetails(e) => e.to_string(),
            Self::Api(e) => match e {
                ApiError::Http(_) | ApiError::Parse(_) => CONNECTION_MESSAGE.to_string(),
                ApiError::NotFound(what) => format!("{what} no encontrado."),
                ApiError::Api { message, .. } | ApiError::Unauthorized(message) => message.clone(),
            },
            Self::BadRequest(message) => message.clone(),
        }
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let err = AppError::BadRequest("cantidad inválida".to_string());
        assert_eq!(err.to_string(), "Bad request: cantidad inválida");

        let err = AppError::from(AccessError::Forbidden);
        assert_eq!(
            err.to_string(),
            "Access error: No tienes permisos para acceder a esta sección."
        );
    }

    #[test]
    fn test_user_message_passes_validation_through() {
        let err = AppError::from(RegistrationError::PasswordMismatch);
        assert_eq!(err.user_message(), "Las contraseñas no coinciden.");

        let err = AppError::from(MissingCredentials);
        assert_eq!(err.user_message(), "Por favor, ingresa tu correo y contraseña.");
    }

    #[test]
    fn test_user_message_for_service_errors() {
        let err = AppError::from(ApiError::Api {
            status: 409,
            message: "Stock insuficiente para Creatina".to_string(),
        });
        assert_eq!(err.user_message(), "Stock insuficiente para Creatina");

        let err = AppError::from(ApiError::Parse("expected value at line 1".to_string()));
        assert_eq!(err.user_message(), CONNECTION_MESSAGE);

        let err = AppError::from(ApiError::Unauthorized("Error de credenciales".to_string()));
        assert_eq!(err.user_message(), "Error de credenciales");
    }

    #[test]
    fn test_checkout_error_conversion() {
        let err = AppError::from(CheckoutError::EmptyCart);
        assert_eq!(err.user_message(), "Tu carrito está vacío.");

        let err = AppError::from(CheckoutError::Validation(CustomerDetailsError::MissingFields));
        assert!(matches!(err, AppError::CustomerDetails(_)));
    }
}
