//! User, login and registration client.

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::SecretString;
use tracing::{info, instrument, warn};

use gymtastic_core::{Email, User};

use super::conversions::user_from_backend;
use super::types::{
    BackendUser, LoginRequest, LoginResponse, LoginSession, ProfilePayload, ProfileUpdate,
    RegisterPayload, RegisterRequest,
};
use super::{ApiError, authorize, decode, error_message, expect_success};

const LOGIN_FALLBACK: &str = "Error de credenciales";
const REGISTER_FALLBACK: &str = "Error al registrar usuario";

/// Client for the account services: login, registration and the user
/// directory.
#[derive(Clone)]
pub struct UserClient {
    inner: Arc<UserClientInner>,
    token: Option<SecretString>,
}

struct UserClientInner {
    client: reqwest::Client,
    users_url: String,
    login_url: String,
    register_url: String,
}

impl UserClient {
    #[must_use]
    pub fn new(users_url: &str, login_url: &str, register_url: &str) -> Self {
        Self {
            inner: Arc::new(UserClientInner {
                client: reqwest::Client::new(),
                users_url: users_url.trim_end_matches('/').to_owned(),
                login_url: login_url.to_owned(),
                register_url: register_url.to_owned(),
            }),
            token: None,
        }
    }

    /// Send `token` as a bearer token on directory calls.
    #[must_use]
    pub fn with_token(mut self, token: Option<SecretString>) -> Self {
        self.token = token;
        self
    }

    /// Exchange credentials for a session.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] carrying the service's message
    /// (or "Error de credenciales") when the credentials are rejected.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginSession, ApiError> {
        let email = email.trim();
        let response = self
            .inner
            .client
            .post(&self.inner.login_url)
            .json(&LoginRequest { email, password })
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Login rejected");
            return Err(ApiError::Unauthorized(error_message(&body, LOGIN_FALLBACK)));
        }

        let login: LoginResponse =
            serde_json::from_str(&body).map_err(|e| ApiError::Parse(e.to_string()))?;
        let Some(user) = login.user else {
            return Err(ApiError::Unauthorized(
                login.message.unwrap_or_else(|| LOGIN_FALLBACK.to_owned()),
            ));
        };
        let user = user_from_backend(user)?;
        info!(email = %user.email, role = %user.role, "Login accepted");

        Ok(LoginSession {
            token: login.token.filter(|t| !t.is_empty()).map(SecretString::from),
            user,
        })
    }

    /// Create an account. New accounts are always customers.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Api`] carrying the service's message (or "Error
    /// al registrar usuario") when registration is refused.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let payload = RegisterPayload {
            nombre: &request.name,
            email: &request.email,
            password: &request.password,
        };
        let response = self
            .inner
            .client
            .post(&self.inner.register_url)
            .json(&payload)
            .send()
            .await?;
        expect_success(response, REGISTER_FALLBACK).await?;
        info!("Account registered");
        Ok(())
    }

    /// Every account. Records with an unusable email are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let request = self.inner.client.get(&self.inner.users_url);
        let response = authorize(request, self.token.as_ref()).send().await?;
        let data: Vec<BackendUser> = decode(response, "Error al cargar los usuarios").await?;

        Ok(data
            .into_iter()
            .filter_map(|record| match user_from_backend(record) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Skipping user record");
                    None
                }
            })
            .collect())
    }

    /// Look up an account by email, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if there is no such account.
    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<User, ApiError> {
        self.list()
            .await?
            .into_iter()
            .find(|user| user.email.matches(email))
            .ok_or_else(|| ApiError::NotFound(format!("Usuario {email}")))
    }

    /// Edit the profile of the account `email`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown account, or another
    /// error if the service refuses.
    #[instrument(skip(self, update), fields(email = %email))]
    pub async fn update_profile(
        &self,
        email: &Email,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        let url = format!("{}/{email}/profile", self.inner.users_url);
        let payload = ProfilePayload {
            nombre: update.name.as_deref(),
            fono: update.phone.as_deref(),
            bio: "",
            avatar_uri: update.avatar_uri.as_deref(),
        };
        let request = self.inner.client.put(&url).json(&payload);
        let response = authorize(request, self.token.as_ref()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("Usuario {email}")));
        }
        let updated: BackendUser = decode(response, "Error al actualizar el perfil").await?;
        user_from_backend(updated)
    }

    /// Delete the account `email`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown account, or another
    /// error if the service refuses.
    #[instrument(skip(self), fields(email = %email))]
    pub async fn delete(&self, email: &Email) -> Result<(), ApiError> {
        let url = format!("{}/{email}", self.inner.users_url);
        let request = self.inner.client.delete(&url);
        let response = authorize(request, self.token.as_ref()).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("Usuario {email}")));
        }
        expect_success(response, "Error al eliminar el usuario").await?;
        info!("Account deleted");
        Ok(())
    }
}

impl std::fmt::Debug for UserClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserClient")
            .field("users_url", &self.inner.users_url)
            .field("login_url", &self.inner.login_url)
            .field("register_url", &self.inner.register_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}
