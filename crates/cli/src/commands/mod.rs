//! Command implementations.
//!
//! Each command opens the containers it needs from the data directory and
//! builds clients carrying the session's bearer token.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod orders;

use gymtastic_storefront::api::{OrderClient, ProductClient, UserClient};
use gymtastic_storefront::{AppError, CartStore, FileStorage, SessionStore, StorefrontConfig};

/// Configuration plus the on-disk storage the containers share.
pub struct Context {
    config: StorefrontConfig,
    storage: FileStorage,
}

impl Context {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn load() -> Result<Self, AppError> {
        let config = StorefrontConfig::from_env()?;
        let storage = FileStorage::new(&config.data_dir);
        tracing::debug!(data_dir = %storage.dir().display(), "Loaded configuration");
        Ok(Self { config, storage })
    }

    pub fn cart(&self) -> CartStore<FileStorage> {
        CartStore::open(self.storage.clone())
    }

    pub fn session(&self) -> SessionStore<FileStorage> {
        SessionStore::open(self.storage.clone())
    }

    pub fn products(&self, session: &SessionStore<FileStorage>) -> ProductClient {
        ProductClient::new(
            &self.config.api.products_url,
            self.config.catalog_cache_ttl,
        )
        .with_token(session.token().cloned())
    }

    pub fn users(&self, session: &SessionStore<FileStorage>) -> UserClient {
        let api = &self.config.api;
        UserClient::new(&api.users_url, &api.login_url, &api.register_url)
            .with_token(session.token().cloned())
    }

    pub fn orders(&self, session: &SessionStore<FileStorage>) -> OrderClient {
        OrderClient::new(&self.config.api.checkout_url).with_token(session.token().cloned())
    }
}
