//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional; the defaults point at the local development services.
//!
//! - `GYM_PRODUCTS_API_URL` - Catalog service (default: `http://localhost:8081/products`)
//! - `GYM_USERS_API_URL` - User service (default: `http://localhost:8082/users`)
//! - `GYM_LOGIN_API_URL` - Login endpoint (default: `http://localhost:8083/login`)
//! - `GYM_REGISTER_API_URL` - Registration endpoint (default: `http://localhost:8084/register`)
//! - `GYM_CHECKOUT_API_URL` - Checkout service base (default: `http://localhost:8086`)
//! - `GYM_DATA_DIR` - Directory for the cart and session snapshots (default: `.gymtastic`)
//! - `GYM_CATALOG_CACHE_TTL_SECS` - Catalog cache lifetime (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_PRODUCTS_URL: &str = "http://localhost:8081/products";
const DEFAULT_USERS_URL: &str = "http://localhost:8082/users";
const DEFAULT_LOGIN_URL: &str = "http://localhost:8083/login";
const DEFAULT_REGISTER_URL: &str = "http://localhost:8084/register";
const DEFAULT_CHECKOUT_URL: &str = "http://localhost:8086";
const DEFAULT_DATA_DIR: &str = ".gymtastic";
const DEFAULT_CATALOG_TTL_SECS: u64 = 300;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Service endpoints
    pub api: ApiConfig,
    /// Where the cart and session snapshots are written
    pub data_dir: PathBuf,
    /// How long a fetched catalog is reused
    pub catalog_cache_ttl: Duration,
}

/// Backend service endpoints.
///
/// Stored without a trailing slash so paths can be appended directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub products_url: String,
    pub users_url: String,
    pub login_url: String,
    pub register_url: String,
    pub checkout_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            products_url: DEFAULT_PRODUCTS_URL.to_owned(),
            users_url: DEFAULT_USERS_URL.to_owned(),
            login_url: DEFAULT_LOGIN_URL.to_owned(),
            register_url: DEFAULT_REGISTER_URL.to_owned(),
            checkout_url: DEFAULT_CHECKOUT_URL.to_owned(),
        }
    }
}

impl ApiConfig {
    /// Point every service at one base URL, the way a single gateway or a
    /// test server exposes them.
    #[must_use]
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            products_url: format!("{base}/products"),
            users_url: format!("{base}/users"),
            login_url: format!("{base}/login"),
            register_url: format!("{base}/register"),
            checkout_url: base.to_owned(),
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            products_url: get_url("GYM_PRODUCTS_API_URL", DEFAULT_PRODUCTS_URL)?,
            users_url: get_url("GYM_USERS_API_URL", DEFAULT_USERS_URL)?,
            login_url: get_url("GYM_LOGIN_API_URL", DEFAULT_LOGIN_URL)?,
            register_url: get_url("GYM_REGISTER_API_URL", DEFAULT_REGISTER_URL)?,
            checkout_url: get_url("GYM_CHECKOUT_API_URL", DEFAULT_CHECKOUT_URL)?,
        })
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            catalog_cache_ttl: Duration::from_secs(DEFAULT_CATALOG_TTL_SECS),
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a URL does not parse or the cache TTL is not
    /// a whole number of seconds.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api = ApiConfig::from_env()?;
        let data_dir = PathBuf::from(get_env_or_default("GYM_DATA_DIR", DEFAULT_DATA_DIR));
        let ttl = get_env_or_default(
            "GYM_CATALOG_CACHE_TTL_SECS",
            &DEFAULT_CATALOG_TTL_SECS.to_string(),
        )
        .parse::<u64>()
        .map_err(|e| {
            ConfigError::InvalidEnvVar("GYM_CATALOG_CACHE_TTL_SECS".to_string(), e.to_string())
        })?;

        Ok(Self {
            api,
            data_dir,
            catalog_cache_ttl: Duration::from_secs(ttl),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an HTTP(S) URL from the environment, normalized without a trailing
/// slash.
fn get_url(key: &str, default: &str) -> Result<String, ConfigError> {
    let value = get_env_or_default(key, default);
    validate_url(&value).map_err(|reason| ConfigError::InvalidEnvVar(key.to_string(), reason))
}

fn validate_url(value: &str) -> Result<String, String> {
    let url = Url::parse(value.trim()).map_err(|e| e.to_string())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(format!("unsupported scheme '{}'", url.scheme()));
    }
    Ok(url.as_str().trim_end_matches('/').to_owned())
}
