//! Request types for the clients and the backend wire records.
//!
//! The backend speaks Spanish field names (`nombre`, `precio`, ...). Those
//! records stay private to the `api` module; callers only see the core
//! domain types and the request structs below.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};

use gymtastic_core::validation::RegistrationForm;
use gymtastic_core::{Category, Price, ProductId, Stock, User};

// =============================================================================
// Public request types
// =============================================================================

/// A product to add to the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub image: String,
    pub price: Price,
    pub stock: Stock,
    pub category: Category,
}

/// Partial product edit. `None` leaves a field as it is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<Price>,
    pub stock: Option<Stock>,
    pub category: Option<Category>,
}

/// New account sent to the registration endpoint.
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl RegisterRequest {
    /// Build the request from a validated registration form. The account
    /// name is the first name and surnames joined by a space.
    #[must_use]
    pub fn from_form(form: &RegistrationForm) -> Self {
        Self {
            name: format!("{} {}", form.name.trim(), form.surnames.trim()),
            email: form.email.trim().to_owned(),
            password: SecretString::from(form.password.clone()),
        }
    }
}

/// Profile fields a user can edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub avatar_uri: Option<String>,
}

/// Result of a successful login.
pub struct LoginSession {
    /// Bearer token for protected calls, when the service issued one.
    pub token: Option<SecretString>,
    pub user: User,
}

impl std::fmt::Debug for LoginSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginSession")
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("user", &self.user)
            .finish()
    }
}

// =============================================================================
// Wire records
// =============================================================================

/// Catalog record as the product service returns it.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct BackendProduct {
    pub id: ProductId,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    pub precio: Price,
    #[serde(default)]
    pub stock: Option<i64>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
}

/// Catalog record as the product service accepts it on create and update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub(super) struct ProductPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precio: Option<Price>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<&'static str>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct StockItem {
    pub product_id: ProductId,
    pub qty: u32,
}

#[derive(Debug, Serialize)]
pub(super) struct DecrementStockRequest {
    pub items: Vec<StockItem>,
}

/// Account record as the user service returns it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BackendUser {
    pub email: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub rol: Option<String>,
    #[serde(default)]
    pub fono: Option<String>,
    #[serde(default)]
    pub avatar_uri: Option<String>,
    #[serde(default)]
    pub plan_end_millis: Option<i64>,
}

#[derive(Serialize)]
pub(super) struct LoginRequest<'a> {
    pub email: &'a str,
    #[serde(serialize_with = "expose")]
    pub password: &'a SecretString,
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginResponse {
    #[serde(default)]
    pub token: Option<String>,
    pub user: Option<BackendUser>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Serialize)]
pub(super) struct RegisterPayload<'a> {
    pub nombre: &'a str,
    pub email: &'a str,
    #[serde(serialize_with = "expose")]
    pub password: &'a SecretString,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProfilePayload<'a> {
    pub nombre: Option<&'a str>,
    pub fono: Option<&'a str>,
    pub bio: &'static str,
    pub avatar_uri: Option<&'a str>,
}

/// Gym branch attached to every checkout.
#[derive(Debug, Clone, Serialize)]
pub(super) struct Branch {
    pub id: u32,
    pub nombre: &'static str,
    pub direccion: &'static str,
    pub lat: f64,
    pub lng: f64,
}

/// The only branch the checkout service knows.
pub(super) const MAIN_BRANCH: Branch = Branch {
    id: 1,
    nombre: "Sede Central",
    direccion: "Av Siempre Viva",
    lat: -33.4,
    lng: -70.6,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CheckoutItem<'a> {
    pub product_id: ProductId,
    pub qty: u32,
    pub tipo: &'static str,
    pub nombre: &'a str,
    pub precio: Price,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CheckoutRequest<'a> {
    pub user_email: &'a str,
    pub items: Vec<CheckoutItem<'a>>,
    pub sede: Branch,
}

/// Order ids come back as numbers from some deployments and strings from
/// others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(super) enum BackendOrderId {
    Number(i64),
    Text(String),
}

impl std::fmt::Display for BackendOrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Order summary as the checkout service lists it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct BackendOrder {
    pub id: BackendOrderId,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub total_amount: Price,
    #[serde(default)]
    pub user_email: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub items_count: Option<u32>,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn expose<S: Serializer>(secret: &&SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}
