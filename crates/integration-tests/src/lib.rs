//! Integration test support for Gymtastic.
//!
//! [`MockBackend`] stands in for the catalog, user, login, registration and
//! checkout services on one ephemeral local port, speaking the same JSON the
//! real services do. Tests point the storefront clients at it through
//! [`MockBackend::api_config`] and inspect what it received afterwards.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p gymtastic-integration-tests
//! ```
//!
//! # Seed data
//!
//! | id | product          | stock     |
//! |----|------------------|-----------|
//! | 1  | Proteína Whey    | 10        |
//! | 2  | Plan Mensual     | unlimited |
//! | 3  | Polera Dry-Fit   | 2         |
//! | 4  | Mancuernas 10kg  | 0         |
//!
//! Accounts: `admin@gym.com` / `admin123` (admin, token `admin-token`) and
//! `socio@gym.com` / `socio123` (customer, token `socio-token`).

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::expect_used)]

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use gymtastic_storefront::ApiConfig;

pub const ADMIN_EMAIL: &str = "admin@gym.com";
pub const ADMIN_PASSWORD: &str = "admin123";
pub const ADMIN_TOKEN: &str = "admin-token";
pub const CUSTOMER_EMAIL: &str = "socio@gym.com";
pub const CUSTOMER_PASSWORD: &str = "socio123";
pub const CUSTOMER_TOKEN: &str = "socio-token";

/// Catalog record in the service's own shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: i32,
    pub nombre: String,
    pub descripcion: Option<String>,
    pub precio: f64,
    pub stock: Option<i64>,
    pub img: Option<String>,
    pub tipo: Option<String>,
}

#[derive(Debug, Clone)]
struct Account {
    email: String,
    nombre: String,
    password: String,
    rol: String,
    fono: Option<String>,
    avatar_uri: Option<String>,
    token: String,
}

impl Account {
    fn to_json(&self) -> Value {
        json!({
            "email": self.email,
            "nombre": self.nombre,
            "rol": self.rol,
            "fono": self.fono,
            "avatarUri": self.avatar_uri,
            "sedeId": 1,
            "sedeName": "Sede Central",
        })
    }
}

#[derive(Debug, Clone)]
struct OrderRecord {
    id: i64,
    user_email: String,
    total: f64,
    description: String,
    items_count: u32,
}

#[derive(Debug, Default)]
struct BackendState {
    products: Vec<ProductRecord>,
    accounts: Vec<Account>,
    orders: Vec<OrderRecord>,
    product_list_hits: usize,
    last_checkout: Option<Value>,
    last_product_write: Option<Value>,
}

type Shared = Arc<Mutex<BackendState>>;

fn lock(state: &Shared) -> MutexGuard<'_, BackendState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The backend services, served from one local port.
pub struct MockBackend {
    base_url: String,
    state: Shared,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Start a backend loaded with the seed data.
    pub async fn start() -> Self {
        let state: Shared = Arc::new(Mutex::new(seed()));

        let app = Router::new()
            .route("/products", get(list_products).post(create_product))
            .route("/products/decrement-stock", post(decrement_stock))
            .route("/products/{id}", put(update_product).delete(delete_product))
            .route("/login", post(login))
            .route("/register", post(register))
            .route("/users", get(list_users))
            .route("/users/{email}", delete(delete_user))
            .route("/users/{email}/profile", put(update_profile))
            .route("/checkout", post(checkout))
            .route("/orders", get(list_orders))
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock backend");
        let addr = listener.local_addr().expect("Mock backend has no address");

        let server = tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Mock backend stopped");
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
            server,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoints for every storefront client.
    #[must_use]
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::with_base(&self.base_url)
    }

    /// How many times the catalog listing was fetched.
    #[must_use]
    pub fn product_list_hits(&self) -> usize {
        lock(&self.state).product_list_hits
    }

    /// Body of the most recent checkout request.
    #[must_use]
    pub fn last_checkout(&self) -> Option<Value> {
        lock(&self.state).last_checkout.clone()
    }

    /// Body of the most recent product create or update.
    #[must_use]
    pub fn last_product_write(&self) -> Option<Value> {
        lock(&self.state).last_product_write.clone()
    }

    /// Stored stock of a product; `None` when unknown, `Some(None)` when
    /// unlimited.
    #[must_use]
    pub fn stock_of(&self, id: i32) -> Option<Option<i64>> {
        lock(&self.state)
            .products
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.stock)
    }

    pub fn set_stock(&self, id: i32, stock: Option<i64>) {
        if let Some(product) = lock(&self.state).products.iter_mut().find(|p| p.id == id) {
            product.stock = stock;
        }
    }

    #[must_use]
    pub fn order_count(&self) -> usize {
        lock(&self.state).orders.len()
    }

    #[must_use]
    pub fn has_account(&self, email: &str) -> bool {
        lock(&self.state)
            .accounts
            .iter()
            .any(|a| a.email.eq_ignore_ascii_case(email))
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

fn seed() -> BackendState {
    let product = |id, nombre: &str, descripcion: &str, precio, stock, img: &str, tipo: &str| {
        ProductRecord {
            id,
            nombre: nombre.to_owned(),
            descripcion: Some(descripcion.to_owned()),
            precio,
            stock,
            img: Some(img.to_owned()),
            tipo: Some(tipo.to_owned()),
        }
    };

    BackendState {
        products: vec![
            product(1, "Proteína Whey", "[Suplementos] Proteína de suero 2kg", 35990.0, Some(10), "/img/whey.jpg", "merch"),
            product(2, "Plan Mensual", "Acceso ilimitado al gimnasio", 25000.0, None, "https://cdn.gym.cl/plan.jpg", "plan"),
            product(3, "Polera Dry-Fit", "Polera de entrenamiento", 12990.0, Some(2), "polera.png", "merch"),
            product(4, "Mancuernas 10kg", "Par de mancuernas", 29990.0, Some(0), "/img/mancuernas.jpg", "merch"),
        ],
        accounts: vec![
            Account {
                email: ADMIN_EMAIL.to_owned(),
                nombre: "Administrador".to_owned(),
                password: ADMIN_PASSWORD.to_owned(),
                rol: "ADMIN".to_owned(),
                fono: None,
                avatar_uri: None,
                token: ADMIN_TOKEN.to_owned(),
            },
            Account {
                email: CUSTOMER_EMAIL.to_owned(),
                nombre: "Socio Fiel".to_owned(),
                password: CUSTOMER_PASSWORD.to_owned(),
                rol: "cliente".to_owned(),
                fono: Some("+56911112222".to_owned()),
                avatar_uri: None,
                token: CUSTOMER_TOKEN.to_owned(),
            },
        ],
        ..BackendState::default()
    }
}

// =============================================================================
// Handlers
// =============================================================================

type Reply = (StatusCode, Json<Value>);

fn message(status: StatusCode, text: &str) -> Reply {
    (status, Json(json!({ "message": text })))
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

fn require_admin(state: &BackendState, headers: &HeaderMap) -> Result<(), Reply> {
    let token = bearer(headers).ok_or_else(|| message(StatusCode::UNAUTHORIZED, "Token requerido"))?;
    let is_admin = state
        .accounts
        .iter()
        .any(|a| a.token == token && a.rol.eq_ignore_ascii_case("admin"));
    if is_admin {
        Ok(())
    } else {
        Err(message(StatusCode::FORBIDDEN, "Acceso denegado"))
    }
}

async fn list_products(State(state): State<Shared>) -> Json<Vec<ProductRecord>> {
    let mut state = lock(&state);
    state.product_list_hits += 1;
    Json(state.products.clone())
}

async fn create_product(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = lock(&state);
    if let Err(reply) = require_admin(&state, &headers) {
        return reply;
    }

    let id = state.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let mut record: ProductRecord = match serde_json::from_value(json!({ "id": id }).merged(&body)) {
        Ok(record) => record,
        Err(e) => return message(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    record.id = id;
    state.last_product_write = Some(body);
    state.products.push(record.clone());
    (StatusCode::CREATED, Json(json!(record)))
}

async fn update_product(
    State(state): State<Shared>,
    Path(id): Path<i32>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut state = lock(&state);
    if let Err(reply) = require_admin(&state, &headers) {
        return reply;
    }

    let Some(index) = state.products.iter().position(|p| p.id == id) else {
        return message(StatusCode::NOT_FOUND, "Producto no encontrado");
    };
    let current = json!(state.products.get(index).cloned());
    let record: ProductRecord = match serde_json::from_value(current.merged(&body)) {
        Ok(record) => record,
        Err(e) => return message(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    state.last_product_write = Some(body);
    if let Some(slot) = state.products.get_mut(index) {
        *slot = record.clone();
    }
    (StatusCode::OK, Json(json!(record)))
}

async fn delete_product(
    State(state): State<Shared>,
    Path(id): Path<i32>,
    headers: HeaderMap,
) -> StatusCode {
    let mut state = lock(&state);
    if let Err((status, _)) = require_admin(&state, &headers) {
        return status;
    }
    let before = state.products.len();
    state.products.retain(|p| p.id != id);
    if state.products.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StockItem {
    product_id: i32,
    qty: i64,
}

#[derive(Deserialize)]
struct StockRequest {
    items: Vec<StockItem>,
}

/// Check every line, then take them all out of stock. Unlimited products
/// never run out.
fn take_stock(state: &mut BackendState, items: &[StockItem]) -> Result<(), Reply> {
    for item in items {
        let Some(product) = state.products.iter().find(|p| p.id == item.product_id) else {
            return Err(message(StatusCode::NOT_FOUND, "Producto no encontrado"));
        };
        if product.stock.is_some_and(|stock| stock < item.qty) {
            return Err(message(
                StatusCode::CONFLICT,
                &format!("Stock insuficiente para {}", product.nombre),
            ));
        }
    }
    for item in items {
        if let Some(product) = state.products.iter_mut().find(|p| p.id == item.product_id)
            && let Some(stock) = product.stock.as_mut()
        {
            *stock -= item.qty;
        }
    }
    Ok(())
}

async fn decrement_stock(State(state): State<Shared>, Json(body): Json<StockRequest>) -> Reply {
    let mut state = lock(&state);
    match take_stock(&mut state, &body.items) {
        Ok(()) => (StatusCode::OK, Json(json!({ "success": true }))),
        Err(reply) => reply,
    }
}

#[derive(Deserialize)]
struct LoginBody {
    email: String,
    password: String,
}

async fn login(State(state): State<Shared>, Json(body): Json<LoginBody>) -> Reply {
    let state = lock(&state);
    let account = state
        .accounts
        .iter()
        .find(|a| a.email.eq_ignore_ascii_case(&body.email) && a.password == body.password);
    match account {
        Some(account) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "token": account.token,
                "user": account.to_json(),
            })),
        ),
        None => message(StatusCode::UNAUTHORIZED, "Credenciales inválidas"),
    }
}

#[derive(Deserialize)]
struct RegisterBody {
    nombre: String,
    email: String,
    password: String,
}

async fn register(State(state): State<Shared>, Json(body): Json<RegisterBody>) -> Reply {
    let mut state = lock(&state);
    if state.accounts.iter().any(|a| a.email.eq_ignore_ascii_case(&body.email)) {
        return message(StatusCode::CONFLICT, "El correo ya está registrado");
    }
    let token = format!("token-{}", state.accounts.len() + 1);
    state.accounts.push(Account {
        email: body.email,
        nombre: body.nombre,
        password: body.password,
        rol: "cliente".to_owned(),
        fono: None,
        avatar_uri: None,
        token,
    });
    (StatusCode::CREATED, Json(json!({ "success": true })))
}

async fn list_users(State(state): State<Shared>) -> Json<Vec<Value>> {
    let state = lock(&state);
    Json(state.accounts.iter().map(Account::to_json).collect())
}

async fn delete_user(State(state): State<Shared>, Path(email): Path<String>) -> StatusCode {
    let mut state = lock(&state);
    let before = state.accounts.len();
    state.accounts.retain(|a| !a.email.eq_ignore_ascii_case(&email));
    if state.accounts.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileBody {
    nombre: Option<String>,
    fono: Option<String>,
    avatar_uri: Option<String>,
}

async fn update_profile(
    State(state): State<Shared>,
    Path(email): Path<String>,
    Json(body): Json<ProfileBody>,
) -> Reply {
    let mut state = lock(&state);
    let Some(account) = state
        .accounts
        .iter_mut()
        .find(|a| a.email.eq_ignore_ascii_case(&email))
    else {
        return message(StatusCode::NOT_FOUND, "Usuario no encontrado");
    };
    if let Some(nombre) = body.nombre {
        account.nombre = nombre;
    }
    if body.fono.is_some() {
        account.fono = body.fono;
    }
    if body.avatar_uri.is_some() {
        account.avatar_uri = body.avatar_uri;
    }
    (StatusCode::OK, Json(account.to_json()))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutItem {
    product_id: i32,
    qty: i64,
    nombre: String,
    precio: f64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutBody {
    user_email: String,
    items: Vec<CheckoutItem>,
}

async fn checkout(State(state): State<Shared>, Json(raw): Json<Value>) -> Reply {
    let mut state = lock(&state);
    state.last_checkout = Some(raw.clone());

    let body: CheckoutBody = match serde_json::from_value(raw) {
        Ok(body) => body,
        Err(e) => return message(StatusCode::BAD_REQUEST, &e.to_string()),
    };
    let stock_items: Vec<StockItem> = body
        .items
        .iter()
        .map(|item| StockItem {
            product_id: item.product_id,
            qty: item.qty,
        })
        .collect();
    if let Err(reply) = take_stock(&mut state, &stock_items) {
        return reply;
    }

    #[allow(clippy::cast_precision_loss)]
    let total = body.items.iter().map(|i| i.precio * i.qty as f64).sum();
    let description = body
        .items
        .iter()
        .map(|i| format!("{} x{}", i.nombre, i.qty))
        .collect::<Vec<_>>()
        .join(", ");
    let id = 100 + i64::try_from(state.orders.len()).unwrap_or(0);
    state.orders.push(OrderRecord {
        id,
        user_email: body.user_email,
        total,
        description,
        items_count: u32::try_from(body.items.iter().map(|i| i.qty).sum::<i64>()).unwrap_or(0),
    });
    (StatusCode::CREATED, Json(json!({ "orderId": id })))
}

async fn list_orders(State(state): State<Shared>) -> Json<Vec<Value>> {
    let state = lock(&state);
    Json(
        state
            .orders
            .iter()
            .map(|o| {
                json!({
                    "id": o.id,
                    "date": "2024-07-05T10:30:00",
                    "totalAmount": o.total,
                    "userEmail": o.user_email,
                    "description": o.description,
                    "itemsCount": o.items_count,
                })
            })
            .collect(),
    )
}

/// Shallow JSON object merge, `other` winning.
trait Merge {
    fn merged(self, other: &Value) -> Value;
}

impl Merge for Value {
    fn merged(mut self, other: &Value) -> Value {
        if let (Some(target), Some(source)) = (self.as_object_mut(), other.as_object()) {
            for (key, value) in source {
                target.insert(key.clone(), value.clone());
            }
        }
        self
    }
}
