//! Cart checkout and order history against the mock backend.
//!
//! Run with: cargo test -p gymtastic-integration-tests --test checkout

#![allow(clippy::unwrap_used)]

use std::time::Duration;

use secrecy::SecretString;

use gymtastic_core::{CustomerDetails, OrderStatus, Price, ProductId};
use gymtastic_integration_tests::{ADMIN_TOKEN, CUSTOMER_EMAIL, CUSTOMER_TOKEN, MockBackend};
use gymtastic_storefront::api::{ApiError, OrderClient, ProductClient};
use gymtastic_storefront::{AppError, CartStore, CheckoutError, FileStorage, MemoryStorage, place_order};

fn products(backend: &MockBackend) -> ProductClient {
    ProductClient::new(&backend.api_config().products_url, Duration::from_secs(60))
}

fn orders(backend: &MockBackend, token: &str) -> OrderClient {
    OrderClient::new(&backend.api_config().checkout_url)
        .with_token(Some(SecretString::from(token.to_string())))
}

fn details() -> CustomerDetails {
    CustomerDetails {
        first_name: "Socio".to_string(),
        last_names: "Fiel".to_string(),
        email: CUSTOMER_EMAIL.to_string(),
        street: "Los crisantemos 123".to_string(),
        apartment: None,
        region: "Región Metropolitana de Santiago".to_string(),
        commune: "Cerrillos".to_string(),
    }
}

/// Two shirts and one monthly plan.
async fn fill_cart(backend: &MockBackend, cart: &mut CartStore<MemoryStorage>) {
    let catalog = products(backend);
    let shirt = catalog.get(ProductId::new(3)).await.unwrap();
    let plan = catalog.get(ProductId::new(2)).await.unwrap();
    cart.add_to_cart(&shirt, 2).unwrap();
    cart.add_to_cart(&plan, 1).unwrap();
}

#[tokio::test]
async fn test_checkout_submits_cart_and_clears_it() {
    let backend = MockBackend::start().await;
    let mut cart = CartStore::open(MemoryStorage::new());
    fill_cart(&backend, &mut cart).await;

    let order = place_order(&mut cart, &orders(&backend, CUSTOMER_TOKEN), &details())
        .await
        .unwrap();

    assert!(cart.is_empty());
    assert_eq!(order.status, OrderStatus::Completed);
    assert_eq!(order.total, Price::from_pesos(2 * 12_990 + 25_000));
    assert_eq!(order.item_count(), 3);
    assert_eq!(order.customer.email, CUSTOMER_EMAIL);

    assert_eq!(backend.order_count(), 1);
    assert_eq!(backend.stock_of(3), Some(Some(0)));
    assert_eq!(backend.stock_of(2), Some(None));
}

#[tokio::test]
async fn test_checkout_payload_shape() {
    let backend = MockBackend::start().await;
    let mut cart = CartStore::open(MemoryStorage::new());
    fill_cart(&backend, &mut cart).await;

    place_order(&mut cart, &orders(&backend, CUSTOMER_TOKEN), &details())
        .await
        .unwrap();

    let sent = backend.last_checkout().unwrap();
    assert_eq!(sent["userEmail"], CUSTOMER_EMAIL);
    assert_eq!(sent["sede"]["id"], 1);
    assert_eq!(sent["sede"]["nombre"], "Sede Central");

    let items = sent["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    let shirt = items.iter().find(|i| i["productId"] == 3).unwrap();
    assert_eq!(shirt["qty"], 2);
    assert_eq!(shirt["tipo"], "merch");
    assert_eq!(shirt["nombre"], "Polera Dry-Fit");
    let plan = items.iter().find(|i| i["productId"] == 2).unwrap();
    assert_eq!(plan["tipo"], "plan");
}

#[tokio::test]
async fn test_refused_checkout_keeps_cart() {
    let backend = MockBackend::start().await;
    let mut cart = CartStore::open(MemoryStorage::new());
    fill_cart(&backend, &mut cart).await;

    // Someone else bought a shirt after ours went into the cart.
    backend.set_stock(3, Some(1));

    let error = place_order(&mut cart, &orders(&backend, CUSTOMER_TOKEN), &details())
        .await
        .unwrap_err();

    assert!(matches!(
        &error,
        CheckoutError::Api(ApiError::Api { status: 409, .. })
    ));
    assert_eq!(cart.count(), 3);
    assert_eq!(backend.order_count(), 0);
    assert_eq!(
        AppError::from(error).user_message(),
        "Stock insuficiente para Polera Dry-Fit"
    );
}

#[tokio::test]
async fn test_invalid_details_never_reach_backend() {
    let backend = MockBackend::start().await;
    let mut cart = CartStore::open(MemoryStorage::new());
    fill_cart(&backend, &mut cart).await;

    let mut wrong_commune = details();
    wrong_commune.commune = "Arica".to_string();

    let error = place_order(&mut cart, &orders(&backend, CUSTOMER_TOKEN), &wrong_commune)
        .await
        .unwrap_err();

    assert!(matches!(error, CheckoutError::Validation(_)));
    assert!(backend.last_checkout().is_none());
    assert_eq!(cart.count(), 3);
}

#[tokio::test]
async fn test_cart_persists_across_restarts_until_checkout() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();

    let shirt = products(&backend).get(ProductId::new(3)).await.unwrap();
    let mut cart = CartStore::open(FileStorage::new(dir.path()));
    cart.add_to_cart(&shirt, 1).unwrap();

    let mut reopened = CartStore::open(FileStorage::new(dir.path()));
    assert_eq!(reopened.count(), 1);

    place_order(&mut reopened, &orders(&backend, CUSTOMER_TOKEN), &details())
        .await
        .unwrap();

    assert!(CartStore::open(FileStorage::new(dir.path())).is_empty());
}

#[tokio::test]
async fn test_orders_listing_after_checkout() {
    let backend = MockBackend::start().await;
    let mut cart = CartStore::open(MemoryStorage::new());
    fill_cart(&backend, &mut cart).await;
    place_order(&mut cart, &orders(&backend, CUSTOMER_TOKEN), &details())
        .await
        .unwrap();

    let admin_orders = orders(&backend, ADMIN_TOKEN);
    let listed = admin_orders.list().await.unwrap();
    assert_eq!(listed.len(), 1);

    let order = listed.first().unwrap();
    assert_eq!(order.id.as_str(), "100");
    assert_eq!(order.customer.email, CUSTOMER_EMAIL);
    assert_eq!(order.total, Price::from_pesos(50_980));
    assert_eq!(order.item_count(), 3);
    assert_eq!(order.date.to_rfc3339(), "2024-07-05T10:30:00+00:00");

    let fetched = admin_orders.get("100").await.unwrap();
    assert_eq!(fetched.id, order.id);
    assert!(matches!(
        admin_orders.get("999").await,
        Err(ApiError::NotFound(_))
    ));
}
