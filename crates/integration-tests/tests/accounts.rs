//! Login, registration and account management against the mock backend.
//!
//! Run with: cargo test -p gymtastic-integration-tests --test accounts

#![allow(clippy::unwrap_used)]

use secrecy::{ExposeSecret, SecretString};

use gymtastic_core::validation::{RegistrationForm, validate_registration};
use gymtastic_core::{Email, Role};
use gymtastic_integration_tests::{
    ADMIN_EMAIL, ADMIN_PASSWORD, ADMIN_TOKEN, CUSTOMER_EMAIL, CUSTOMER_PASSWORD, MockBackend,
};
use gymtastic_storefront::api::{ApiError, ProfileUpdate, RegisterRequest, UserClient};
use gymtastic_storefront::{AccessError, FileStorage, SessionStore};

fn client(backend: &MockBackend) -> UserClient {
    let api = backend.api_config();
    UserClient::new(&api.users_url, &api.login_url, &api.register_url)
}

fn admin_client(backend: &MockBackend) -> UserClient {
    client(backend).with_token(Some(SecretString::from(ADMIN_TOKEN)))
}

fn password(value: &str) -> SecretString {
    SecretString::from(value.to_string())
}

#[tokio::test]
async fn test_login_returns_user_and_token() {
    let backend = MockBackend::start().await;
    let login = client(&backend)
        .login(ADMIN_EMAIL, &password(ADMIN_PASSWORD))
        .await
        .unwrap();

    assert_eq!(login.user.email.as_str(), ADMIN_EMAIL);
    assert_eq!(login.user.name, "Administrador");
    assert_eq!(login.user.role, Role::Admin);
    assert_eq!(login.token.unwrap().expose_secret(), ADMIN_TOKEN);
}

#[tokio::test]
async fn test_login_maps_lowercase_customer_role() {
    let backend = MockBackend::start().await;
    let login = client(&backend)
        .login(&format!("  {CUSTOMER_EMAIL} "), &password(CUSTOMER_PASSWORD))
        .await
        .unwrap();

    assert_eq!(login.user.role, Role::Customer);
    assert_eq!(login.user.phone.as_deref(), Some("+56911112222"));
}

#[tokio::test]
async fn test_login_rejection_carries_backend_message() {
    let backend = MockBackend::start().await;
    let result = client(&backend)
        .login(ADMIN_EMAIL, &password("incorrecta"))
        .await;

    match result {
        Err(ApiError::Unauthorized(message)) => assert_eq!(message, "Credenciales inválidas"),
        other => panic!("expected Unauthorized, got {other:?}"),
    }
}

#[tokio::test]
async fn test_session_survives_restart() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();

    let login = client(&backend)
        .login(ADMIN_EMAIL, &password(ADMIN_PASSWORD))
        .await
        .unwrap();
    let mut session = SessionStore::open(FileStorage::new(dir.path()));
    session.login_with_token(login.user, login.token.unwrap());
    assert!(session.is_authenticated());

    let reopened = SessionStore::open(FileStorage::new(dir.path()));
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.require_role(Role::Admin).unwrap().email.as_str(), ADMIN_EMAIL);
    assert_eq!(reopened.token().unwrap().expose_secret(), ADMIN_TOKEN);

    let mut reopened = reopened;
    reopened.logout();
    let after_logout = SessionStore::open(FileStorage::new(dir.path()));
    assert_eq!(after_logout.require_role(Role::Customer), Err(AccessError::NotAuthenticated));
    assert!(after_logout.token().is_none());
}

#[tokio::test]
async fn test_customer_cannot_pass_admin_check() {
    let backend = MockBackend::start().await;
    let dir = tempfile::tempdir().unwrap();

    let login = client(&backend)
        .login(CUSTOMER_EMAIL, &password(CUSTOMER_PASSWORD))
        .await
        .unwrap();
    let mut session = SessionStore::open(FileStorage::new(dir.path()));
    session.login(login.user);

    assert_eq!(session.require_role(Role::Admin), Err(AccessError::Forbidden));
    assert!(session.require_role(Role::Customer).is_ok());
}

#[tokio::test]
async fn test_register_then_login() {
    let backend = MockBackend::start().await;
    let form = RegistrationForm {
        name: "Juan".to_string(),
        surnames: "Pérez Soto".to_string(),
        email: "juan@test.com".to_string(),
        password: "secreto1".to_string(),
        confirm_password: "secreto1".to_string(),
    };
    validate_registration(&form).unwrap();

    let users = client(&backend);
    users.register(&RegisterRequest::from_form(&form)).await.unwrap();
    assert!(backend.has_account("juan@test.com"));

    let login = users
        .login("juan@test.com", &password("secreto1"))
        .await
        .unwrap();
    assert_eq!(login.user.name, "Juan Pérez Soto");
    assert_eq!(login.user.role, Role::Customer);
}

#[tokio::test]
async fn test_register_duplicate_email_surfaces_backend_message() {
    let backend = MockBackend::start().await;
    let request = RegisterRequest {
        name: "Otro Admin".to_string(),
        email: ADMIN_EMAIL.to_string(),
        password: password("secreto1"),
    };

    let error = client(&backend).register(&request).await.unwrap_err();
    assert!(matches!(error, ApiError::Api { status: 409, .. }));
    assert_eq!(error.backend_message(), Some("El correo ya está registrado"));
}

#[tokio::test]
async fn test_list_and_find_users() {
    let backend = MockBackend::start().await;
    let users = admin_client(&backend);

    let all = users.list().await.unwrap();
    assert_eq!(all.len(), 2);

    let found = users.find_by_email("SOCIO@GYM.COM").await.unwrap();
    assert_eq!(found.email.as_str(), CUSTOMER_EMAIL);

    assert!(matches!(
        users.find_by_email("nadie@gym.com").await,
        Err(ApiError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_update_profile() {
    let backend = MockBackend::start().await;
    let email = Email::parse(CUSTOMER_EMAIL).unwrap();
    let update = ProfileUpdate {
        name: Some("Socio Renovado".to_string()),
        phone: None,
        avatar_uri: Some("https://cdn.gym.cl/avatar.png".to_string()),
    };

    let updated = admin_client(&backend)
        .update_profile(&email, &update)
        .await
        .unwrap();

    assert_eq!(updated.name, "Socio Renovado");
    assert_eq!(updated.phone.as_deref(), Some("+56911112222"));
    assert_eq!(
        updated.avatar_uri.as_deref(),
        Some("https://cdn.gym.cl/avatar.png")
    );
}

#[tokio::test]
async fn test_delete_user() {
    let backend = MockBackend::start().await;
    let users = admin_client(&backend);
    let email = Email::parse(CUSTOMER_EMAIL).unwrap();

    users.delete(&email).await.unwrap();
    assert!(!backend.has_account(CUSTOMER_EMAIL));

    assert!(matches!(users.delete(&email).await, Err(ApiError::NotFound(_))));
}
