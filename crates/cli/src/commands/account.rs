//! Login, registration and profile commands.

use secrecy::SecretString;

use gymtastic_core::validation::{RegistrationForm, validate_login, validate_registration};
use gymtastic_storefront::AppError;
use gymtastic_storefront::api::{ProfileUpdate, RegisterRequest};
use gymtastic_storefront::session::AccessError;

use super::Context;
use crate::output;

pub async fn login(ctx: &Context, email: &str, password: String) -> Result<(), AppError> {
    validate_login(email, &password)?;
    let password = SecretString::from(password);

    let mut session = ctx.session();
    let login = ctx.users(&session).login(email, &password).await?;
    match login.token {
        Some(token) => session.login_with_token(login.user, token),
        None => session.login(login.user),
    }

    if let Some(user) = session.user() {
        output::line(&format!("¡Bienvenido, {}!", user.name));
    }
    Ok(())
}

pub fn logout(ctx: &Context) {
    ctx.session().logout();
    output::line("Sesión cerrada.");
}

pub fn whoami(ctx: &Context) -> Result<(), AppError> {
    let session = ctx.session();
    let user = session.user().ok_or(AccessError::NotAuthenticated)?;
    output::user(user);
    Ok(())
}

/// Validate the form locally, then create the account.
pub async fn register(ctx: &Context, form: RegistrationForm) -> Result<(), AppError> {
    validate_registration(&form)?;
    let request = RegisterRequest::from_form(&form);

    let session = ctx.session();
    ctx.users(&session).register(&request).await?;
    output::line("Cuenta creada. Ya puedes iniciar sesión.");
    Ok(())
}

/// Edit the logged-in user's profile and refresh the stored session.
pub async fn update_profile(ctx: &Context, update: ProfileUpdate) -> Result<(), AppError> {
    let mut session = ctx.session();
    let email = session
        .user()
        .ok_or(AccessError::NotAuthenticated)?
        .email
        .clone();

    let updated = ctx.users(&session).update_profile(&email, &update).await?;
    let token = session.token().cloned();
    match token {
        Some(token) => session.login_with_token(updated, token),
        None => session.login(updated),
    }

    if let Some(user) = session.user() {
        output::user(user);
    }
    Ok(())
}
