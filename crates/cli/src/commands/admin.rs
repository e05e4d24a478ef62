//! Back-office commands.
//!
//! Every command here requires a logged-in administrator.
//!
//! # Usage
//!
//! ```bash
//! gym admin products create -n "Creatina 300g" -d "Monohidrato" -p 15990 -s 40 -c suplementos
//! gym admin products update 3 --price 14990 --unlimited
//! gym admin users list
//! gym admin orders show 42
//! ```

use gymtastic_core::{Email, ProductId, Role};
use gymtastic_storefront::api::{NewProduct, ProductUpdate};
use gymtastic_storefront::{AppError, FileStorage, SessionStore};

use super::Context;
use crate::output;

/// Open the session and require the admin role.
fn admin_session(ctx: &Context) -> Result<SessionStore<FileStorage>, AppError> {
    let session = ctx.session();
    let admin = session.require_role(Role::Admin)?;
    tracing::debug!(email = %admin.email, "Admin session");
    Ok(session)
}

pub async fn create_product(ctx: &Context, product: &NewProduct) -> Result<(), AppError> {
    let session = admin_session(ctx)?;
    let created = ctx.products(&session).create(product).await?;
    output::line("Producto creado.");
    output::product(&created);
    Ok(())
}

pub async fn update_product(
    ctx: &Context,
    id: ProductId,
    update: &ProductUpdate,
) -> Result<(), AppError> {
    if update == &ProductUpdate::default() {
        return Err(AppError::BadRequest("No hay cambios que guardar.".to_string()));
    }
    let session = admin_session(ctx)?;
    let updated = ctx.products(&session).update(id, update).await?;
    output::line("Producto actualizado.");
    output::product(&updated);
    Ok(())
}

pub async fn delete_product(ctx: &Context, id: ProductId) -> Result<(), AppError> {
    let session = admin_session(ctx)?;
    ctx.products(&session).delete(id).await?;
    output::line(&format!("Producto {id} eliminado."));
    Ok(())
}

pub async fn list_users(ctx: &Context) -> Result<(), AppError> {
    let session = admin_session(ctx)?;
    let users = ctx.users(&session).list().await?;
    output::users(&users);
    Ok(())
}

pub async fn delete_user(ctx: &Context, email: &str) -> Result<(), AppError> {
    let email = Email::parse(email)
        .map_err(|e| AppError::BadRequest(format!("Correo inválido: {e}")))?;
    let session = admin_session(ctx)?;
    if session.user().is_some_and(|admin| admin.email.matches(email.as_str())) {
        return Err(AppError::BadRequest(
            "No puedes eliminar tu propia cuenta.".to_string(),
        ));
    }
    ctx.users(&session).delete(&email).await?;
    output::line(&format!("Usuario {email} eliminado."));
    Ok(())
}

pub async fn list_orders(ctx: &Context) -> Result<(), AppError> {
    let session = admin_session(ctx)?;
    let orders = ctx.orders(&session).list().await?;
    output::orders(&orders);
    Ok(())
}

pub async fn show_order(ctx: &Context, id: &str) -> Result<(), AppError> {
    let session = admin_session(ctx)?;
    let order = ctx.orders(&session).get(id).await?;
    output::order(&order);
    Ok(())
}
