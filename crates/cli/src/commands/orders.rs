//! Order history for the logged-in shopper.

use gymtastic_core::Order;
use gymtastic_storefront::AppError;
use gymtastic_storefront::api::ApiError;
use gymtastic_storefront::session::AccessError;

use super::Context;
use crate::output;

/// Orders placed with the logged-in user's email.
async fn own_orders(ctx: &Context) -> Result<Vec<Order>, AppError> {
    let session = ctx.session();
    let user = session.user().ok_or(AccessError::NotAuthenticated)?;
    let orders = ctx.orders(&session).list().await?;
    Ok(orders
        .into_iter()
        .filter(|order| user.email.matches(&order.customer.email))
        .collect())
}

pub async fn list(ctx: &Context) -> Result<(), AppError> {
    output::orders(&own_orders(ctx).await?);
    Ok(())
}

pub async fn show(ctx: &Context, id: &str) -> Result<(), AppError> {
    let order = own_orders(ctx)
        .await?
        .into_iter()
        .find(|order| order.id.as_str() == id)
        .ok_or_else(|| ApiError::NotFound(format!("Orden {id}")))?;
    output::order(&order);
    Ok(())
}
