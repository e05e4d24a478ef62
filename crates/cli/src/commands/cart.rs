//! Cart and checkout commands.

use gymtastic_core::format::format_currency;
use gymtastic_core::{CustomerDetails, ProductId, QuantityChange};
use gymtastic_storefront::{AppError, place_order};

use super::Context;
use crate::output;

pub fn show(ctx: &Context) {
    let cart = ctx.cart();
    output::cart(cart.lines(), cart.count(), cart.total_price());
}

/// Add a catalog product to the cart.
pub async fn add(ctx: &Context, id: ProductId, quantity: u32) -> Result<(), AppError> {
    let session = ctx.session();
    let product = ctx.products(&session).get(id).await?;

    let mut cart = ctx.cart();
    cart.add_to_cart(&product, quantity)?;
    output::line(&format!(
        "Agregado: {} x {}. Total del carrito: {}",
        quantity,
        product.name,
        format_currency(cart.total_price())
    ));
    Ok(())
}

pub fn update(ctx: &Context, id: ProductId, quantity: u32) -> Result<(), AppError> {
    let mut cart = ctx.cart();
    let change = cart.update_quantity(id, quantity);
    match change {
        QuantityChange::NotInCart => {
            return Err(AppError::BadRequest(format!(
                "El producto {id} no está en tu carrito."
            )));
        }
        QuantityChange::Removed => output::line("Producto eliminado del carrito."),
        QuantityChange::Set(_) | QuantityChange::Clamped { .. } => {
            if let Some(notice) = change.notice() {
                output::line(&notice);
            }
        }
    }
    output::cart(cart.lines(), cart.count(), cart.total_price());
    Ok(())
}

pub fn remove(ctx: &Context, id: ProductId) -> Result<(), AppError> {
    let mut cart = ctx.cart();
    if !cart.remove_from_cart(id) {
        return Err(AppError::BadRequest(format!(
            "El producto {id} no está en tu carrito."
        )));
    }
    output::cart(cart.lines(), cart.count(), cart.total_price());
    Ok(())
}

pub fn clear(ctx: &Context) {
    ctx.cart().clear_cart();
    output::line("Carrito vaciado.");
}

/// Pay for the cart.
pub async fn checkout(ctx: &Context, customer: &CustomerDetails) -> Result<(), AppError> {
    let session = ctx.session();
    let orders = ctx.orders(&session);
    let mut cart = ctx.cart();

    let order = place_order(&mut cart, &orders, customer).await?;
    output::line("¡Compra realizada con éxito!");
    output::order(&order);
    Ok(())
}
