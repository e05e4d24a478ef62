//! Catalog browsing and the region lookup.

use gymtastic_core::{Category, ProductId, location};
use gymtastic_storefront::AppError;

use super::Context;
use crate::output;

/// List the catalog, optionally one category.
pub async fn list(ctx: &Context, category: Option<Category>) -> Result<(), AppError> {
    let session = ctx.session();
    let client = ctx.products(&session);
    let products = match category {
        Some(category) => client.by_category(category).await?,
        None => client.list().await?.to_vec(),
    };
    output::products(&products);
    Ok(())
}

pub async fn show(ctx: &Context, id: ProductId) -> Result<(), AppError> {
    let session = ctx.session();
    let product = ctx.products(&session).get(id).await?;
    output::product(&product);
    Ok(())
}

pub fn regions() {
    output::list(&location::regions());
}

pub fn communes(region: &str) -> Result<(), AppError> {
    let communes = location::communes(region);
    if communes.is_empty() {
        return Err(AppError::BadRequest(format!("La región {region} no existe.")));
    }
    output::list(&communes);
    Ok(())
}
