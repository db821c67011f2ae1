//! Product CRUD handlers. Reads embed the owning user.

use crate::error::AppError;
use crate::extractors::{Payload, RecordId};
use crate::models::{NewProduct, Product, ProductPatch};
use crate::response::{self, MessageBody};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

/// The owner is not looked up first; a dangling `user_id` fails on the foreign key.
#[utoipa::path(
    post,
    path = "/products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Product inserted"),
        (status = 400, description = "Body could not be bound", body = MessageBody),
        (status = 500, description = "Insert failed", body = MessageBody)
    ),
    tag = "products"
)]
pub async fn create(
    State(state): State<AppState>,
    Payload(new): Payload<NewProduct>,
) -> Result<impl IntoResponse, AppError> {
    let product = state.gateway.insert_product(&new).await.map_err(AppError::Insert)?;
    tracing::info!(id = product.id, user_id = product.user_id, "product created");
    Ok(response::created(product))
}

#[utoipa::path(
    get,
    path = "/products",
    responses(
        (status = 200, description = "All live products with their owner", body = [Product]),
        (status = 500, description = "Read failed", body = MessageBody)
    ),
    tag = "products"
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let products = state.gateway.list_products().await.map_err(AppError::Read)?;
    Ok(response::success(products))
}

#[utoipa::path(
    get,
    path = "/products/{product_id}",
    params(("product_id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product with its owner", body = Product),
        (status = 400, description = "Id is not a number", body = MessageBody),
        (status = 404, description = "No live product with this id", body = MessageBody)
    ),
    tag = "products"
)]
pub async fn read(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let product = state
        .gateway
        .find_product(id)
        .await
        .map_err(AppError::Read)?
        .ok_or(AppError::NotFound("product"))?;
    Ok(response::success(product))
}

#[utoipa::path(
    put,
    path = "/products/{product_id}",
    params(("product_id" = i64, Path, description = "Product id")),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "Present fields updated", body = MessageBody),
        (status = 400, description = "Bad id, bad body or no live product with this id", body = MessageBody),
        (status = 500, description = "Update failed", body = MessageBody)
    ),
    tag = "products"
)]
pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Payload(patch): Payload<ProductPatch>,
) -> Result<impl IntoResponse, AppError> {
    let affected = state
        .gateway
        .update_product(id, &patch)
        .await
        .map_err(AppError::Update)?;
    if affected == 0 {
        return Err(AppError::RecordNotFound);
    }
    Ok(response::success_message())
}

#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    params(("product_id" = i64, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product soft-deleted", body = MessageBody),
        (status = 400, description = "Bad id or no live product with this id", body = MessageBody),
        (status = 500, description = "Delete failed", body = MessageBody)
    ),
    tag = "products"
)]
pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let affected = state.gateway.delete_product(id).await.map_err(AppError::Delete)?;
    if affected == 0 {
        return Err(AppError::RecordNotFound);
    }
    Ok(response::success_message())
}
