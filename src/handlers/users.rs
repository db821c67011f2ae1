//! User CRUD handlers.

use crate::error::AppError;
use crate::extractors::{Payload, RecordId};
use crate::models::{NewUser, User, UserPatch};
use crate::response::{self, MessageBody};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse};

#[utoipa::path(
    post,
    path = "/users",
    request_body = NewUser,
    responses(
        (status = 201, description = "User inserted"),
        (status = 400, description = "Body could not be bound", body = MessageBody),
        (status = 500, description = "Insert failed, including duplicate email", body = MessageBody)
    ),
    tag = "users"
)]
pub async fn create(
    State(state): State<AppState>,
    Payload(new): Payload<NewUser>,
) -> Result<impl IntoResponse, AppError> {
    let user = state.gateway.insert_user(&new).await.map_err(AppError::Insert)?;
    tracing::info!(id = user.id, "user created");
    Ok(response::created(user))
}

#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "All live users", body = [User]),
        (status = 500, description = "Read failed", body = MessageBody)
    ),
    tag = "users"
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = state.gateway.list_users().await.map_err(AppError::Read)?;
    Ok(response::success(users))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 400, description = "Id is not a number", body = MessageBody),
        (status = 404, description = "No live user with this id", body = MessageBody)
    ),
    tag = "users"
)]
pub async fn read(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let user = state
        .gateway
        .find_user(id)
        .await
        .map_err(AppError::Read)?
        .ok_or(AppError::NotFound("user"))?;
    Ok(response::success(user))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User id")),
    request_body = UserPatch,
    responses(
        (status = 200, description = "Present fields updated", body = MessageBody),
        (status = 400, description = "Bad id, bad body or no live user with this id", body = MessageBody),
        (status = 500, description = "Update failed", body = MessageBody)
    ),
    tag = "users"
)]
pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    Payload(patch): Payload<UserPatch>,
) -> Result<impl IntoResponse, AppError> {
    let affected = state.gateway.update_user(id, &patch).await.map_err(AppError::Update)?;
    if affected == 0 {
        return Err(AppError::RecordNotFound);
    }
    Ok(response::success_message())
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(("user_id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User soft-deleted", body = MessageBody),
        (status = 400, description = "Bad id or no live user with this id", body = MessageBody),
        (status = 500, description = "Delete failed", body = MessageBody)
    ),
    tag = "users"
)]
pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> Result<impl IntoResponse, AppError> {
    let affected = state.gateway.delete_user(id).await.map_err(AppError::Delete)?;
    if affected == 0 {
        return Err(AppError::RecordNotFound);
    }
    tracing::info!(id, "user deleted");
    Ok(response::success_message())
}
