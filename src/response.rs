//! Standard response envelope helpers.

use axum::{http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

pub const INSERT_SUCCESS: &str = "insert success";
pub const SUCCESS: &str = "success";

/// Body of every response without a payload, errors included.
#[derive(Serialize, ToSchema)]
pub struct MessageBody {
    pub message: String,
}

#[derive(Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    pub data: T,
}

/// 201 with the persisted record.
pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::CREATED,
        Json(Envelope {
            message: INSERT_SUCCESS,
            data,
        }),
    )
}

/// 200 with a single record or a list.
pub fn success<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::OK,
        Json(Envelope {
            message: SUCCESS,
            data,
        }),
    )
}

/// 200 with only `{"message": "success"}`.
pub fn success_message() -> (StatusCode, Json<MessageBody>) {
    (
        StatusCode::OK,
        Json(MessageBody {
            message: SUCCESS.to_string(),
        }),
    )
}
