//! Numeric record id from the single path parameter (`:user_id`, `:product_id`).

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::InvalidId)?;
        raw.parse().map(RecordId).map_err(|_| AppError::InvalidId)
    }
}
