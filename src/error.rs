//! Typed errors and HTTP mapping.

use crate::response::MessageBody;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// Startup configuration errors. All of them are fatal.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },
}

/// Errors raised by a [`Gateway`](crate::store::Gateway).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("duplicate key value violates unique constraint \"{0}\"")]
    UniqueViolation(String),
    #[error("insert or update violates foreign key constraint \"{0}\"")]
    ForeignKeyViolation(String),
    #[error("database: {0}")]
    Db(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error() {
            let constraint = db.constraint().unwrap_or("unknown").to_string();
            if db.is_unique_violation() {
                return StoreError::UniqueViolation(constraint);
            }
            if db.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation(constraint);
            }
        }
        StoreError::Db(e)
    }
}

/// Request-level errors. The display text is the `message` of the response body.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("error bind data. data not valid")]
    Bind(String),
    #[error("error. id should be number")]
    InvalidId,
    /// Update or delete matched no live row.
    #[error("error record not found")]
    RecordNotFound,
    /// Single read found nothing; carries the entity name.
    #[error("error {0} not found")]
    NotFound(&'static str),
    #[error("error insert data. insert failed")]
    Insert(#[source] StoreError),
    #[error("error read data")]
    Read(#[source] StoreError),
    #[error("error update {0}")]
    Update(#[source] StoreError),
    #[error("error delete {0}")]
    Delete(#[source] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Bind(_) | AppError::InvalidId | AppError::RecordNotFound => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Insert(_) | AppError::Read(_) | AppError::Update(_) | AppError::Delete(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            AppError::Bind(detail) => tracing::debug!(%detail, "request body rejected"),
            AppError::Insert(e) | AppError::Read(e) | AppError::Update(e) | AppError::Delete(e) => {
                tracing::error!(error = %e, "store error");
            }
            _ => {}
        }
        let body = MessageBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
