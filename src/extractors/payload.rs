//! Request body bound from JSON or from a urlencoded form, chosen by `Content-Type`.
//!
//! An empty body binds nothing: the target is built from an empty object, so inserts get
//! their defaults and patches change no field.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    body::{Body, Bytes},
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form, Json,
};
use serde::de::DeserializeOwned;

#[derive(Debug)]
pub struct Payload<T>(pub T);

fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

#[async_trait]
impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().clone();
        let headers = req.headers().clone();
        // honours `DefaultBodyLimit`
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::Bind(e.body_text()))?;

        if bytes.is_empty() {
            let value = serde_json::from_str("{}").map_err(|e| AppError::Bind(e.to_string()))?;
            return Ok(Payload(value));
        }

        let mut req = Request::new(Body::from(bytes));
        *req.method_mut() = method;
        *req.headers_mut() = headers;

        if is_form(req.headers()) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::Bind(e.body_text()))?;
            Ok(Payload(value))
        } else {
            let Json(value) = Json::<T>::from_request(req, state)
                .await
                .map_err(|e| AppError::Bind(e.body_text()))?;
            Ok(Payload(value))
        }
    }
}
