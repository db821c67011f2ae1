//! Router assembly.

mod common;
mod entity;

pub use common::{common_routes, ApiDoc};
pub use entity::entity_routes;

use crate::state::AppState;
use axum::{extract::DefaultBodyLimit, Router};
use tower_http::trace::TraceLayer;

/// Full application router: common routes, entity routes, request tracing and a body size limit.
/// Oversized bodies are rejected by the body extractor, so they answer like any bind error.
pub fn app(state: AppState, body_limit: usize) -> Router {
    Router::new()
        .merge(common_routes(state.clone()))
        .merge(entity_routes(state))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}
