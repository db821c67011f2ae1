//! Common routes: health, readiness, version, OpenAPI document.

use crate::handlers::{products, users};
use crate::models::{NewProduct, NewUser, Product, ProductPatch, User, UserPatch};
use crate::response::MessageBody;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        users::create,
        users::list,
        users::read,
        users::update,
        users::delete,
        products::create,
        products::list,
        products::read,
        products::update,
        products::delete
    ),
    components(schemas(User, NewUser, UserPatch, Product, NewProduct, ProductPatch, MessageBody)),
    tags(
        (name = "users", description = "Users, soft-deleted on delete"),
        (name = "products", description = "Products owned by users")
    )
)]
pub struct ApiDoc;

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
}

#[derive(Serialize)]
struct ReadyBody {
    status: &'static str,
    database: &'static str,
}

async fn health() -> Json<HealthBody> {
    Json(HealthBody { status: "ok" })
}

async fn ready(State(state): State<AppState>) -> Result<Json<ReadyBody>, (StatusCode, Json<ReadyBody>)> {
    if let Err(e) = state.gateway.ping().await {
        tracing::warn!(error = %e, "readiness check failed");
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ReadyBody {
                status: "degraded",
                database: "unavailable",
            }),
        ));
    }
    Ok(Json(ReadyBody {
        status: "ok",
        database: "ok",
    }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// GET /health, /ready (with database check), /version, /openapi.json.
pub fn common_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/ready", get(ready))
        .route("/version", get(version))
        .route("/openapi.json", get(openapi))
        .with_state(state)
}
