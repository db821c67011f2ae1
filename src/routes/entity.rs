//! User and product CRUD routes.

use crate::handlers::{products, users};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn entity_routes(state: AppState) -> Router {
    Router::new()
        .route("/users", get(users::list).post(users::create))
        .route(
            "/users/:user_id",
            get(users::read).put(users::update).delete(users::delete),
        )
        .route("/products", get(products::list).post(products::create))
        .route(
            "/products/:product_id",
            get(products::read).put(products::update).delete(products::delete),
        )
        .with_state(state)
}
