//! Catalog API: REST backend for users and the products they own, on PostgreSQL.

pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod migration;
pub mod models;
pub mod response;
pub mod routes;
pub mod sql;
pub mod state;
pub mod store;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError, StoreError};
pub use migration::ensure_schema;
pub use routes::{app, common_routes, entity_routes, ApiDoc};
pub use state::AppState;
pub use store::{connect, ensure_database_exists, Gateway, PgGateway};
