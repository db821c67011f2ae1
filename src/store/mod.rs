//! Persistence gateway: one mapped statement per operation against users and products.
//!
//! Reads, updates and deletes only see live rows. `update_*` and `delete_*` return the
//! number of rows affected; 0 means no live row had that id.

#[cfg(test)]
pub mod memory;
pub mod postgres;

use crate::error::StoreError;
use crate::models::{NewProduct, NewUser, Product, ProductPatch, User, UserPatch};
use async_trait::async_trait;

pub use postgres::{connect, ensure_database_exists, PgGateway};

#[async_trait]
pub trait Gateway: Send + Sync {
    async fn insert_user(&self, new: &NewUser) -> Result<User, StoreError>;
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;
    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError>;
    async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<u64, StoreError>;
    async fn delete_user(&self, id: i64) -> Result<u64, StoreError>;

    async fn insert_product(&self, new: &NewProduct) -> Result<Product, StoreError>;
    /// All live products, each with its owner loaded.
    async fn list_products(&self) -> Result<Vec<Product>, StoreError>;
    /// The live product with `id`, with its owner loaded.
    async fn find_product(&self, id: i64) -> Result<Option<Product>, StoreError>;
    async fn update_product(&self, id: i64, patch: &ProductPatch) -> Result<u64, StoreError>;
    async fn delete_product(&self, id: i64) -> Result<u64, StoreError>;

    /// Readiness check.
    async fn ping(&self) -> Result<(), StoreError>;
}
