//! PostgreSQL gateway over a shared `PgPool`.

use super::Gateway;
use crate::error::StoreError;
use crate::migration;
use crate::models::{NewProduct, NewUser, Product, ProductPatch, User, UserPatch};
use crate::sql::{self, to_arguments, Include, QueryBuf};
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{ConnectOptions, FromRow, PgPool};
use std::str::FromStr;

/// Open the pool. Fails if the URL is invalid or the server is unreachable.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, StoreError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before [`connect`].
pub async fn ensure_database_exists(database_url: &str) -> Result<(), StoreError> {
    let (admin, db_name) = admin_options(database_url)?;
    let Some(db_name) = db_name.filter(|n| !n.is_empty() && n != "postgres") else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE \"{}\"", db_name.replace('"', "\"\"")))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the maintenance `postgres` database on the same server, and the target
/// database name the URL names (if any).
fn admin_options(database_url: &str) -> Result<(PgConnectOptions, Option<String>), StoreError> {
    let opts = PgConnectOptions::from_str(database_url)?;
    let db_name = opts.get_database().map(str::to_string);
    Ok((opts.database("postgres"), db_name))
}

/// Product row with the owner loaded by a `row_to_json` subquery.
#[derive(FromRow)]
struct ProductRow {
    #[sqlx(flatten)]
    product: Product,
    user: Option<Json<User>>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            user: row.user.map(|Json(u)| u),
            ..row.product
        }
    }
}

fn owner_include() -> Include {
    Include::to_one::<User>("user", "user_id")
}

#[derive(Clone)]
pub struct PgGateway {
    pool: PgPool,
}

impl PgGateway {
    pub fn new(pool: PgPool) -> Self {
        PgGateway { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Create or alter the users and products tables. Idempotent.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        migration::ensure_schema(&self.pool).await
    }

    async fn fetch_all<O>(&self, q: &QueryBuf) -> Result<Vec<O>, StoreError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = sqlx::query_as_with::<_, O, _>(&q.sql, to_arguments(&q.params)?)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn fetch_optional<O>(&self, q: &QueryBuf) -> Result<Option<O>, StoreError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = sqlx::query_as_with::<_, O, _>(&q.sql, to_arguments(&q.params)?)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn fetch_one<O>(&self, q: &QueryBuf) -> Result<O, StoreError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = sqlx::query_as_with::<_, O, _>(&q.sql, to_arguments(&q.params)?)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn execute(&self, q: &QueryBuf) -> Result<u64, StoreError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "execute");
        let done = sqlx::query_with(&q.sql, to_arguments(&q.params)?)
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected())
    }
}

#[async_trait]
impl Gateway for PgGateway {
    async fn insert_user(&self, new: &NewUser) -> Result<User, StoreError> {
        self.fetch_one(&sql::insert(new)).await
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.fetch_all(&sql::select_live::<User>(None)).await
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        self.fetch_optional(&sql::select_live::<User>(Some(id))).await
    }

    async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<u64, StoreError> {
        self.execute(&sql::update(id, patch)).await
    }

    async fn delete_user(&self, id: i64) -> Result<u64, StoreError> {
        self.execute(&sql::soft_delete::<User>(id)).await
    }

    async fn insert_product(&self, new: &NewProduct) -> Result<Product, StoreError> {
        self.fetch_one(&sql::insert(new)).await
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let q = sql::select_live_with_includes::<Product>(None, &[owner_include()]);
        let rows: Vec<ProductRow> = self.fetch_all(&q).await?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let q = sql::select_live_with_includes::<Product>(Some(id), &[owner_include()]);
        let row: Option<ProductRow> = self.fetch_optional(&q).await?;
        Ok(row.map(Product::from))
    }

    async fn update_product(&self, id: i64, patch: &ProductPatch) -> Result<u64, StoreError> {
        self.execute(&sql::update(id, patch)).await
    }

    async fn delete_product(&self, id: i64) -> Result<u64, StoreError> {
        self.execute(&sql::soft_delete::<Product>(id)).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
