//! Schema setup for users and products: create tables if missing, add missing columns,
//! create indexes. Safe to run on every start.

use crate::error::StoreError;
use crate::models::{Product, User};
use crate::sql::{Table, CREATED_AT, DELETED_AT, UPDATED_AT};
use sqlx::PgPool;

/// Column definitions added to existing tables by `ADD COLUMN IF NOT EXISTS`.
/// Data columns are `TEXT NOT NULL DEFAULT ''` unless listed here.
fn column_def(column: &str) -> &'static str {
    match column {
        "user_id" => "BIGINT NOT NULL DEFAULT 0",
        CREATED_AT | UPDATED_AT => "TIMESTAMPTZ NOT NULL DEFAULT NOW()",
        DELETED_AT => "TIMESTAMPTZ",
        _ => "TEXT NOT NULL DEFAULT ''",
    }
}

/// Unique index on `users.email`; soft-deleted rows keep holding their email.
pub const EMAIL_UNIQUE: &str = "uni_users_email";
pub const OWNER_FK: &str = "fk_products_user";

fn statements() -> Vec<String> {
    let users = User::NAME;
    let products = Product::NAME;
    let mut out = vec![
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {users} (
                id BIGSERIAL PRIMARY KEY,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                deleted_at TIMESTAMPTZ
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS {products} (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                deleted_at TIMESTAMPTZ
            )
            "#
        ),
    ];

    for (table, columns) in [(users, User::COLUMNS), (products, Product::COLUMNS)] {
        for col in columns.iter().chain([CREATED_AT, UPDATED_AT, DELETED_AT].iter()) {
            out.push(format!(
                "ALTER TABLE {} ADD COLUMN IF NOT EXISTS {} {}",
                table,
                col,
                column_def(col)
            ));
        }
    }

    // after the column pass so user_id exists on tables created elsewhere
    out.push(format!(
        r#"
            DO $$
            BEGIN
                IF NOT EXISTS (SELECT 1 FROM pg_constraint WHERE conname = '{OWNER_FK}') THEN
                    ALTER TABLE {products} ADD CONSTRAINT {OWNER_FK} FOREIGN KEY (user_id) REFERENCES {users} (id);
                END IF;
            END
            $$
            "#
    ));

    out.extend([
        format!("CREATE UNIQUE INDEX IF NOT EXISTS {EMAIL_UNIQUE} ON {users} (email)"),
        format!("CREATE INDEX IF NOT EXISTS idx_users_deleted_at ON {users} (deleted_at)"),
        format!("CREATE INDEX IF NOT EXISTS idx_products_user_id ON {products} (user_id)"),
        format!("CREATE INDEX IF NOT EXISTS idx_products_deleted_at ON {products} (deleted_at)"),
    ]);
    out
}

/// Create or alter the users and products tables to match the mapped records.
/// Fails if an existing table cannot be brought in line (e.g. a column of another type
/// blocks the unique index).
pub async fn ensure_schema(pool: &PgPool) -> Result<(), StoreError> {
    for sql in statements() {
        tracing::debug!(sql = %sql.trim(), "schema");
        sqlx::query(&sql).execute(pool).await?;
    }
    tracing::info!("schema ready for {} and {}", User::NAME, Product::NAME);
    Ok(())
}
