use super::user::User;
use crate::sql::{Changeset, Param, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    /// Owner reference; not checked against `users` before writing.
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
    /// Eager-loaded owner; `None` when the owner is missing or soft-deleted.
    #[sqlx(skip)]
    pub user: Option<User>,
}

impl Table for Product {
    const NAME: &'static str = "products";
    const COLUMNS: &'static [&'static str] = &["name", "description", "user_id"];
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub user_id: i64,
}

impl Changeset for NewProduct {
    type Target = Product;

    fn assignments(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("name", Param::from(self.name.as_str())),
            ("description", Param::from(self.description.as_str())),
            ("user_id", Param::from(self.user_id)),
        ]
    }
}

#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<i64>,
}

impl ProductPatch {
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(user_id) = self.user_id {
            product.user_id = user_id;
        }
    }
}

impl Changeset for ProductPatch {
    type Target = Product;

    fn assignments(&self) -> Vec<(&'static str, Param)> {
        let mut out = Vec::new();
        if let Some(name) = &self.name {
            out.push(("name", Param::from(name.as_str())));
        }
        if let Some(description) = &self.description {
            out.push(("description", Param::from(description.as_str())));
        }
        if let Some(user_id) = self.user_id {
            out.push(("user_id", Param::from(user_id)));
        }
        out
    }
}
