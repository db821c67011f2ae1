use crate::sql::{Changeset, Param, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Stored exactly as submitted.
    pub password: String,
    pub address: String,
    pub phone_number: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Table for User {
    const NAME: &'static str = "users";
    const COLUMNS: &'static [&'static str] = &["name", "email", "password", "address", "phone_number", "role"];
}

/// Body of `POST /users`. Missing fields are stored as empty strings.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub address: String,
    pub phone_number: String,
    pub role: String,
}

impl Changeset for NewUser {
    type Target = User;

    fn assignments(&self) -> Vec<(&'static str, Param)> {
        vec![
            ("name", Param::from(self.name.as_str())),
            ("email", Param::from(self.email.as_str())),
            ("password", Param::from(self.password.as_str())),
            ("address", Param::from(self.address.as_str())),
            ("phone_number", Param::from(self.phone_number.as_str())),
            ("role", Param::from(self.role.as_str())),
        ]
    }
}

/// Body of `PUT /users/:user_id`. Only fields present in the request are written;
/// a present empty string does clear the column.
#[derive(Clone, Debug, Default, Deserialize, ToSchema)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub role: Option<String>,
}

impl UserPatch {
    /// Apply the present fields to an in-memory record.
    pub fn apply_to(&self, user: &mut User) {
        let fields = [
            (&self.name, &mut user.name),
            (&self.email, &mut user.email),
            (&self.password, &mut user.password),
            (&self.address, &mut user.address),
            (&self.phone_number, &mut user.phone_number),
            (&self.role, &mut user.role),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
    }
}

impl Changeset for UserPatch {
    type Target = User;

    fn assignments(&self) -> Vec<(&'static str, Param)> {
        [
            ("name", &self.name),
            ("email", &self.email),
            ("password", &self.password),
            ("address", &self.address),
            ("phone_number", &self.phone_number),
            ("role", &self.role),
        ]
        .into_iter()
        .filter_map(|(col, v)| v.as_deref().map(|s| (col, Param::from(s))))
        .collect()
    }
}
