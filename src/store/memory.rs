//! In-memory gateway for router tests. Mirrors the database constraints: unique email
//! over every user row, soft-deleted ones included, and a foreign key from products to
//! any user row.

use super::Gateway;
use crate::error::StoreError;
use crate::migration;
use crate::models::{NewProduct, NewUser, Product, ProductPatch, User, UserPatch};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::RwLock;

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    products: Vec<Product>,
}

impl Tables {
    fn email_taken(&self, email: &str, except: Option<i64>) -> bool {
        self.users
            .iter()
            .any(|u| u.email == email && Some(u.id) != except)
    }

    fn user_exists(&self, id: i64) -> bool {
        self.users.iter().any(|u| u.id == id)
    }

    fn with_owner(&self, product: &Product) -> Product {
        let owner = self
            .users
            .iter()
            .find(|u| u.id == product.user_id && u.deleted_at.is_none())
            .cloned();
        Product {
            user: owner,
            ..product.clone()
        }
    }
}

#[derive(Default)]
pub struct MemoryGateway {
    tables: RwLock<Tables>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every user row, soft-deleted ones included.
    pub fn stored_users(&self) -> Vec<User> {
        self.read().users.clone()
    }

    pub fn stored_products(&self) -> Vec<Product> {
        self.read().products.clone()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn unique_email() -> StoreError {
    StoreError::UniqueViolation(migration::EMAIL_UNIQUE.into())
}

fn owner_fk() -> StoreError {
    StoreError::ForeignKeyViolation(migration::OWNER_FK.into())
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn insert_user(&self, new: &NewUser) -> Result<User, StoreError> {
        let mut t = self.write();
        if t.email_taken(&new.email, None) {
            return Err(unique_email());
        }
        let now = Utc::now();
        let user = User {
            id: t.users.len() as i64 + 1,
            name: new.name.clone(),
            email: new.email.clone(),
            password: new.password.clone(),
            address: new.address.clone(),
            phone_number: new.phone_number.clone(),
            role: new.role.clone(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        };
        t.users.push(user.clone());
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.read().users.iter().filter(|u| u.deleted_at.is_none()).cloned().collect())
    }

    async fn find_user(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self
            .read()
            .users
            .iter()
            .find(|u| u.id == id && u.deleted_at.is_none())
            .cloned())
    }

    async fn update_user(&self, id: i64, patch: &UserPatch) -> Result<u64, StoreError> {
        let mut t = self.write();
        if let Some(email) = &patch.email {
            if t.email_taken(email, Some(id)) {
                return Err(unique_email());
            }
        }
        let Some(user) = t.users.iter_mut().find(|u| u.id == id && u.deleted_at.is_none()) else {
            return Ok(0);
        };
        patch.apply_to(user);
        user.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete_user(&self, id: i64) -> Result<u64, StoreError> {
        let mut t = self.write();
        let Some(user) = t.users.iter_mut().find(|u| u.id == id && u.deleted_at.is_none()) else {
            return Ok(0);
        };
        user.deleted_at = Some(Utc::now());
        Ok(1)
    }

    async fn insert_product(&self, new: &NewProduct) -> Result<Product, StoreError> {
        let mut t = self.write();
        if !t.user_exists(new.user_id) {
            return Err(owner_fk());
        }
        let now = Utc::now();
        let product = Product {
            id: t.products.len() as i64 + 1,
            name: new.name.clone(),
            description: new.description.clone(),
            user_id: new.user_id,
            created_at: now,
            updated_at: now,
            deleted_at: None,
            user: None,
        };
        t.products.push(product.clone());
        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>, StoreError> {
        let t = self.read();
        Ok(t.products
            .iter()
            .filter(|p| p.deleted_at.is_none())
            .map(|p| t.with_owner(p))
            .collect())
    }

    async fn find_product(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let t = self.read();
        Ok(t.products
            .iter()
            .find(|p| p.id == id && p.deleted_at.is_none())
            .map(|p| t.with_owner(p)))
    }

    async fn update_product(&self, id: i64, patch: &ProductPatch) -> Result<u64, StoreError> {
        let mut t = self.write();
        if let Some(owner) = patch.user_id {
            if !t.user_exists(owner) {
                return Err(owner_fk());
            }
        }
        let Some(product) = t.products.iter_mut().find(|p| p.id == id && p.deleted_at.is_none()) else {
            return Ok(0);
        };
        patch.apply_to(product);
        product.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete_product(&self, id: i64) -> Result<u64, StoreError> {
        let mut t = self.write();
        let Some(product) = t.products.iter_mut().find(|p| p.id == id && p.deleted_at.is_none()) else {
            return Ok(0);
        };
        product.deleted_at = Some(Utc::now());
        Ok(1)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
