//! Mapped records, their insert payloads and their sparse patches.

pub mod product;
pub mod user;

pub use product::{NewProduct, Product, ProductPatch};
pub use user::{NewUser, User, UserPatch};
