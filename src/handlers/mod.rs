//! HTTP handlers for users and products.

pub mod products;
pub mod users;
