//! Request and response DTOs

pub mod auth;
pub mod category;
pub mod product;
pub mod user;
