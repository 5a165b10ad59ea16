//! # Infrastructure Layer
//!
//! Concrete persistence for the Storefront backend: a MySQL connection
//! pool and SQLx implementations of the repository traits defined in
//! `sf_core`.

pub mod database;

pub use database::create_pool;
pub use database::mysql::{
    MySqlCategoryRepository, MySqlProductRepository, MySqlResetTokenRepository,
    MySqlUserRepository,
};
