//! Configuration types for the Storefront server
//!
//! Each module exposes a plain struct with a `Default` implementation and a
//! `from_env()` constructor. Loading `.env` files is the binary's concern.

mod cache;
mod database;
mod jwt;
mod server;

pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use jwt::JwtConfig;
pub use server::ServerConfig;
