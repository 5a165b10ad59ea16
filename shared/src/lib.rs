//! Shared utilities and common types for the Storefront server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types
//! - API response wrappers and pagination
//! - Common type definitions

pub mod config;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{CacheConfig, DatabaseConfig, JwtConfig, ServerConfig};
pub use types::{ApiResponse, ErrorBody, PageMeta, PaginatedApiResponse, Pagination};
