//! Shared wire types
//!
//! Pagination parameters and the response envelopes used by every API
//! endpoint live here so that core services and HTTP handlers agree on
//! the same shapes.

mod pagination;
mod response;

pub use pagination::{PageMeta, Pagination};
pub use response::{ApiResponse, ErrorBody, PaginatedApiResponse};
