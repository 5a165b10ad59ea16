//! Error types for the Storefront domain
//!
//! Failures travel through the `Result` channel everywhere; panics are
//! reserved for programmer error. Each variant maps to a stable numeric
//! code (see [`ErrorCode`]) whose thousands band determines the HTTP
//! status the API layer answers with.

mod codes;
mod domain_error;
mod types;

pub use codes::ErrorCode;
pub use domain_error::{DomainError, DomainResult};
pub use types::{AuthError, NotFoundError, TokenError, ValidationError};
