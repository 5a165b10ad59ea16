//! Authentication service module
//!
//! Login with username/password, bearer token validation, permission
//! aggregation, and the single-use password reset flow.

mod service;

#[cfg(test)]
mod tests;

pub use service::{AuthService, LoginOutcome};
