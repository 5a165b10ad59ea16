//! Core domain logic for the Storefront catalog backend
//!
//! This crate owns the entities, business rules, and service layer of the
//! catalog: hierarchical categories, products scoped to those categories,
//! users with role-based permissions, and the credential flows that guard
//! the whole thing. Persistence is abstracted behind repository traits so
//! the services here stay storage-agnostic.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

pub use errors::{DomainError, DomainResult, ErrorCode};
