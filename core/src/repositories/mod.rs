//! Repository abstractions
//!
//! Each entity gets a trait describing the persistence operations the
//! services need, plus an in-memory mock used by service tests. The SQL
//! implementations live in the infrastructure crate.

pub mod category;
pub mod product;
pub mod reset_token;
pub mod user;

pub use category::{CategoryRepository, MockCategoryRepository};
pub use product::{MockProductRepository, ProductRepository};
pub use reset_token::{MockResetTokenRepository, ResetTokenRepository};
pub use user::{MockUserRepository, UserRepository};
