//! Persisted entities of the catalog

mod audit;
mod category;
mod product;
mod reset_token;
mod role;
mod user;

pub use audit::{AuditFields, EntityStatus, SYSTEM_ACTOR};
pub use category::Category;
pub use product::{Product, ProductStatus};
pub use reset_token::PasswordResetToken;
pub use role::{permissions, Permission, Role};
pub use user::{User, UserStatus};
