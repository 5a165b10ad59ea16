//! Service layer
//!
//! Services own the business rules and orchestrate repositories; they are
//! generic over the repository traits so tests run against the in-memory
//! mocks and production runs against MySQL.

pub mod auth;
pub mod category;
pub mod password;
pub mod product;
pub mod token;
pub mod user;

pub use auth::{AuthService, LoginOutcome};
pub use category::{CategoryInput, CategoryService};
pub use password::{hash_password, verify_password};
pub use product::{ProductInput, ProductService, ProductWithCategory};
pub use token::{Claims, TokenService};
pub use user::{UserInput, UserService, UserUpdate};
