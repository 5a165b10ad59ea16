//! Product repository abstraction

#[path = "trait.rs"]
mod trait_;

mod mock;

pub use mock::MockProductRepository;
pub use trait_::ProductRepository;
