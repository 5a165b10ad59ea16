//! Category repository abstraction

// `trait` is a keyword, so the module file needs an explicit path.
#[path = "trait.rs"]
mod trait_;

mod mock;

pub use mock::MockCategoryRepository;
pub use trait_::CategoryRepository;
