//! Password reset token repository abstraction

#[path = "trait.rs"]
mod trait_;

mod mock;

pub use mock::MockResetTokenRepository;
pub use trait_::ResetTokenRepository;
