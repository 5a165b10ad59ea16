//! Password reset token repository trait

use async_trait::async_trait;

use crate::domain::entities::PasswordResetToken;
use crate::errors::DomainResult;

/// Persistence operations for password reset tokens.
#[async_trait]
pub trait ResetTokenRepository: Send + Sync {
    /// Persist a new token and return it with its assigned id.
    async fn save(&self, token: PasswordResetToken) -> DomainResult<PasswordResetToken>;

    /// Find a token for the user matching `token` exactly, unused and
    /// unexpired. Used or expired tokens are never returned.
    async fn find_valid(
        &self,
        user_id: i64,
        token: &str,
    ) -> DomainResult<Option<PasswordResetToken>>;

    /// Mark a token consumed so it fails validation from now on.
    async fn mark_used(&self, token_id: i64) -> DomainResult<()>;
}
