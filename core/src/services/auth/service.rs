//! Authentication service

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{Duration, Utc};
use rand::RngCore;
use tracing::{info, warn};

use crate::domain::entities::{PasswordResetToken, User};
use crate::errors::{AuthError, DomainResult, TokenError};
use crate::repositories::{ResetTokenRepository, UserRepository};
use crate::services::password::{hash_password, verify_password};
use crate::services::token::{Claims, TokenService};

const RESET_TOKEN_BYTES: usize = 32;
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// A successful login: the bearer token plus the authenticated user and
/// their effective permissions.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: String,
    pub user: User,
    pub permissions: Vec<String>,
}

/// Credential verification, token issuance, and password reset.
pub struct AuthService<U: UserRepository, R: ResetTokenRepository> {
    users: Arc<U>,
    reset_tokens: Arc<R>,
    tokens: Arc<TokenService>,
}

impl<U: UserRepository, R: ResetTokenRepository> AuthService<U, R> {
    pub fn new(users: Arc<U>, reset_tokens: Arc<R>, tokens: Arc<TokenService>) -> Self {
        Self {
            users,
            reset_tokens,
            tokens,
        }
    }

    /// Verify credentials and issue a bearer token.
    ///
    /// Unknown usernames and wrong passwords both answer
    /// `InvalidCredentials` so the two cases are indistinguishable.
    pub async fn login(&self, username: &str, password: &str) -> DomainResult<LoginOutcome> {
        let user = match self.users.find_by_username(username).await? {
            Some(user) => user,
            None => {
                warn!(username, "login attempt for unknown username");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !verify_password(password, &user.password_hash) {
            warn!(user_id = user.id, "login attempt with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        user.ensure_can_login()?;

        let mut user = user;
        user.record_login(Utc::now());
        let user = self.users.update(user).await?;

        let permissions = self.collect_permissions(user.id).await?;
        let token = self.tokens.generate(&user, permissions.clone())?;

        info!(user_id = user.id, "user logged in");
        Ok(LoginOutcome {
            token,
            user,
            permissions,
        })
    }

    /// Verify a bearer token and return its claims.
    pub fn validate_token(&self, token: &str) -> DomainResult<Claims> {
        self.tokens.verify(token)
    }

    /// Distinct permission names across every role assigned to the user.
    pub async fn collect_permissions(&self, user_id: i64) -> DomainResult<Vec<String>> {
        self.users.permissions_for_user(user_id).await
    }

    /// Start a password reset.
    ///
    /// Returns the token when the account exists and `None` otherwise;
    /// the caller must answer identically in both cases so email
    /// addresses cannot be probed.
    pub async fn forgot_password(&self, email: &str) -> DomainResult<Option<String>> {
        let user = match self.users.find_by_email(email).await? {
            Some(user) => user,
            None => {
                info!("password reset requested for unknown email");
                return Ok(None);
            }
        };

        let mut bytes = [0u8; RESET_TOKEN_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = STANDARD.encode(bytes);

        let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);
        let saved = self
            .reset_tokens
            .save(PasswordResetToken::new(user.id, token, expires_at))
            .await?;

        info!(user_id = user.id, "issued password reset token");
        Ok(Some(saved.token))
    }

    /// Whether a reset token is currently usable for this email.
    pub async fn validate_reset_token(&self, email: &str, token: &str) -> DomainResult<bool> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Ok(false);
        };
        Ok(self.reset_tokens.find_valid(user.id, token).await?.is_some())
    }

    /// Consume a reset token and store the new password.
    ///
    /// The token is marked used, so a replay fails validation.
    pub async fn reset_password(
        &self,
        email: &str,
        token: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(TokenError::InvalidResetToken)?;

        let reset_token = self
            .reset_tokens
            .find_valid(user.id, token)
            .await?
            .ok_or(TokenError::InvalidResetToken)?;

        let mut user = user;
        let actor = user.username.clone();
        user.password_hash = hash_password(new_password);
        user.audit.touch(&actor);
        self.users.update(user).await?;

        self.reset_tokens.mark_used(reset_token.id).await?;

        info!(user_id = reset_token.user_id, "password reset completed");
        Ok(())
    }
}
