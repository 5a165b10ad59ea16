//! In-memory reset token repository for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::trait_::ResetTokenRepository;
use crate::domain::entities::PasswordResetToken;
use crate::errors::DomainResult;

/// HashMap-backed [`ResetTokenRepository`].
#[derive(Default)]
pub struct MockResetTokenRepository {
    tokens: RwLock<HashMap<i64, PasswordResetToken>>,
    next_id: AtomicI64,
}

impl MockResetTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

#[async_trait]
impl ResetTokenRepository for MockResetTokenRepository {
    async fn save(&self, mut token: PasswordResetToken) -> DomainResult<PasswordResetToken> {
        let mut tokens = self.tokens.write().await;
        token.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        tokens.insert(token.id, token.clone());
        Ok(token)
    }

    async fn find_valid(
        &self,
        user_id: i64,
        token: &str,
    ) -> DomainResult<Option<PasswordResetToken>> {
        let now = Utc::now();
        let tokens = self.tokens.read().await;
        Ok(tokens
            .values()
            .find(|t| t.user_id == user_id && t.token == token && t.is_valid(now))
            .cloned())
    }

    async fn mark_used(&self, token_id: i64) -> DomainResult<()> {
        let mut tokens = self.tokens.write().await;
        if let Some(token) = tokens.get_mut(&token_id) {
            token.is_used = true;
        }
        Ok(())
    }
}
