//! MySQL implementation of the ResetTokenRepository trait

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::MySqlPool;

use sf_core::domain::entities::PasswordResetToken;
use sf_core::errors::DomainResult;
use sf_core::repositories::ResetTokenRepository;

use super::{column, map_db_error};

/// SQLx-backed [`ResetTokenRepository`].
pub struct MySqlResetTokenRepository {
    pool: MySqlPool,
}

impl MySqlResetTokenRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_token(row: &MySqlRow) -> DomainResult<PasswordResetToken> {
        Ok(PasswordResetToken {
            id: column(row, "id")?,
            user_id: column(row, "user_id")?,
            token: column(row, "token")?,
            expires_at: column::<DateTime<Utc>>(row, "expires_at")?,
            is_used: column(row, "is_used")?,
            created_at: column::<DateTime<Utc>>(row, "created_at")?,
        })
    }
}

#[async_trait]
impl ResetTokenRepository for MySqlResetTokenRepository {
    async fn save(&self, token: PasswordResetToken) -> DomainResult<PasswordResetToken> {
        let result = sqlx::query(
            "INSERT INTO password_reset_tokens \
             (user_id, token, expires_at, is_used, created_at) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(token.user_id)
        .bind(&token.token)
        .bind(token.expires_at)
        .bind(token.is_used)
        .bind(token.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to insert reset token", "token", e))?;

        let mut saved = token;
        saved.id = result.last_insert_id() as i64;
        Ok(saved)
    }

    async fn find_valid(
        &self,
        user_id: i64,
        token: &str,
    ) -> DomainResult<Option<PasswordResetToken>> {
        let row = sqlx::query(
            "SELECT id, user_id, token, expires_at, is_used, created_at \
             FROM password_reset_tokens \
             WHERE user_id = ? AND token = ? AND is_used = 0 \
             AND expires_at > UTC_TIMESTAMP()",
        )
        .bind(user_id)
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to load reset token", "token", e))?;

        row.as_ref().map(Self::row_to_token).transpose()
    }

    async fn mark_used(&self, token_id: i64) -> DomainResult<()> {
        sqlx::query("UPDATE password_reset_tokens SET is_used = 1 WHERE id = ?")
            .bind(token_id)
            .execute(&self.pool)
            .await
            .map_err(|e| map_db_error("failed to mark reset token used", "token", e))?;

        Ok(())
    }
}
