//! Password reset tokens

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single-use password reset token.
///
/// Expiry is computed at validation time from `expires_at`; there is no
/// stored "expired" state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordResetToken {
    pub id: i64,
    pub user_id: i64,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub is_used: bool,
    pub created_at: DateTime<Utc>,
}

impl PasswordResetToken {
    pub fn new(user_id: i64, token: String, expires_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            user_id,
            token,
            expires_at,
            is_used: false,
            created_at: Utc::now(),
        }
    }

    /// A token is valid only while unused and unexpired.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        !self.is_used && self.expires_at > now
    }
}
