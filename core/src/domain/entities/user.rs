//! User entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::audit::AuditFields;
use crate::errors::AuthError;

/// Account lifecycle state, distinct from the soft-delete status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserStatus {
    PendingActivation = 1,
    Active = 2,
    Suspended = 3,
    Locked = 4,
}

impl UserStatus {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::PendingActivation),
            2 => Some(Self::Active),
            3 => Some(Self::Suspended),
            4 => Some(Self::Locked),
            _ => None,
        }
    }
}

/// An account that can authenticate against the API.
///
/// `username` is matched case-sensitively, `email` case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,

    /// Login name, unique among non-deleted users
    pub username: String,

    /// Contact address, unique among non-deleted users
    pub email: String,

    /// One-way digest of the password
    pub password_hash: String,

    pub first_name: String,

    pub last_name: String,

    pub email_confirmed: bool,

    pub last_login_at: Option<DateTime<Utc>>,

    pub business_status: UserStatus,

    pub audit: AuditFields,
}

impl User {
    pub fn new(
        username: &str,
        email: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        actor: &str,
    ) -> Self {
        Self {
            id: 0,
            username: username.to_string(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            email_confirmed: false,
            last_login_at: None,
            business_status: UserStatus::Active,
            audit: AuditFields::new(actor),
        }
    }

    /// Record a successful login.
    pub fn record_login(&mut self, at: DateTime<Utc>) {
        self.last_login_at = Some(at);
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check the account can log in, mapping each non-active state to
    /// its own error.
    pub fn ensure_can_login(&self) -> Result<(), AuthError> {
        match self.business_status {
            UserStatus::Active => Ok(()),
            UserStatus::PendingActivation => Err(AuthError::UserNotActivated),
            UserStatus::Suspended => Err(AuthError::UserSuspended),
            UserStatus::Locked => Err(AuthError::UserLocked),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SYSTEM_ACTOR;

    fn user(status: UserStatus) -> User {
        let mut u = User::new("alice", "alice@example.com", "hash", "Alice", "A", SYSTEM_ACTOR);
        u.business_status = status;
        u
    }

    #[test]
    fn new_users_can_log_in_right_away() {
        let u = User::new("bob", "bob@example.com", "hash", "Bob", "B", SYSTEM_ACTOR);
        assert_eq!(u.business_status, UserStatus::Active);
        assert!(u.ensure_can_login().is_ok());
    }

    #[test]
    fn only_active_users_can_login() {
        assert!(user(UserStatus::Active).ensure_can_login().is_ok());
        assert_eq!(
            user(UserStatus::PendingActivation).ensure_can_login(),
            Err(AuthError::UserNotActivated)
        );
        assert_eq!(
            user(UserStatus::Suspended).ensure_can_login(),
            Err(AuthError::UserSuspended)
        );
        assert_eq!(
            user(UserStatus::Locked).ensure_can_login(),
            Err(AuthError::UserLocked)
        );
    }
}
