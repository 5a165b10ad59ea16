//! User repository trait

use async_trait::async_trait;

use crate::domain::entities::User;
use crate::errors::DomainResult;

/// Persistence operations for users, roles, and permissions.
///
/// Implementations must exclude soft-deleted rows from every read.
/// Username lookups are case-sensitive; email lookups are not.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>>;

    /// Case-sensitive username lookup.
    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>>;

    /// Case-insensitive email lookup.
    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>>;

    async fn find_all(&self) -> DomainResult<Vec<User>>;

    async fn is_username_taken(&self, username: &str) -> DomainResult<bool>;

    async fn is_email_taken(&self, email: &str) -> DomainResult<bool>;

    /// Persist a new user and return it with its assigned id.
    async fn create(&self, user: User) -> DomainResult<User>;

    async fn update(&self, user: User) -> DomainResult<User>;

    async fn soft_delete(&self, id: i64, actor: &str) -> DomainResult<()>;

    /// Distinct permission names across every role assigned to the user.
    async fn permissions_for_user(&self, user_id: i64) -> DomainResult<Vec<String>>;
}
