//! MySQL implementation of the UserRepository trait

use async_trait::async_trait;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};

use sf_core::domain::entities::{User, UserStatus};
use sf_core::errors::{DomainError, DomainResult};
use sf_core::repositories::UserRepository;

use super::{audit_from_row, column, map_db_error};

const SELECT_COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
     email_confirmed, last_login_at, business_status, \
     created_at, created_by, last_modified_at, last_modified_by, status";

/// SQLx-backed [`UserRepository`].
pub struct MySqlUserRepository {
    pool: MySqlPool,
}

impl MySqlUserRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_user(row: &MySqlRow) -> DomainResult<User> {
        let business_status: i32 = column(row, "business_status")?;
        let business_status = UserStatus::from_i32(business_status).ok_or_else(|| {
            DomainError::internal(format!("unknown user status {business_status}"))
        })?;

        Ok(User {
            id: column(row, "id")?,
            username: column(row, "username")?,
            email: column(row, "email")?,
            password_hash: column(row, "password_hash")?,
            first_name: column(row, "first_name")?,
            last_name: column(row, "last_name")?,
            email_confirmed: column::<bool>(row, "email_confirmed")?,
            last_login_at: column(row, "last_login_at")?,
            business_status,
            audit: audit_from_row(row)?,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE id = ? AND status <> 'deleted'"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to load user", "username", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        // BINARY forces a case-sensitive match on the collation
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM users \
             WHERE BINARY username = ? AND status <> 'deleted'"
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to load user by username", "username", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let row = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM users \
             WHERE LOWER(email) = LOWER(?) AND status <> 'deleted'"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to load user by email", "email", e))?;

        row.as_ref().map(Self::row_to_user).transpose()
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let rows = sqlx::query(&format!(
            "SELECT {SELECT_COLUMNS} FROM users WHERE status <> 'deleted' ORDER BY id"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to list users", "username", e))?;

        rows.iter().map(Self::row_to_user).collect()
    }

    async fn is_username_taken(&self, username: &str) -> DomainResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users \
             WHERE BINARY username = ? AND status <> 'deleted')",
        )
        .bind(username)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to check username", "username", e))?;

        Ok(exists != 0)
    }

    async fn is_email_taken(&self, email: &str) -> DomainResult<bool> {
        let exists: i64 = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users \
             WHERE LOWER(email) = LOWER(?) AND status <> 'deleted')",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to check email", "email", e))?;

        Ok(exists != 0)
    }

    async fn create(&self, user: User) -> DomainResult<User> {
        let result = sqlx::query(
            "INSERT INTO users \
             (username, email, password_hash, first_name, last_name, \
              email_confirmed, business_status, created_at, created_by, status) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.email_confirmed)
        .bind(user.business_status.as_i32())
        .bind(user.audit.created_at)
        .bind(&user.audit.created_by)
        .bind(user.audit.status.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to insert user", "username", e))?;

        let mut created = user;
        created.id = result.last_insert_id() as i64;
        Ok(created)
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        sqlx::query(
            "UPDATE users SET \
             email = ?, password_hash = ?, first_name = ?, last_name = ?, \
             email_confirmed = ?, last_login_at = ?, \
             business_status = ?, last_modified_at = ?, last_modified_by = ? \
             WHERE id = ? AND status <> 'deleted'",
        )
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(user.email_confirmed)
        .bind(user.last_login_at)
        .bind(user.business_status.as_i32())
        .bind(user.audit.last_modified_at)
        .bind(&user.audit.last_modified_by)
        .bind(user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to update user", "email", e))?;

        Ok(user)
    }

    async fn soft_delete(&self, id: i64, actor: &str) -> DomainResult<()> {
        sqlx::query(
            "UPDATE users SET status = 'deleted', \
             last_modified_at = UTC_TIMESTAMP(), last_modified_by = ? \
             WHERE id = ?",
        )
        .bind(actor)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to delete user", "username", e))?;

        Ok(())
    }

    async fn permissions_for_user(&self, user_id: i64) -> DomainResult<Vec<String>> {
        let rows = sqlx::query(
            "SELECT DISTINCT p.name FROM permissions p \
             JOIN role_permissions rp ON rp.permission_id = p.id \
             JOIN user_roles ur ON ur.role_id = rp.role_id \
             WHERE ur.user_id = ? AND p.status <> 'deleted' \
             ORDER BY p.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_db_error("failed to load user permissions", "name", e))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>("name").map_err(|e| {
                    DomainError::database(format!("failed to read permission name: {e}"))
                })
            })
            .collect()
    }
}
