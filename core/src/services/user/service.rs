//! User service

use std::sync::Arc;

use tracing::info;

use crate::domain::entities::User;
use crate::errors::{DomainResult, NotFoundError, ValidationError};
use crate::repositories::UserRepository;
use crate::services::password::{hash_password, verify_password};

/// Fields accepted when registering a user.
#[derive(Debug, Clone)]
pub struct UserInput {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Partial profile update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// User account management: registration, lookups, password changes.
pub struct UserService<U: UserRepository> {
    users: Arc<U>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }

    pub async fn get_by_id(&self, id: i64) -> DomainResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| NotFoundError::User.into())
    }

    pub async fn get_by_username(&self, username: &str) -> DomainResult<User> {
        self.users
            .find_by_username(username)
            .await?
            .ok_or_else(|| NotFoundError::User.into())
    }

    pub async fn get_all(&self) -> DomainResult<Vec<User>> {
        self.users.find_all().await
    }

    /// Register a new account. Usernames and emails must be unique
    /// among non-deleted users; emails are stored lowercased.
    pub async fn create(&self, input: UserInput, actor: &str) -> DomainResult<User> {
        if self.users.is_username_taken(&input.username).await? {
            return Err(ValidationError::DuplicateValue {
                field: "username".to_string(),
            }
            .into());
        }

        let email = input.email.to_lowercase();
        if self.users.is_email_taken(&email).await? {
            return Err(ValidationError::EmailExists.into());
        }

        let user = User::new(
            &input.username,
            &email,
            &hash_password(&input.password),
            &input.first_name,
            &input.last_name,
            actor,
        );

        let created = self.users.create(user).await?;
        info!(user_id = created.id, "registered user");
        Ok(created)
    }

    /// Apply a partial profile update. Emails are stored lowercased and
    /// the uniqueness check only runs when the address actually changes.
    pub async fn update(&self, id: i64, changes: UserUpdate, actor: &str) -> DomainResult<User> {
        let mut user = self.get_by_id(id).await?;

        if let Some(email) = changes.email {
            if !email.eq_ignore_ascii_case(&user.email) && self.users.is_email_taken(&email).await?
            {
                return Err(ValidationError::EmailExists.into());
            }
            user.email = email.to_lowercase();
        }
        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        user.audit.touch(actor);

        let updated = self.users.update(user).await?;
        info!(user_id = id, "updated user");
        Ok(updated)
    }

    /// Change a user's password after verifying the current one.
    pub async fn change_password(
        &self,
        user_id: i64,
        current_password: &str,
        new_password: &str,
    ) -> DomainResult<()> {
        let mut user = self.get_by_id(user_id).await?;

        if !verify_password(current_password, &user.password_hash) {
            return Err(ValidationError::InvalidPassword.into());
        }

        let actor = user.username.clone();
        user.password_hash = hash_password(new_password);
        user.audit.touch(&actor);
        self.users.update(user).await?;

        info!(user_id, "changed password");
        Ok(())
    }

    pub async fn delete(&self, id: i64, actor: &str) -> DomainResult<()> {
        // surfaces NotFound before touching the store
        self.get_by_id(id).await?;
        self.users.soft_delete(id, actor).await?;
        info!(user_id = id, "deleted user");
        Ok(())
    }
}
