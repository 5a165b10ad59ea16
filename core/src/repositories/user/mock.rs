//! In-memory user repository for tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::trait_::UserRepository;
use crate::domain::entities::User;
use crate::errors::DomainResult;

/// HashMap-backed [`UserRepository`] with a tiny role store so
/// permission aggregation can be exercised for real.
#[derive(Default)]
pub struct MockUserRepository {
    users: RwLock<HashMap<i64, User>>,
    // role name -> permission names
    roles: RwLock<HashMap<String, Vec<String>>>,
    // user id -> assigned role names
    assignments: RwLock<HashMap<i64, Vec<String>>>,
    next_id: AtomicI64,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            roles: RwLock::new(HashMap::new()),
            assignments: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Define a role granting the given permissions.
    pub async fn add_role(&self, name: &str, permissions: &[&str]) {
        self.roles.write().await.insert(
            name.to_string(),
            permissions.iter().map(|p| p.to_string()).collect(),
        );
    }

    /// Assign a previously defined role to a user.
    pub async fn assign_role(&self, user_id: i64, role_name: &str) {
        self.assignments
            .write()
            .await
            .entry(user_id)
            .or_default()
            .push(role_name.to_string());
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: i64) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).filter(|u| !u.audit.is_deleted()).cloned())
    }

    async fn find_by_username(&self, username: &str) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username == username && !u.audit.is_deleted())
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> DomainResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.email.eq_ignore_ascii_case(email) && !u.audit.is_deleted())
            .cloned())
    }

    async fn find_all(&self) -> DomainResult<Vec<User>> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users
            .values()
            .filter(|u| !u.audit.is_deleted())
            .cloned()
            .collect();
        all.sort_by_key(|u| u.id);
        Ok(all)
    }

    async fn is_username_taken(&self, username: &str) -> DomainResult<bool> {
        Ok(self.find_by_username(username).await?.is_some())
    }

    async fn is_email_taken(&self, email: &str) -> DomainResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, mut user: User) -> DomainResult<User> {
        let mut users = self.users.write().await;
        user.id = self.next_id.fetch_add(1, Ordering::SeqCst);
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> DomainResult<User> {
        let mut users = self.users.write().await;
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn soft_delete(&self, id: i64, actor: &str) -> DomainResult<()> {
        let mut users = self.users.write().await;
        if let Some(user) = users.get_mut(&id) {
            user.audit.mark_deleted(actor);
        }
        Ok(())
    }

    async fn permissions_for_user(&self, user_id: i64) -> DomainResult<Vec<String>> {
        let assignments = self.assignments.read().await;
        let roles = self.roles.read().await;

        let mut permissions: Vec<String> = Vec::new();
        if let Some(role_names) = assignments.get(&user_id) {
            for role_name in role_names {
                if let Some(perms) = roles.get(role_name) {
                    for perm in perms {
                        if !permissions.contains(perm) {
                            permissions.push(perm.clone());
                        }
                    }
                }
            }
        }
        Ok(permissions)
    }
}
