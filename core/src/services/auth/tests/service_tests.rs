//! Unit tests for the authentication service

use std::sync::Arc;

use chrono::{Duration, Utc};

use sf_shared::JwtConfig;

use crate::domain::entities::{PasswordResetToken, User, UserStatus, SYSTEM_ACTOR};
use crate::errors::{AuthError, DomainError, TokenError};
use crate::repositories::reset_token::MockResetTokenRepository;
use crate::repositories::user::MockUserRepository;
use crate::repositories::{ResetTokenRepository, UserRepository};
use crate::services::auth::AuthService;
use crate::services::password::hash_password;
use crate::services::token::TokenService;

struct Fixture {
    auth: AuthService<MockUserRepository, MockResetTokenRepository>,
    users: Arc<MockUserRepository>,
    reset_tokens: Arc<MockResetTokenRepository>,
}

fn fixture() -> Fixture {
    let users = Arc::new(MockUserRepository::new());
    let reset_tokens = Arc::new(MockResetTokenRepository::new());
    let tokens = Arc::new(TokenService::new(JwtConfig {
        secret: "test-secret".into(),
        ..JwtConfig::default()
    }));
    Fixture {
        auth: AuthService::new(users.clone(), reset_tokens.clone(), tokens),
        users,
        reset_tokens,
    }
}

async fn seed_user(fx: &Fixture, username: &str, password: &str, status: UserStatus) -> User {
    let mut user = User::new(
        username,
        &format!("{username}@example.com"),
        &hash_password(password),
        "Test",
        "User",
        SYSTEM_ACTOR,
    );
    user.business_status = status;
    fx.users.create(user).await.unwrap()
}

#[tokio::test]
async fn login_issues_a_verifiable_token() {
    let fx = fixture();
    let user = seed_user(&fx, "alice", "s3cret", UserStatus::Active).await;
    fx.users.add_role("viewer", &["category_view"]).await;
    fx.users.assign_role(user.id, "viewer").await;

    let outcome = fx.auth.login("alice", "s3cret").await.unwrap();
    assert_eq!(outcome.user.id, user.id);
    assert!(outcome.user.last_login_at.is_some());
    assert_eq!(outcome.permissions, ["category_view"]);

    let claims = fx.auth.validate_token(&outcome.token).unwrap();
    assert_eq!(claims.user_id().unwrap(), user.id);
    assert!(claims.has_permission("category_view"));
}

#[tokio::test]
async fn unknown_user_and_wrong_password_are_indistinguishable() {
    let fx = fixture();
    seed_user(&fx, "alice", "s3cret", UserStatus::Active).await;

    let missing = fx.auth.login("nobody", "s3cret").await.unwrap_err();
    let wrong = fx.auth.login("alice", "wrong").await.unwrap_err();
    assert_eq!(missing, DomainError::Auth(AuthError::InvalidCredentials));
    assert_eq!(wrong, DomainError::Auth(AuthError::InvalidCredentials));
}

#[tokio::test]
async fn non_active_accounts_cannot_login() {
    let fx = fixture();
    seed_user(&fx, "pending", "pw", UserStatus::PendingActivation).await;
    seed_user(&fx, "suspended", "pw", UserStatus::Suspended).await;
    seed_user(&fx, "locked", "pw", UserStatus::Locked).await;

    assert_eq!(
        fx.auth.login("pending", "pw").await.unwrap_err(),
        DomainError::Auth(AuthError::UserNotActivated)
    );
    assert_eq!(
        fx.auth.login("suspended", "pw").await.unwrap_err(),
        DomainError::Auth(AuthError::UserSuspended)
    );
    assert_eq!(
        fx.auth.login("locked", "pw").await.unwrap_err(),
        DomainError::Auth(AuthError::UserLocked)
    );
}

#[tokio::test]
async fn permissions_union_across_roles_without_duplicates() {
    let fx = fixture();
    let user = seed_user(&fx, "alice", "pw", UserStatus::Active).await;
    fx.users
        .add_role("catalog", &["category_view", "product_view"])
        .await;
    fx.users
        .add_role("editor", &["product_view", "product_manage"])
        .await;
    fx.users.assign_role(user.id, "catalog").await;
    fx.users.assign_role(user.id, "editor").await;

    let permissions = fx.auth.collect_permissions(user.id).await.unwrap();
    assert_eq!(
        permissions,
        ["category_view", "product_view", "product_manage"]
    );
}

#[tokio::test]
async fn forgot_password_hides_unknown_emails() {
    let fx = fixture();
    let outcome = fx.auth.forgot_password("nobody@example.com").await.unwrap();
    assert!(outcome.is_none());
}

#[tokio::test]
async fn reset_flow_consumes_the_token() {
    let fx = fixture();
    seed_user(&fx, "alice", "old-pw", UserStatus::Active).await;

    let token = fx
        .auth
        .forgot_password("alice@example.com")
        .await
        .unwrap()
        .unwrap();

    assert!(fx
        .auth
        .validate_reset_token("alice@example.com", &token)
        .await
        .unwrap());

    fx.auth
        .reset_password("alice@example.com", &token, "new-pw")
        .await
        .unwrap();

    // replay: the consumed token no longer validates or resets
    assert!(!fx
        .auth
        .validate_reset_token("alice@example.com", &token)
        .await
        .unwrap());
    let err = fx
        .auth
        .reset_password("alice@example.com", &token, "other-pw")
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Token(TokenError::InvalidResetToken));

    // old password is gone, the new one works
    assert!(fx.auth.login("alice", "old-pw").await.is_err());
    assert!(fx.auth.login("alice", "new-pw").await.is_ok());
}

#[tokio::test]
async fn expired_reset_tokens_fail_validation() {
    let fx = fixture();
    let user = seed_user(&fx, "alice", "pw", UserStatus::Active).await;

    fx.reset_tokens
        .save(PasswordResetToken::new(
            user.id,
            "stale-token".into(),
            Utc::now() - Duration::minutes(1),
        ))
        .await
        .unwrap();

    assert!(!fx
        .auth
        .validate_reset_token("alice@example.com", "stale-token")
        .await
        .unwrap());
}

#[tokio::test]
async fn reset_tokens_are_bound_to_their_user() {
    let fx = fixture();
    seed_user(&fx, "alice", "pw", UserStatus::Active).await;
    seed_user(&fx, "bob", "pw", UserStatus::Active).await;

    let token = fx
        .auth
        .forgot_password("alice@example.com")
        .await
        .unwrap()
        .unwrap();

    assert!(!fx
        .auth
        .validate_reset_token("bob@example.com", &token)
        .await
        .unwrap());
}
