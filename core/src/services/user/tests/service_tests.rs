//! Unit tests for the user service

use std::sync::Arc;

use crate::domain::entities::{UserStatus, SYSTEM_ACTOR};
use crate::errors::{DomainError, NotFoundError, ValidationError};
use crate::repositories::user::MockUserRepository;
use crate::services::password::verify_password;
use crate::services::user::{UserInput, UserService, UserUpdate};

fn input(username: &str, email: &str) -> UserInput {
    UserInput {
        username: username.to_string(),
        email: email.to_string(),
        password: "s3cret".to_string(),
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
    }
}

fn service() -> UserService<MockUserRepository> {
    UserService::new(Arc::new(MockUserRepository::new()))
}

#[tokio::test]
async fn create_hashes_the_password() {
    let svc = service();
    let created = svc
        .create(input("alice", "alice@example.com"), SYSTEM_ACTOR)
        .await
        .unwrap();

    assert!(created.id > 0);
    assert_ne!(created.password_hash, "s3cret");
    assert!(verify_password("s3cret", &created.password_hash));
    assert_eq!(created.business_status, UserStatus::Active);
}

#[tokio::test]
async fn create_stores_the_email_lowercased() {
    let svc = service();
    let created = svc
        .create(input("bob", "Bob@Example.COM"), SYSTEM_ACTOR)
        .await
        .unwrap();

    assert_eq!(created.email, "bob@example.com");
    // lowercase lookups must find the account
    let err = svc
        .create(input("robert", "bob@example.com"), SYSTEM_ACTOR)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Validation(ValidationError::EmailExists));
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let svc = service();
    svc.create(input("alice", "alice@example.com"), SYSTEM_ACTOR)
        .await
        .unwrap();

    let err = svc
        .create(input("alice", "other@example.com"), SYSTEM_ACTOR)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationError::DuplicateValue { .. })
    ));
}

#[tokio::test]
async fn duplicate_email_is_rejected_case_insensitively() {
    let svc = service();
    svc.create(input("alice", "alice@example.com"), SYSTEM_ACTOR)
        .await
        .unwrap();

    let err = svc
        .create(input("bob", "ALICE@Example.COM"), SYSTEM_ACTOR)
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Validation(ValidationError::EmailExists));
}

#[tokio::test]
async fn username_lookup_is_case_sensitive() {
    let svc = service();
    svc.create(input("Alice", "alice@example.com"), SYSTEM_ACTOR)
        .await
        .unwrap();

    assert!(svc.get_by_username("Alice").await.is_ok());
    let err = svc.get_by_username("alice").await.unwrap_err();
    assert_eq!(err, DomainError::NotFound(NotFoundError::User));
}

#[tokio::test]
async fn update_applies_only_the_given_fields() {
    let svc = service();
    let created = svc
        .create(input("alice", "alice@example.com"), SYSTEM_ACTOR)
        .await
        .unwrap();

    let updated = svc
        .update(
            created.id,
            UserUpdate {
                email: Some("Alice.New@Example.com".to_string()),
                first_name: Some("Alicia".to_string()),
                last_name: None,
            },
            "alice",
        )
        .await
        .unwrap();

    // emails are stored lowercased
    assert_eq!(updated.email, "alice.new@example.com");
    assert_eq!(updated.first_name, "Alicia");
    assert_eq!(updated.last_name, "User");
}

#[tokio::test]
async fn update_rejects_an_email_already_in_use() {
    let svc = service();
    svc.create(input("alice", "alice@example.com"), SYSTEM_ACTOR)
        .await
        .unwrap();
    let bob = svc
        .create(input("bob", "bob@example.com"), SYSTEM_ACTOR)
        .await
        .unwrap();

    let err = svc
        .update(
            bob.id,
            UserUpdate {
                email: Some("ALICE@example.com".to_string()),
                ..UserUpdate::default()
            },
            "bob",
        )
        .await
        .unwrap_err();
    assert_eq!(err, DomainError::Validation(ValidationError::EmailExists));

    // keeping your own address in a different case is not a conflict
    svc.update(
        bob.id,
        UserUpdate {
            email: Some("BOB@example.com".to_string()),
            ..UserUpdate::default()
        },
        "bob",
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn change_password_requires_the_current_one() {
    let svc = service();
    let created = svc
        .create(input("alice", "alice@example.com"), SYSTEM_ACTOR)
        .await
        .unwrap();

    let err = svc
        .change_password(created.id, "wrong", "newpass")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        DomainError::Validation(ValidationError::InvalidPassword)
    );

    svc.change_password(created.id, "s3cret", "newpass")
        .await
        .unwrap();
    let updated = svc.get_by_id(created.id).await.unwrap();
    assert!(verify_password("newpass", &updated.password_hash));
}

#[tokio::test]
async fn deleted_users_disappear_from_reads() {
    let svc = service();
    let created = svc
        .create(input("alice", "alice@example.com"), SYSTEM_ACTOR)
        .await
        .unwrap();

    svc.delete(created.id, "admin").await.unwrap();

    let err = svc.get_by_id(created.id).await.unwrap_err();
    assert_eq!(err, DomainError::NotFound(NotFoundError::User));
    assert!(svc.get_all().await.unwrap().is_empty());
}
