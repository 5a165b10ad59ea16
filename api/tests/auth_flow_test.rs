//! End-to-end tests over the full HTTP stack with in-memory repositories:
//! login, bearer-protected category management, permission enforcement
//! and the circular-reference guard.

use std::sync::Arc;

use actix_web::{http::StatusCode, test, web};
use serde_json::{json, Value};

use sf_api::app::{create_app, AppState};
use sf_core::domain::entities::{User, UserStatus, SYSTEM_ACTOR};
use sf_core::repositories::{
    MockCategoryRepository, MockProductRepository, MockResetTokenRepository, MockUserRepository,
    UserRepository,
};
use sf_core::services::hash_password;
use sf_shared::JwtConfig;

type TestState =
    AppState<MockCategoryRepository, MockProductRepository, MockUserRepository, MockResetTokenRepository>;

async fn seed_state() -> web::Data<TestState> {
    let categories = Arc::new(MockCategoryRepository::new());
    let products = Arc::new(MockProductRepository::new());
    let users = Arc::new(MockUserRepository::new());
    let reset_tokens = Arc::new(MockResetTokenRepository::new());

    users
        .add_role("admin", &["category_view", "category_manage"])
        .await;
    users.add_role("viewer", &["category_view"]).await;

    let mut admin = User::new(
        "admin",
        "admin@example.com",
        &hash_password("s3cret!"),
        "Ada",
        "Admin",
        SYSTEM_ACTOR,
    );
    admin.business_status = UserStatus::Active;
    let admin = users.create(admin).await.unwrap();
    users.assign_role(admin.id, "admin").await;

    let mut viewer = User::new(
        "viewer",
        "viewer@example.com",
        &hash_password("s3cret!"),
        "Vic",
        "Viewer",
        SYSTEM_ACTOR,
    );
    viewer.business_status = UserStatus::Active;
    let viewer = users.create(viewer).await.unwrap();
    users.assign_role(viewer.id, "viewer").await;

    let jwt = JwtConfig {
        secret: "integration-test-secret".to_string(),
        ..JwtConfig::default()
    };

    web::Data::new(AppState::new(categories, products, users, reset_tokens, jwt))
}

fn login_request(username: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": username, "password": "s3cret!" }))
}

#[actix_web::test]
async fn login_then_manage_categories() {
    let state = seed_state().await;
    let app = test::init_service(create_app(state)).await;

    let body: Value =
        test::call_and_read_body_json(&app, login_request("admin").to_request()).await;
    assert_eq!(body["success"], true, "login failed: {body}");
    let token = body["data"]["token"].as_str().unwrap().to_string();

    // create a root category
    let req = test::TestRequest::post()
        .uri("/api/v1/categories")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Games", "description": "All games" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let parent_id = body["data"]["id"].as_i64().unwrap();
    assert_eq!(body["data"]["slug"], "games");

    // create a child under it
    let req = test::TestRequest::post()
        .uri("/api/v1/categories")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Action Games", "parentId": parent_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let child_id = body["data"]["id"].as_i64().unwrap();

    // re-parenting the root under its own child must be refused
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/categories/{parent_id}"))
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Games", "parentId": child_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["message"], "Cannot create circular reference");

    // the tree still shows the child under the parent
    let req = test::TestRequest::get()
        .uri("/api/v1/categories/tree")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"][0]["id"].as_i64(), Some(parent_id));
    assert_eq!(body["data"][0]["children"][0]["id"].as_i64(), Some(child_id));
}

#[actix_web::test]
async fn missing_token_is_rejected_with_envelope() {
    let state = seed_state().await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/api/v1/categories").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], 2000);
}

#[actix_web::test]
async fn registered_user_can_log_in() {
    let state = seed_state().await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "username": "newcomer",
            "email": "Newcomer@Example.com",
            "password": "s3cret!",
            "firstName": "New",
            "lastName": "Comer"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["data"]["email"], "newcomer@example.com");

    let body: Value =
        test::call_and_read_body_json(&app, login_request("newcomer").to_request()).await;
    assert_eq!(body["success"], true, "login failed: {body}");
    assert!(body["data"]["token"].as_str().is_some());
}

#[actix_web::test]
async fn malformed_token_is_rejected_with_envelope() {
    let state = seed_state().await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/categories")
        .insert_header(("Authorization", "Bearer not-a-jwt"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn viewer_cannot_mutate_categories() {
    let state = seed_state().await;
    let app = test::init_service(create_app(state)).await;

    let body: Value =
        test::call_and_read_body_json(&app, login_request("viewer").to_request()).await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/api/v1/categories")
        .insert_header(("Authorization", format!("Bearer {token}")))
        .set_json(json!({ "name": "Consoles" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 3000);
}

#[actix_web::test]
async fn login_rejects_bad_password() {
    let state = seed_state().await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .set_json(json!({ "username": "admin", "password": "wrong" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Invalid username or password");
}

#[actix_web::test]
async fn unknown_route_returns_standard_envelope() {
    let state = seed_state().await;
    let app = test::init_service(create_app(state)).await;

    let req = test::TestRequest::get().uri("/api/v1/nope").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], 4006);
}
