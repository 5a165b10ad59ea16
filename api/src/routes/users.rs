//! User endpoints
//!
//! Registration is public; everything else requires a valid token.
//! Password changes are restricted to the account owner.

use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_core::domain::entities::SYSTEM_ACTOR;
use sf_core::errors::AuthError;
use sf_core::repositories::{
    CategoryRepository, ProductRepository, ResetTokenRepository, UserRepository,
};
use sf_core::services::user::{UserInput, UserUpdate};

use crate::app::AppState;
use crate::dto::user::{ChangePasswordRequest, RegisterRequest, UpdateUserRequest, UserDto};
use crate::handlers::error::{created_json, domain_error_response, ok_json, validation_failure};
use crate::middleware::auth::AuthContext;

/// POST /api/v1/users
pub async fn register<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    let request = request.into_inner();
    let input = UserInput {
        username: request.username,
        email: request.email,
        password: request.password,
        first_name: request.first_name,
        last_name: request.last_name,
    };

    match state.users.create(input, SYSTEM_ACTOR).await {
        Ok(user) => created_json(UserDto::from(user)),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/v1/users
pub async fn list<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    _ctx: AuthContext,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    match state.users.get_all().await {
        Ok(users) => ok_json(users.into_iter().map(UserDto::from).collect::<Vec<_>>()),
        Err(e) => domain_error_response(&e),
    }
}

/// GET /api/v1/users/{id}
pub async fn get_by_id<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    _ctx: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    match state.users.get_by_id(path.into_inner()).await {
        Ok(user) => ok_json(UserDto::from(user)),
        Err(e) => domain_error_response(&e),
    }
}

/// PUT /api/v1/users/{id}
pub async fn update<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    ctx: AuthContext,
    path: web::Path<i64>,
    request: web::Json<UpdateUserRequest>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    let user_id = path.into_inner();
    // only the account owner may edit the profile
    if ctx.user_id != user_id {
        return domain_error_response(&AuthError::ResourceAccessDenied.into());
    }
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    let request = request.into_inner();
    let changes = UserUpdate {
        email: request.email,
        first_name: request.first_name,
        last_name: request.last_name,
    };

    match state.users.update(user_id, changes, &ctx.username).await {
        Ok(user) => ok_json(UserDto::from(user)),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/v1/users/{id}/change-password
pub async fn change_password<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    ctx: AuthContext,
    path: web::Path<i64>,
    request: web::Json<ChangePasswordRequest>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    let user_id = path.into_inner();
    // only the account owner may change the password
    if ctx.user_id != user_id {
        return domain_error_response(&AuthError::ResourceAccessDenied.into());
    }
    if let Err(errors) = request.validate() {
        return validation_failure(&errors);
    }

    match state
        .users
        .change_password(user_id, &request.current_password, &request.new_password)
        .await
    {
        Ok(()) => ok_json(serde_json::json!({ "message": "Password has been changed" })),
        Err(e) => domain_error_response(&e),
    }
}

/// DELETE /api/v1/users/{id}
pub async fn delete<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    ctx: AuthContext,
    path: web::Path<i64>,
) -> HttpResponse
where
    C: CategoryRepository + 'static,
    P: ProductRepository + 'static,
    U: UserRepository + 'static,
    R: ResetTokenRepository + 'static,
{
    match state.users.delete(path.into_inner(), &ctx.username).await {
        Ok(()) => ok_json(true),
        Err(e) => domain_error_response(&e),
    }
}
