//! Authentication endpoints
//!
//! All endpoints here are public. Forgot-password answers identically
//! for known and unknown emails.

use actix_web::{web, HttpResponse};
use validator::Validate;

use sf_core::repositories::{
    CategoryRepository, ProductRepository, ResetTokenRepository, UserRepository,
};

use crate::app::AppState;
use crate::dto::auth::{
    ForgotPasswordRequest, ForgotPasswordResponse, LoginRequest, LoginResponse,
    ResetPasswordRequest, ValidateResetTokenRequest, ValidateResetTokenResponse,
};
use crate::handlers::error::{domain_error_response, ok_json, validation_failure};

const FORGOT_PASSWORD_MESSAGE: &str =
    "If the email is registered, a password reset token has been issued";

/// POST /api/v1/auth/login
pub async fn login<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    request: web::Json<LoginRequest>,
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

    match state.auth.login(&request.username, &request.password).await {
        Ok(outcome) => ok_json(LoginResponse::from(outcome)),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/v1/auth/forgot-password
pub async fn forgot_password<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    request: web::Json<ForgotPasswordRequest>,
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

    match state.auth.forgot_password(&request.email).await {
        Ok(reset_token) => ok_json(ForgotPasswordResponse {
            message: FORGOT_PASSWORD_MESSAGE.to_string(),
            reset_token,
        }),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/v1/auth/validate-reset-token
pub async fn validate_reset_token<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    request: web::Json<ValidateResetTokenRequest>,
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

    match state
        .auth
        .validate_reset_token(&request.email, &request.token)
        .await
    {
        Ok(valid) => ok_json(ValidateResetTokenResponse { valid }),
        Err(e) => domain_error_response(&e),
    }
}

/// POST /api/v1/auth/reset-password
pub async fn reset_password<C, P, U, R>(
    state: web::Data<AppState<C, P, U, R>>,
    request: web::Json<ResetPasswordRequest>,
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

    match state
        .auth
        .reset_password(&request.email, &request.token, &request.new_password)
        .await
    {
        Ok(()) => ok_json(serde_json::json!({ "message": "Password has been reset" })),
        Err(e) => domain_error_response(&e),
    }
}
