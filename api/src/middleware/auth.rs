//! JWT authentication middleware
//!
//! Extracts the bearer token from the Authorization header, verifies it
//! with the token service, and injects an [`AuthContext`] into the
//! request extensions for handlers to consume.

use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::InternalError;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;

use sf_core::errors::{AuthError, DomainError};
use sf_core::services::token::TokenService;

use crate::handlers::error::domain_error_response;

/// Authenticated caller, available to handlers behind [`JwtAuth`].
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: i64,
    pub username: String,
    pub permissions: Vec<String>,
}

impl AuthContext {
    /// Fail with `InsufficientPermissions` unless the caller holds the
    /// named permission.
    pub fn require(&self, permission: &str) -> Result<(), DomainError> {
        if self.permissions.iter().any(|p| p == permission) {
            Ok(())
        } else {
            Err(AuthError::InsufficientPermissions {
                permission: permission.to_string(),
            }
            .into())
        }
    }
}

/// JWT authentication middleware factory.
pub struct JwtAuth {
    tokens: Arc<TokenService>,
}

impl JwtAuth {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            tokens: Arc::clone(&self.tokens),
        }))
    }
}

/// JWT authentication middleware service.
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    tokens: Arc<TokenService>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let tokens = Arc::clone(&self.tokens);

        Box::pin(async move {
            let Some(token) = extract_bearer_token(&req) else {
                return Ok(reject(req, AuthError::Unauthorized.into()));
            };

            let claims = match tokens.verify(&token) {
                Ok(claims) => claims,
                Err(e) => return Ok(reject(req, e)),
            };

            let user_id = match claims.user_id() {
                Ok(user_id) => user_id,
                Err(e) => return Ok(reject(req, e)),
            };

            req.extensions_mut().insert(AuthContext {
                user_id,
                username: claims.username,
                permissions: claims.permissions,
            });

            service
                .call(req)
                .await
                .map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Answer the request directly with the standard error envelope, so the
/// rejection is an ordinary response rather than a service error.
fn reject<B>(req: ServiceRequest, err: DomainError) -> ServiceResponse<EitherBody<B>> {
    let response = domain_error_response(&err).map_into_right_body();
    req.into_response(response)
}

/// Build an actix error that renders as the standard envelope.
fn unauthorized(err: DomainError) -> Error {
    let response = domain_error_response(&err);
    InternalError::from_response(err, response).into()
}

fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|s| s.to_string())
}

impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| unauthorized(AuthError::Unauthorized.into()));
        ready(result)
    }
}
