//! Mapping from domain errors to HTTP responses
//!
//! The numeric error-code band picks the status; the envelope shape is
//! `{success, data | error: {code, message, details}}` on every path.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

use sf_core::errors::{DomainError, ErrorCode};
use sf_shared::ApiResponse;

/// Render a domain error as an enveloped HTTP response.
///
/// Internal failures are reported with a generic message so storage
/// details never leak to the caller.
pub fn domain_error_response(err: &DomainError) -> HttpResponse {
    let code = err.code();
    let status =
        StatusCode::from_u16(code.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match err {
        DomainError::Database { .. } | DomainError::Internal { .. } => {
            log::error!("internal failure: {err}");
            "An internal error occurred".to_string()
        }
        _ => err.to_string(),
    };

    HttpResponse::build(status)
        .json(ApiResponse::<serde_json::Value>::failure(code.as_u16(), message))
}

pub fn ok_json<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success(data))
}

pub fn created_json<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Created().json(ApiResponse::success(data))
}

/// Render DTO validation failures with per-field details.
pub fn validation_failure(errors: &validator::ValidationErrors) -> HttpResponse {
    let mut details: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: invalid value"),
            })
        })
        .collect();
    details.sort();

    HttpResponse::BadRequest().json(ApiResponse::<serde_json::Value>::failure_with_details(
        ErrorCode::ValidationError.as_u16(),
        "Validation failed",
        details,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sf_core::errors::{AuthError, NotFoundError, ValidationError};

    #[test]
    fn status_follows_the_code_band() {
        let not_found = domain_error_response(&NotFoundError::Category.into());
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let unauthorized = domain_error_response(&AuthError::InvalidCredentials.into());
        assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

        let forbidden = domain_error_response(
            &AuthError::InsufficientPermissions {
                permission: "category_manage".into(),
            }
            .into(),
        );
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

        let invalid = domain_error_response(&ValidationError::InvalidStockQuantity.into());
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn internal_detail_is_not_leaked() {
        let response = domain_error_response(&DomainError::database("password for root denied"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = actix_web::body::to_bytes(response.into_body()).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"]["message"], "An internal error occurred");
        assert_eq!(json["error"]["code"], 5001);
    }
}
