//! Top-level domain error and result alias

use thiserror::Error;

use super::types::{AuthError, NotFoundError, TokenError, ValidationError};
use super::ErrorCode;

/// Result alias used by every fallible domain operation.
pub type DomainResult<T> = Result<T, DomainError>;

/// Unified error for the domain layer.
///
/// Sub-enums bridge in transparently so services can return their own
/// specific error and callers still match on one type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    #[error("Database error: {message}")]
    Database { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Service unavailable: {message}")]
    Unavailable { message: String },
}

impl DomainError {
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Stable numeric code for the wire envelope.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Auth(e) => e.code(),
            Self::Token(e) => e.code(),
            Self::Validation(e) => e.code(),
            Self::NotFound(e) => e.code(),
            Self::Database { .. } => ErrorCode::DatabaseError,
            Self::Internal { .. } => ErrorCode::InternalServerError,
            Self::Unavailable { .. } => ErrorCode::ServiceUnavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_errors_bridge_transparently() {
        let err: DomainError = NotFoundError::Category.into();
        assert_eq!(err.code(), ErrorCode::CategoryNotFound);
        assert_eq!(err.to_string(), "Category not found");
    }

    #[test]
    fn validation_message_surfaces_verbatim() {
        let err: DomainError =
            ValidationError::business_rule("Cannot delete category with child categories").into();
        assert_eq!(err.code(), ErrorCode::BusinessRuleViolation);
        assert_eq!(
            err.to_string(),
            "Cannot delete category with child categories"
        );
    }

    #[test]
    fn database_errors_map_to_server_band() {
        let err = DomainError::database("connection reset");
        assert_eq!(err.code().http_status(), 500);
    }
}
