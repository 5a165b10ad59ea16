//! Specific error sub-types bridged into [`DomainError`](super::DomainError)

use thiserror::Error;

use super::ErrorCode;

/// Authentication and authorization failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User account is inactive")]
    UserInactive,

    #[error("User account is locked")]
    UserLocked,

    #[error("User account is suspended")]
    UserSuspended,

    #[error("User account is pending activation")]
    UserNotActivated,

    #[error("Missing required permission: {permission}")]
    InsufficientPermissions { permission: String },

    #[error("Access to this resource is denied")]
    ResourceAccessDenied,

    #[error("Authentication required")]
    Unauthorized,
}

impl AuthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidCredentials => ErrorCode::InvalidCredentials,
            Self::UserInactive => ErrorCode::UserInactive,
            Self::UserLocked => ErrorCode::UserLocked,
            Self::UserSuspended => ErrorCode::UserSuspended,
            Self::UserNotActivated => ErrorCode::UserNotActivated,
            Self::InsufficientPermissions { .. } => ErrorCode::InsufficientPermissions,
            Self::ResourceAccessDenied => ErrorCode::ResourceAccessDenied,
            Self::Unauthorized => ErrorCode::Unauthorized,
        }
    }
}

/// Token issuance and verification failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Failed to generate token")]
    GenerationFailed,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,
}

impl TokenError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidToken => ErrorCode::InvalidToken,
            Self::TokenExpired => ErrorCode::TokenExpired,
            Self::GenerationFailed => ErrorCode::InternalServerError,
            Self::InvalidResetToken => ErrorCode::TokenNotFound,
        }
    }
}

/// Validation and business-rule failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Stock quantity cannot be negative")]
    InvalidStockQuantity,

    #[error("A record with the same {field} already exists")]
    DuplicateValue { field: String },

    #[error("Email address is already registered")]
    EmailExists,

    #[error("Password does not meet requirements")]
    InvalidPassword,

    #[error("{rule}")]
    BusinessRuleViolation { rule: String },

    #[error("{message}")]
    Invalid { message: String },
}

impl ValidationError {
    pub fn business_rule(rule: impl Into<String>) -> Self {
        Self::BusinessRuleViolation { rule: rule.into() }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidStockQuantity => ErrorCode::InvalidStockQuantity,
            Self::DuplicateValue { .. } => ErrorCode::DuplicateEntry,
            Self::EmailExists => ErrorCode::EmailExists,
            Self::InvalidPassword => ErrorCode::InvalidPassword,
            Self::BusinessRuleViolation { .. } => ErrorCode::BusinessRuleViolation,
            Self::Invalid { .. } => ErrorCode::ValidationError,
        }
    }
}

/// Missing-entity failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("User not found")]
    User,

    #[error("Category not found")]
    Category,

    #[error("Parent category with ID {parent_id} not found")]
    ParentCategory { parent_id: i64 },

    #[error("Product not found")]
    Product,

    #[error("{resource} not found")]
    Entity { resource: String },
}

impl NotFoundError {
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::User => ErrorCode::UserNotFound,
            Self::Category => ErrorCode::CategoryNotFound,
            Self::ParentCategory { .. } => ErrorCode::EntityNotFound,
            Self::Product => ErrorCode::ProductNotFound,
            Self::Entity { .. } => ErrorCode::EntityNotFound,
        }
    }
}
