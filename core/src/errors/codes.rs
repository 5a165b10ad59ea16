//! Stable numeric error codes
//!
//! Codes are grouped into thousands bands; the band alone decides the
//! transport status, so new codes can be added inside a band without
//! touching the HTTP layer.

use serde::{Deserialize, Serialize};

/// Closed set of error codes exposed on the wire.
///
/// Bands: 1000s validation, 2000s authentication, 3000s authorization,
/// 4000s not-found, 5000s server, 6000s unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u16)]
pub enum ErrorCode {
    None = 0,

    // Validation (1000-1999)
    ValidationError = 1000,
    InvalidRequest = 1001,
    InvalidParameters = 1002,
    MalformedJson = 1003,
    InvalidEntityStatus = 1004,
    InvalidUserStatus = 1005,
    DuplicateEntry = 1007,
    BusinessRuleViolation = 1008,
    EmailExists = 1009,
    InvalidPassword = 1010,
    InvalidStockQuantity = 1011,

    // Authentication (2000-2999)
    Unauthorized = 2000,
    InvalidToken = 2001,
    TokenExpired = 2002,
    InvalidCredentials = 2003,
    UserNotActivated = 2004,
    UserLocked = 2005,
    UserSuspended = 2006,
    UserInactive = 2007,

    // Authorization (3000-3999)
    InsufficientPermissions = 3000,
    ResourceAccessDenied = 3005,

    // Not found (4000-4999)
    EntityNotFound = 4000,
    UserNotFound = 4001,
    CategoryNotFound = 4002,
    ProductNotFound = 4003,
    TokenNotFound = 4004,
    EndpointNotFound = 4006,

    // Server (5000-5999)
    InternalServerError = 5000,
    DatabaseError = 5001,
    UnexpectedError = 5003,

    // Unavailable (6000-6999)
    ServiceUnavailable = 6000,
    DatabaseUnavailable = 6001,
}

impl ErrorCode {
    pub fn as_u16(self) -> u16 {
        self as u16
    }

    /// HTTP status implied by the code's thousands band.
    pub fn http_status(self) -> u16 {
        match self.as_u16() / 1000 {
            1 => 400,
            2 => 401,
            3 => 403,
            4 => 404,
            6 => 503,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_map_to_expected_statuses() {
        assert_eq!(ErrorCode::ValidationError.http_status(), 400);
        assert_eq!(ErrorCode::InvalidCredentials.http_status(), 401);
        assert_eq!(ErrorCode::InsufficientPermissions.http_status(), 403);
        assert_eq!(ErrorCode::CategoryNotFound.http_status(), 404);
        assert_eq!(ErrorCode::DatabaseError.http_status(), 500);
        assert_eq!(ErrorCode::ServiceUnavailable.http_status(), 503);
    }

    #[test]
    fn discriminants_are_stable() {
        assert_eq!(ErrorCode::BusinessRuleViolation.as_u16(), 1008);
        assert_eq!(ErrorCode::InvalidStockQuantity.as_u16(), 1011);
        assert_eq!(ErrorCode::TokenExpired.as_u16(), 2002);
        assert_eq!(ErrorCode::UserNotFound.as_u16(), 4001);
    }
}
