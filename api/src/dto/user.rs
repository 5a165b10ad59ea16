//! User DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use sf_core::domain::entities::User;

/// Public view of a user account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "must be 3 to 50 characters"))]
    pub username: String,

    #[validate(email(message = "must be a valid email address"))]
    pub email: String,

    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "must not be empty"))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100, message = "must not be empty"))]
    pub last_name: String,
}

/// Partial profile update; omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(email(message = "must be a valid email address"))]
    pub email: Option<String>,

    #[validate(length(min = 1, max = 100, message = "must not be empty"))]
    pub first_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "must not be empty"))]
    pub last_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub current_password: String,

    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub new_password: String,
}
