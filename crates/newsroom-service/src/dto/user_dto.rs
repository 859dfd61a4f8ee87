//! User-related DTOs.

use chrono::{DateTime, Utc};
use newsroom_core::{Page, Role, User, UserId};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to register a user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 2, max = 32, message = "Nickname must be 2-32 characters"))]
    pub nickname: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub about: String,

    /// Defaults to the plain `user` role.
    #[serde(default)]
    pub roles: Vec<Role>,
}

/// Request to edit a user. Omitted fields keep their value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, max = 32, message = "Nickname must be 2-32 characters"))]
    pub nickname: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,

    #[validate(length(max = 1000))]
    pub about: Option<String>,

    pub roles: Option<Vec<Role>>,
}

/// User response DTO.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: UserId,
    pub nickname: String,
    pub email: String,
    pub about: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            nickname: user.nickname,
            email: user.email.into(),
            about: user.about,
            roles: user.roles,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// One page of users.
pub type UserListResponse = Page<UserResponse>;

#[cfg(test)]
mod tests {
    use super::*;
    use newsroom_core::ValidateExt;

    #[test]
    fn test_create_request_validation() {
        let request = CreateUserRequest {
            nickname: "x".to_string(),
            email: "not-an-email".to_string(),
            about: String::new(),
            roles: Vec::new(),
        };
        let err = request.validate_request().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("email"));
        assert!(message.contains("nickname"));
    }

    #[test]
    fn test_roles_default_to_empty() {
        let request: CreateUserRequest =
            serde_json::from_str(r#"{"nickname":"desk","email":"desk@example.com"}"#).unwrap();
        assert!(request.roles.is_empty());
        assert!(request.validate_request().is_ok());
    }
}
