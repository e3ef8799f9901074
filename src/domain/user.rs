//! User domain model

use super::common::StringUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Role code assigned to every self-registered account. The role is fixed
/// server-side and never client-supplied.
pub const ROLE_USER: &str = "user";

/// User entity as stored in the database (joined with its role code)
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub uuid: StringUuid,
    pub name: String,
    pub username: String,
    pub email: String,
    /// Password digest produced by the hashing capability
    pub password: String,
    pub phone_number: String,
    pub role_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The user summary embedded in session tokens and returned by the API.
/// Immutable once issued inside a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub uuid: StringUuid,
    pub name: String,
    pub username: String,
    pub email: String,
    pub phone_number: String,
    /// Lowercase role code
    pub role: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            uuid: user.uuid,
            name: user.name.clone(),
            username: user.username.clone(),
            email: user.email.clone(),
            phone_number: user.phone_number.clone(),
            role: user.role_code.to_lowercase(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
    pub confirm_password: String,
    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,
}

/// Partial update of an existing account. A new password is optional; when
/// present it must match its confirmation.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateUserInput {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 3, max = 100))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: Option<String>,
    pub confirm_password: Option<String>,
    #[validate(length(min = 1, max = 32))]
    pub phone_number: String,
}

/// Fully-resolved update values handed to the repository.
/// `password` is `None` when the stored digest must be kept.
#[derive(Debug, Clone)]
pub struct UpdateUserRecord {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: Option<String>,
    pub phone_number: String,
}

/// New account record handed to the repository; `password` is already hashed.
#[derive(Debug, Clone)]
pub struct CreateUserRecord {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub phone_number: String,
    pub role_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        let now = Utc::now();
        User {
            uuid: StringUuid::new_v4(),
            name: "Admin".to_string(),
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password: "$argon2id$...".to_string(),
            phone_number: "+6281234567890".to_string(),
            role_code: "ADMIN".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_user_response_lowercases_role() {
        let user = sample_user();
        let resp = UserResponse::from(&user);
        assert_eq!(resp.role, "admin");
        assert_eq!(resp.username, "admin");
    }

    #[test]
    fn test_user_response_never_carries_password() {
        let user = sample_user();
        let json = serde_json::to_value(UserResponse::from(&user)).unwrap();
        assert!(json.get("password").is_none());
    }

    #[test]
    fn test_register_request_validation() {
        let input = RegisterRequest {
            name: "New User".to_string(),
            username: "newuser".to_string(),
            email: "invalid-email".to_string(),
            password: "password123".to_string(),
            confirm_password: "password123".to_string(),
            phone_number: "+628111111111".to_string(),
        };
        assert!(input.validate().is_err());

        let valid = RegisterRequest {
            email: "new@example.com".to_string(),
            ..input
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_login_request_requires_fields() {
        let input = LoginRequest {
            username: String::new(),
            password: "secret".to_string(),
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_update_input_short_password_rejected() {
        let input = UpdateUserInput {
            name: "Admin".to_string(),
            username: "admin".to_string(),
            email: "admin@example.com".to_string(),
            password: Some("short".to_string()),
            confirm_password: Some("short".to_string()),
            phone_number: "+628111111111".to_string(),
        };
        assert!(input.validate().is_err());
    }
}
