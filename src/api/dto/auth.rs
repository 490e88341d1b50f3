//! Sign-up and sign-in payloads.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Credentials sent to `/user/signup`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SignupRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(example = "user@example.com", format = "email")]
    pub email: String,
    #[validate(length(min = 6, max = 72, message = "Password must be between 6 and 72 characters"))]
    #[schema(example = "password123", format = "password", min_length = 6, max_length = 72)]
    pub password: String,
}

/// Credentials sent to `/user/signin`.
///
/// Only presence is checked here; a wrong password and an unknown email get the same 401.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SigninRequest {
    #[validate(length(min = 1, message = "Email cannot be empty"))]
    #[schema(example = "user@example.com", format = "email")]
    pub email: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    #[schema(example = "password123", format = "password")]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SignupResponse {
    /// Id of the new user
    #[schema(example = 1)]
    pub id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SigninResponse {
    /// HS512 bearer token
    #[schema(example = "eyJ0eXAiOiJKV1QiLCJhbGciOiJIUzUxMiJ9...")]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signup_rejects_bad_email() {
        let request = SignupRequest {
            email: "not-an-email".to_string(),
            password: "password123".to_string(),
        };
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_signup_rejects_short_password() {
        let request = SignupRequest {
            email: "user@example.com".to_string(),
            password: "123".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_signin_only_requires_presence() {
        let request = SigninRequest {
            email: "whatever".to_string(),
            password: "x".to_string(),
        };
        assert!(request.validate().is_ok());
    }
}
