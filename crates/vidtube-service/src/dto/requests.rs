//! Request DTOs for API endpoints
//!
//! JSON bodies use camelCase keys. DTOs implement `Validate` for format
//! checks; presence of required text is checked by the services so the
//! "All fields are required" message stays uniform.

use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Auth Requests
// ============================================================================

/// Registration form (multipart text fields)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(max = 32, message = "Username must be at most 32 characters"))]
    pub username: String,

    #[validate(length(max = 128, message = "Password must be at most 128 characters"))]
    pub password: String,
}

impl RegisterRequest {
    /// True when any field is empty or whitespace
    pub fn has_blank_field(&self) -> bool {
        [&self.full_name, &self.email, &self.username, &self.password]
            .iter()
            .any(|field| field.trim().is_empty())
    }
}

/// Login with either username or email
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: Option<String>,

    pub email: Option<String>,

    #[serde(default)]
    pub password: String,
}

/// Token refresh request; the cookie takes priority over the body
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Option<String>,
}

/// Change password request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,

    #[validate(length(min = 1, max = 128, message = "New password must be 1-128 characters"))]
    pub new_password: String,
}

// ============================================================================
// User Requests
// ============================================================================

/// Update name and email of the current user
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    #[serde(default)]
    #[validate(length(max = 100, message = "Full name must be at most 100 characters"))]
    pub full_name: String,

    #[serde(default)]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}
