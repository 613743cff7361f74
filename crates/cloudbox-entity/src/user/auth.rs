//! Authentication request and response bodies.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Login request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Credentials {
    /// Account e-mail.
    #[validate(email(message = "Invalid e-mail address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Registration {
    /// Account e-mail.
    #[validate(email(message = "Invalid e-mail address"))]
    pub email: String,
    /// Password.
    #[validate(length(min = 8, max = 100))]
    pub password: String,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
}

/// `PUT /users/me` body. Only the display name is editable.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ProfileUpdate {
    /// New display name.
    #[validate(length(min = 1, max = 100, message = "Name must be 1 to 100 characters"))]
    pub full_name: String,
}

/// `PUT /users/me/password` body.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PasswordChange {
    #[validate(length(min = 1, message = "Current password is required"))]
    pub current_password: String,
    #[validate(length(min = 8, max = 100, message = "New password must be 8 to 100 characters"))]
    pub new_password: String,
}

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Bearer token.
    pub access_token: String,
    /// Token scheme, always `bearer`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Summary of the signed-in account, shape left to the server.
    #[serde(default)]
    pub user: Option<serde_json::Value>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
