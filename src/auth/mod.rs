pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::AccountView;

// Re-export necessary items
pub use extractors::AuthenticatedAccount;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, SessionIssuer, TokenError};

/// Represents the payload for a new account registration request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    /// Display name. Must not be empty.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Must be a valid email address; it becomes the account's unique key.
    #[validate(email)]
    pub useremail: String,
    /// Must be at least 8 characters long.
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// Represents the payload for a login request.
///
/// Only presence is checked, so a malformed email still gets the generic
/// "Invalid credentials" answer.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub useremail: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Signed session token, valid for the configured ttl.
    pub token: String,
    pub user: AccountView,
}

/// Plain `{message}` acknowledgement used by signup and delete.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
