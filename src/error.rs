//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the service.
//! Store operations, token handling and request validation all report failures through
//! it, and handlers simply propagate it with `?`.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so every variant turns into
//! an HTTP response whose body is `{"message": "..."}`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

use crate::auth::token::TokenError;

/// Represents all possible errors that can occur while serving a request.
#[derive(Debug)]
pub enum AppError {
    /// A bearer token was required but missing, malformed or expired (HTTP 401).
    Unauthorized(String),
    /// The request could not be understood, e.g. a malformed JSON body (HTTP 400).
    BadRequest(String),
    /// Signup with a `useremail` that is already registered (HTTP 400).
    AlreadyExists,
    /// Login failed. Deliberately the same for an unknown account and a wrong password (HTTP 400).
    InvalidCredentials,
    /// The requested resource does not exist (HTTP 404).
    NotFound(String),
    /// A well-formed body failed field validation (HTTP 422).
    ValidationError(String),
    /// Unexpected server-side failure (HTTP 500).
    InternalServerError(String),
}

impl AppError {
    pub fn task_not_found() -> Self {
        AppError::NotFound("Task not found".into())
    }

    fn message(&self) -> String {
        match self {
            AppError::AlreadyExists => "User already exists".to_string(),
            AppError::InvalidCredentials => "Invalid credentials".to_string(),
            AppError::Unauthorized(msg)
            | AppError::BadRequest(msg)
            | AppError::NotFound(msg)
            | AppError::ValidationError(msg)
            | AppError::InternalServerError(msg) => msg.clone(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::AlreadyExists => write!(f, "Bad Request: User already exists"),
            AppError::InvalidCredentials => write!(f, "Bad Request: Invalid credentials"),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::AlreadyExists | AppError::InvalidCredentials => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Internal details stay in the log, not in the response body.
        let message = match self {
            AppError::InternalServerError(msg) => {
                log::error!("internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.message(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "message": message }))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

impl From<TokenError> for AppError {
    fn from(error: TokenError) -> AppError {
        AppError::Unauthorized(error.to_string())
    }
}
