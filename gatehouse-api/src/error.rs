/// Error handling for the API server
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts automatically
/// to the appropriate status code and a `{error, message}` JSON body.
///
/// Every error is terminal for its request and reported synchronously;
/// nothing here is retried.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use gatehouse_shared::auth::access::AccessError;
use gatehouse_shared::auth::password::PasswordError;
use gatehouse_shared::directory::DirectoryError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Unauthorized (401) - missing, malformed, expired, or forged token
    Unauthorized(String),

    /// Forbidden (403) - valid token, insufficient privilege
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - duplicate email
    Conflict(String),

    /// Invalid credentials (409)
    ///
    /// Login failure keeps the original service's 409 and returns the
    /// same response for an unknown email and a wrong password, so the
    /// set of registered emails cannot be probed.
    InvalidCredentials,

    /// Internal server error (500)
    InternalError(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "conflict", "unauthorized")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InvalidCredentials => write!(f, "Invalid email or password."),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::InvalidCredentials => (
                StatusCode::CONFLICT,
                "invalid_credentials",
                "Invalid email or password.".to_string(),
            ),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Convert directory errors to API errors
impl From<DirectoryError> for ApiError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::EmailTaken => {
                ApiError::Conflict("E-mail already registered".to_string())
            }
            DirectoryError::NotFound(id) => ApiError::NotFound(format!("Account {} not found", id)),
        }
    }
}

/// Convert access-control denials to API errors
impl From<AccessError> for ApiError {
    fn from(err: AccessError) -> Self {
        match err {
            AccessError::MissingAdmin => ApiError::Forbidden("missing admin permissions".to_string()),
        }
    }
}

/// Convert password hashing failures to API errors
///
/// Hashing is the only primitive allowed to error past its boundary, and
/// only at registration time; verification failures never reach here.
impl From<PasswordError> for ApiError {
    fn from(err: PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert token issuance failures to API errors
impl From<gatehouse_shared::auth::jwt::JwtError> for ApiError {
    fn from(err: gatehouse_shared::auth::jwt::JwtError) -> Self {
        match err {
            gatehouse_shared::auth::jwt::JwtError::CreateError(msg) => {
                ApiError::InternalError(format!("Token issuance failed: {}", msg))
            }
            gatehouse_shared::auth::jwt::JwtError::Expired => {
                ApiError::Unauthorized("Token expired".to_string())
            }
            gatehouse_shared::auth::jwt::JwtError::ValidationError(msg) => {
                ApiError::Unauthorized(msg)
            }
        }
    }
}
