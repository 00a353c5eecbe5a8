//! Custom error types for the authentication service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the authentication service
///
/// Every handler-level failure maps to an HTTP status and a `{"message"}`
/// JSON body; nothing propagates as an unhandled fault.
#[derive(Error, Debug)]
pub enum AuthError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Signin failure ("Invalid email" / "Invalid password")
    #[error("{0}")]
    InvalidCredentials(String),

    /// User or admin record absent
    #[error("{0}")]
    NotFound(String),

    /// Missing or invalid bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Authenticated but with the wrong role
    #[error("Forbidden")]
    Forbidden,

    /// Duplicate email at signup
    #[error("{0}")]
    Conflict(String),

    /// Wrong or expired one-time code; a single message for both so the
    /// response does not reveal which check failed
    #[error("Invalid or expired OTP")]
    InvalidOrExpiredOtp,

    /// Reset attempted with a password shorter than 6 characters
    #[error("Password must be at least 6 characters long")]
    PasswordTooShort,

    /// Too many OTP requests for the same email
    #[error("Too many attempts, please try again later")]
    RateLimited,

    /// The email provider refused or failed the OTP send
    #[error("Failed to send OTP email")]
    EmailDispatch,

    /// Anything else; details are logged, never leaked
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            AuthError::Validation(_)
            | AuthError::InvalidCredentials(_)
            | AuthError::InvalidOrExpiredOtp
            | AuthError::PasswordTooShort => StatusCode::BAD_REQUEST,
            AuthError::NotFound(_) => StatusCode::NOT_FOUND,
            AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Conflict(_) => StatusCode::CONFLICT,
            AuthError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            AuthError::EmailDispatch | AuthError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if let AuthError::Internal(e) = &self {
            error!("Internal error: {:#}", e);
        }

        let body = Json(json!({
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Type alias for authentication results
pub type AuthResult<T> = Result<T, AuthError>;
