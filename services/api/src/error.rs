//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// Custom error type for the API service
///
/// Handler failures map to an HTTP status and a `{"message"}` JSON body.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Event or application absent
    #[error("{0}")]
    NotFound(String),

    /// Missing or invalid bearer token
    #[error("Unauthorized")]
    Unauthorized,

    /// Wrong role, or acting on someone else's application
    #[error("Forbidden")]
    Forbidden,

    /// The event's registration deadline (24h before start) has passed
    #[error("Registration for this event is closed")]
    RegistrationClosed,

    /// The caller already holds an application for this event
    #[error("You have already applied for this event")]
    AlreadyApplied,

    /// Anything else; details are logged, never leaked
    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::Validation(_)
            | ApiError::RegistrationClosed
            | ApiError::AlreadyApplied => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let ApiError::Internal(e) = &self {
            error!("Internal error: {:#}", e);
        }

        let body = Json(json!({
            "message": self.to_string(),
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
