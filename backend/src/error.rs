//! Application error handling
//!
//! This module provides unified error handling for the API,
//! converting internal errors to appropriate HTTP responses.
//!
//! The response body shape is always `{"message": "..."}`, matching the
//! success envelope, so clients parse one shape for every outcome. Login
//! failures collapse to a single "Invalid credentials" message regardless
//! of whether the username or the password was wrong.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gatehouse_shared::MessageResponse;
use thiserror::Error;
use tracing::error;

use crate::repositories::StoreError;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    /// Duplicate username. Maps to 422, not 409; the contract predates
    /// this service and clients depend on it.
    #[error("{0}")]
    Conflict(String),

    /// Malformed payload or a too-short password.
    #[error("{0}")]
    Unprocessable(String),

    /// Unknown username, failed password verification, or missing session.
    #[error("{0}")]
    Unauthorized(String),

    /// Session store failed while destroying an existing session.
    #[error("Could not logout")]
    SessionDestroy(#[source] anyhow::Error),

    /// Anything else: hashing failure, store backend failure. The cause is
    /// logged, never serialized into the response.
    #[error("Server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Conflict(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            ApiError::SessionDestroy(err) => {
                error!("Session destroy failed: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Could not logout".to_string(),
                )
            }
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                )
            }
        };

        let body = Json(MessageResponse::new(message));

        (status, body).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // Mirrors the registration contract: a lost insert race reads
            // the same as a failed pre-check
            StoreError::DuplicateUsername => ApiError::Conflict("Username taken".to_string()),
            StoreError::Backend(err) => ApiError::Internal(err),
        }
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
