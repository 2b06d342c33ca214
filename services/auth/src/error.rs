//! Error taxonomy for the credential service.
//!
//! Caller-facing messages are deliberately generic. In particular, an
//! unknown email and a wrong password collapse to one undifferentiated
//! "invalid credentials" answer, and every authorization failure collapses
//! to one "unauthorized" answer; detail only reaches the server-side traces.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service_common::JsonEnvelope;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the credential service handlers.
#[derive(Error, Debug)]
pub enum AuthServiceError {
    /// Request body failed to decode
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown identity or password mismatch
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Access-credential check failed at the middleware
    #[error("Unauthorized")]
    Unauthorized,

    /// Signing, hashing or repository failure (details stay server-side)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            Self::InvalidCredentials => {
                (StatusCode::BAD_REQUEST, "invalid credentials".to_string())
            }
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            Self::Internal(cause) => {
                error!(error = %cause, "internal error on the auth path");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(JsonEnvelope::err(message))).into_response()
    }
}
