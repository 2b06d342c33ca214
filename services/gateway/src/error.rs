//! Gateway error taxonomy.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service_common::JsonEnvelope;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the gateway handlers.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Malformed or unroutable submission
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Downstream validation rejected the credentials
    #[error("Unauthorized")]
    Unauthorized,

    /// Downstream service unreachable or answering unexpectedly
    #[error("Error calling {0}")]
    Upstream(String),

    /// Anything else (details stay server-side)
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::BadRequest(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
            Self::Upstream(service) => (
                StatusCode::BAD_GATEWAY,
                format!("error calling {service}"),
            ),
            Self::Internal(cause) => {
                error!(error = %cause, "internal gateway error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(JsonEnvelope::err(message))).into_response()
    }
}
