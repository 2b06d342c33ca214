//! Gateway handlers: the submission router and the flows it dispatches to.

use crate::clients::{AuthSubmission, LogSubmission};
use crate::error::GatewayError;
use crate::state::AppState;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use service_common::JsonEnvelope;
use tracing::{debug, warn};

/// Tagged submission body accepted at the edge.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionRequest {
    pub action: String,
    #[serde(default)]
    pub auth: Option<AuthSubmission>,
    #[serde(default)]
    pub log: Option<LogSubmission>,
}

/// `POST /`: liveness answer.
pub async fn ping() -> Response {
    (StatusCode::OK, Json(JsonEnvelope::ok("OK"))).into_response()
}

/// `POST /handle`: dispatch a tagged submission.
///
/// An unrecognized tag, or a tag without its payload, is answered without
/// any downstream call being attempted.
pub async fn handle_submission(
    State(state): State<AppState>,
    payload: Result<Json<SubmissionRequest>, JsonRejection>,
) -> Result<Response, GatewayError> {
    let Json(submission) =
        payload.map_err(|_| GatewayError::BadRequest("invalid request body".to_string()))?;

    match submission.action.as_str() {
        "auth" => {
            let auth = submission
                .auth
                .ok_or_else(|| GatewayError::BadRequest("missing auth payload".to_string()))?;
            authenticate(&state, auth).await
        }
        "log" => {
            let log = submission
                .log
                .ok_or_else(|| GatewayError::BadRequest("missing log payload".to_string()))?;
            log_item(&state, log).await
        }
        other => {
            debug!(action = other, "unrecognized submission action");
            Err(GatewayError::BadRequest("invalid action".to_string()))
        }
    }
}

/// Forward a login attempt and translate the validation service's answer.
async fn authenticate(
    state: &AppState,
    submission: AuthSubmission,
) -> Result<Response, GatewayError> {
    let (status, upstream) = state.auth.authenticate(&submission).await.map_err(|err| {
        warn!(error = %err, "authentication service unreachable");
        GatewayError::Upstream("authentication service".to_string())
    })?;

    if status == StatusCode::UNAUTHORIZED {
        return Err(GatewayError::Unauthorized);
    }
    if status != StatusCode::ACCEPTED {
        warn!(status = %status, "unexpected status from authentication service");
        return Err(GatewayError::Upstream("authentication service".to_string()));
    }
    let Some(upstream) = upstream else {
        return Err(GatewayError::Upstream("authentication service".to_string()));
    };
    if upstream.error {
        return Err(GatewayError::Unauthorized);
    }

    // Propagate the upstream data and credential fields unchanged.
    let mut envelope = JsonEnvelope::ok("OK");
    envelope.data = upstream.data;
    envelope.access_token = upstream.access_token;
    envelope.refresh_token = upstream.refresh_token;

    Ok((StatusCode::ACCEPTED, Json(envelope)).into_response())
}

/// Forward a log entry to the sink.
async fn log_item(state: &AppState, submission: LogSubmission) -> Result<Response, GatewayError> {
    state.log.record(&submission).await.map_err(|err| {
        warn!(error = %err, "log service call failed");
        GatewayError::Upstream("log service".to_string())
    })?;

    Ok((StatusCode::ACCEPTED, Json(JsonEnvelope::ok("logged"))).into_response())
}
