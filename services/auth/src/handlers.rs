//! HTTP handlers for the credential service.

use crate::error::AuthServiceError;
use crate::middleware::{AuthenticatedUser, ACCESS_TOKEN_COOKIE};
use crate::repository::NewUser;
use crate::state::AppState;
use crate::token::{self, ACCESS_TOKEN_TTL_SECS};
use axum::extract::rejection::JsonRejection;
use axum::extract::{ConnectInfo, State};
use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use serde::Deserialize;
use service_common::JsonEnvelope;
use std::net::SocketAddr;
use tracing::{debug, info};

/// Login submission body.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /authenticate`: the login flow.
///
/// Resolves the identity, issues the credential pair, persists the refresh
/// verifier (overwriting the previous one for that identity), and answers
/// 202 with the envelope plus an `access_token` cookie. The activity-log
/// call is detached and can never fail the login.
pub async fn authenticate(
    State(state): State<AppState>,
    ConnectInfo(remote): ConnectInfo<SocketAddr>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Response, AuthServiceError> {
    let Json(credentials) = payload
        .map_err(|_| AuthServiceError::BadRequest("invalid request body".to_string()))?;

    // Unknown email and wrong password must be indistinguishable.
    let user = state
        .users
        .get_by_email(&credentials.email)
        .await
        .map_err(|err| {
            debug!(error = %err, "login lookup failed");
            AuthServiceError::InvalidCredentials
        })?;

    let matches = state
        .users
        .password_matches(&credentials.password, &user)
        .await
        .map_err(|err| {
            debug!(error = %err, "password check failed");
            AuthServiceError::InvalidCredentials
        })?;
    if !matches {
        debug!("password mismatch");
        return Err(AuthServiceError::InvalidCredentials);
    }

    // Port stripped: only the IP half of the remote address binds the token.
    let client_ip = remote.ip().to_string();

    let issued = token::issue(user.id, &client_ip, &state.config.signing_secret)
        .map_err(|e| AuthServiceError::Internal(e.into()))?;

    // Persistence failure is an internal error; the access credential handed
    // out above stays valid until its own expiry regardless.
    state
        .users
        .update_refresh_verifier(user.id, &issued.refresh_verifier)
        .await
        .map_err(|e| AuthServiceError::Internal(e.into()))?;

    state
        .activity_log
        .record_detached("authentication", format!("{} logged in", user.email));

    info!(subject = user.id, "login succeeded");

    let envelope = JsonEnvelope::ok(format!("Logged in user {}", user.email))
        .with_data(serde_json::to_value(&user).map_err(|e| AuthServiceError::Internal(e.into()))?)
        .with_tokens(&issued.access_token, &issued.refresh_token);

    Ok((
        StatusCode::ACCEPTED,
        [(SET_COOKIE, access_token_cookie(&issued.access_token))],
        Json(envelope),
    )
        .into_response())
}

/// `POST /register`: create a user record.
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Response, AuthServiceError> {
    let Json(new_user) = payload
        .map_err(|_| AuthServiceError::BadRequest("invalid request body".to_string()))?;

    let email = new_user.email.clone();
    let id = state
        .users
        .insert(new_user)
        .await
        .map_err(|err| AuthServiceError::BadRequest(err.to_string()))?;

    state
        .activity_log
        .record_detached("registrations", format!("{email} has been registered"));

    Ok((
        StatusCode::ACCEPTED,
        Json(JsonEnvelope::ok(format!(
            "Successfully created new user, id: {id}"
        ))),
    )
        .into_response())
}

/// `GET /users`: list users; protected by the authorization middleware.
pub async fn list_users(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> Result<Response, AuthServiceError> {
    debug!(subject = caller.subject, "listing users");

    let users = state
        .users
        .get_all()
        .await
        .map_err(|e| AuthServiceError::Internal(e.into()))?;

    let envelope = JsonEnvelope::ok("Fetched all users")
        .with_data(serde_json::to_value(users).map_err(|e| AuthServiceError::Internal(e.into()))?);

    Ok((StatusCode::ACCEPTED, Json(envelope)).into_response())
}

/// Build the `Set-Cookie` value carrying the access credential.
///
/// Same-site, HTTP-only, secure; lifetime equal to the credential's own TTL.
fn access_token_cookie(access_token: &str) -> String {
    format!(
        "{ACCESS_TOKEN_COOKIE}={access_token}; Path=/; Max-Age={ACCESS_TOKEN_TTL_SECS}; HttpOnly; Secure; SameSite=Strict"
    )
}
