//! Authorization middleware for protected routes.
//!
//! Extracts the presented access credential from the `access_token` cookie
//! or a `Bearer` header, validates it against the shared signing secret, and
//! binds the resolved identity into the request as a typed extension for
//! downstream handlers. Every failure class collapses to the same 401
//! envelope; the classes are only distinguished in local traces.

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::token::{decode_access, TokenError};
use axum::extract::{Request, State};
use axum::http::header::{AUTHORIZATION, COOKIE};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

/// Cookie carrying the access credential.
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Identity resolved from a validated access credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// Subject identity from the credential's claims
    pub subject: i64,
}

/// Middleware guarding protected routes.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(&request) else {
        debug!("no access credential presented");
        return AuthServiceError::Unauthorized.into_response();
    };

    match decode_access(&token, &state.config.signing_secret) {
        Ok(claims) => {
            request.extensions_mut().insert(AuthenticatedUser {
                subject: claims.sub,
            });
            next.run(request).await
        }
        Err(err) => {
            match err {
                TokenError::Expired => debug!("access credential expired"),
                TokenError::InvalidSignature => debug!("access credential signature mismatch"),
                _ => debug!(error = %err, "access credential rejected"),
            }
            AuthServiceError::Unauthorized.into_response()
        }
    }
}

/// Pull the credential out of its transport carrier.
fn extract_token(request: &Request) -> Option<String> {
    if let Some(value) = request.headers().get(COOKIE) {
        if let Ok(cookies) = value.to_str() {
            for cookie in cookies.split(';') {
                if let Some(token) = cookie
                    .trim()
                    .strip_prefix(ACCESS_TOKEN_COOKIE)
                    .and_then(|rest| rest.strip_prefix('='))
                {
                    if !token.is_empty() {
                        return Some(token.to_string());
                    }
                }
            }
        }
    }

    request
        .headers()
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|t| t.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn request_with_header(name: axum::http::HeaderName, value: &str) -> Request {
        axum::http::Request::builder()
            .uri("/users")
            .header(name, value)
            .body(Body::empty())
            .unwrap()
    }

    #[test]
    fn test_extract_from_cookie() {
        let req = request_with_header(COOKIE, "theme=dark; access_token=abc.def.ghi");
        assert_eq!(extract_token(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_extract_from_bearer() {
        let req = request_with_header(AUTHORIZATION, "Bearer abc.def.ghi");
        assert_eq!(extract_token(&req).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn test_empty_cookie_ignored() {
        let req = request_with_header(COOKIE, "access_token=");
        assert_eq!(extract_token(&req), None);
    }

    #[test]
    fn test_missing_carrier() {
        let req = axum::http::Request::builder()
            .uri("/users")
            .body(Body::empty())
            .unwrap();
        assert_eq!(extract_token(&req), None);
    }
}
