//! The credential issuer.

use crate::token::claims::AccessClaims;
use crate::token::{refresh, TokenError};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::{ExposeSecret, SecretString};

/// Access credentials live for 15 minutes; expiry is their only termination
/// path.
pub const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Everything a successful login hands back, plus the verifier the
/// orchestrator must persist.
#[derive(Debug, Clone)]
pub struct IssuedCredentials {
    /// Signed access credential
    pub access_token: String,
    /// Raw refresh credential, handed to the client once and never stored
    pub refresh_token: String,
    /// Storage form of the refresh credential
    pub refresh_verifier: String,
}

/// Issue an access credential and a companion refresh credential for a
/// validated identity.
///
/// Pure computation: no persistence, no side effects.
///
/// # Errors
///
/// Returns [`TokenError::SigningFailed`] or [`TokenError::HashingFailed`] on
/// key-material or hashing faults. Neither is ever a caller-facing
/// "invalid credentials".
pub fn issue(
    subject: i64,
    client_ip: &str,
    signing_secret: &SecretString,
) -> Result<IssuedCredentials, TokenError> {
    let claims = AccessClaims::new(subject, client_ip, ACCESS_TOKEN_TTL_SECS);
    let key = EncodingKey::from_secret(signing_secret.expose_secret().as_bytes());

    let access_token = encode(&Header::new(Algorithm::HS512), &claims, &key)
        .map_err(|e| TokenError::SigningFailed(e.to_string()))?;

    let refresh_token = refresh::generate();
    let refresh_verifier = refresh::derive_verifier(&refresh_token)?;

    Ok(IssuedCredentials {
        access_token,
        refresh_token,
        refresh_verifier,
    })
}
