//! Refresh credential generation and verification.
//!
//! The refresh credential is 32 bytes from the process CSPRNG, unique per
//! login. Only its verifier, a bcrypt hash encoded as base64 text, is ever
//! persisted; a new login overwrites the stored verifier and thereby
//! invalidates the previous refresh credential for that identity.

use crate::token::TokenError;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use rand::Rng;

/// bcrypt cost factor for refresh verifiers.
pub const VERIFIER_COST: u32 = bcrypt::DEFAULT_COST;

/// Outcome of checking a presented refresh credential against a stored
/// verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshCheck {
    /// Credential matches the verifier
    Ok,
    /// Well-formed verifier, wrong credential
    Mismatch,
    /// Stored verifier is not decodable verifier text
    Malformed,
}

/// Generate a fresh refresh credential.
#[must_use]
pub fn generate() -> String {
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 32] = rng.gen();
    URL_SAFE_NO_PAD.encode(random_bytes)
}

/// Derive the storage verifier for a refresh credential.
///
/// # Errors
///
/// Returns [`TokenError::HashingFailed`] if bcrypt rejects the input.
pub fn derive_verifier(refresh_token: &str) -> Result<String, TokenError> {
    let hash = bcrypt::hash(refresh_token, VERIFIER_COST)
        .map_err(|e| TokenError::HashingFailed(e.to_string()))?;
    Ok(STANDARD.encode(hash.as_bytes()))
}

/// Check a presented refresh credential against its stored verifier.
///
/// An undecodable verifier is reported distinctly from a plain mismatch so
/// storage corruption is never mistaken for a bad credential.
#[must_use]
pub fn verify_refresh(stored_verifier: &str, presented: &str) -> RefreshCheck {
    let Ok(decoded) = STANDARD.decode(stored_verifier) else {
        return RefreshCheck::Malformed;
    };
    let Ok(hash) = String::from_utf8(decoded) else {
        return RefreshCheck::Malformed;
    };

    match bcrypt::verify(presented, &hash) {
        Ok(true) => RefreshCheck::Ok,
        Ok(false) => RefreshCheck::Mismatch,
        // bcrypt only errors on unparseable hash text
        Err(_) => RefreshCheck::Malformed,
    }
}
