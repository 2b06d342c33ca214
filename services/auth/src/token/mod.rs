//! Credential issuance and verification.
//!
//! The issuer is pure computation: it turns a validated identity and client
//! address into an access credential, a refresh credential and the refresh
//! credential's storage verifier. Persistence belongs to the caller.

pub mod claims;
pub mod issuer;
pub mod refresh;
pub mod verifier;

pub use claims::AccessClaims;
pub use issuer::{issue, IssuedCredentials, ACCESS_TOKEN_TTL_SECS};
pub use refresh::{derive_verifier, verify_refresh, RefreshCheck};
pub use verifier::decode_access;

use thiserror::Error;

/// Failures inside the credential primitives.
///
/// `Expired`, `InvalidSignature` and `Malformed` describe a presented access
/// credential; the remaining variants are internal faults and must never be
/// reported to a caller as a credential problem.
#[derive(Error, Debug)]
pub enum TokenError {
    /// Access credential expired
    #[error("Access credential expired")]
    Expired,

    /// Access credential signature mismatch
    #[error("Access credential signature invalid")]
    InvalidSignature,

    /// Access credential unparseable or carrying mistyped claims
    #[error("Access credential malformed: {0}")]
    Malformed(String),

    /// Signing the access credential failed
    #[error("Credential signing failed: {0}")]
    SigningFailed(String),

    /// Deriving the refresh verifier failed
    #[error("Verifier hashing failed: {0}")]
    HashingFailed(String),
}
