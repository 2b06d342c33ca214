use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Payload of an access credential.
///
/// Exactly three claims: the subject identity, the client address the
/// credential was issued to, and the expiry instant. Validity is proven by
/// signature and expiry alone, never by lookup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Subject identity
    pub sub: i64,
    /// Client address at issuance
    pub ip: String,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims expiring `ttl_seconds` from now.
    #[must_use]
    pub fn new(subject: i64, client_ip: impl Into<String>, ttl_seconds: i64) -> Self {
        Self {
            sub: subject,
            ip: client_ip.into(),
            exp: Utc::now().timestamp() + ttl_seconds,
        }
    }
}
