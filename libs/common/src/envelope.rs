//! The uniform JSON response envelope.
//!
//! Every caller-facing response on the platform, success or failure, is one
//! of these. Token fields are only present on a successful login.

use serde::{Deserialize, Serialize};

/// Caller-facing response envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JsonEnvelope {
    /// Whether the request failed
    pub error: bool,
    /// Human-readable outcome message
    pub message: String,
    /// Operation payload, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    /// Access credential, present on successful login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Refresh credential, present on successful login
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

impl JsonEnvelope {
    /// Create a success envelope with the given message.
    #[must_use]
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            error: false,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Create a failure envelope with the given message.
    #[must_use]
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            error: true,
            message: message.into(),
            ..Self::default()
        }
    }

    /// Attach a data payload.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Attach the credential pair.
    #[must_use]
    pub fn with_tokens(
        mut self,
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        self.access_token = Some(access_token.into());
        self.refresh_token = Some(refresh_token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_envelope_omits_optional_fields() {
        let env = JsonEnvelope::err("invalid credentials");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"error": true, "message": "invalid credentials"})
        );
    }

    #[test]
    fn test_success_envelope_carries_tokens() {
        let env = JsonEnvelope::ok("Logged in user me@here.com")
            .with_data(serde_json::json!({"id": 1}))
            .with_tokens("access", "refresh");
        let json = serde_json::to_value(&env).unwrap();
        assert_eq!(json["error"], false);
        assert_eq!(json["access_token"], "access");
        assert_eq!(json["refresh_token"], "refresh");
        assert_eq!(json["data"]["id"], 1);
    }

    #[test]
    fn test_envelope_round_trips() {
        let env = JsonEnvelope::ok("OK").with_tokens("a", "r");
        let decoded: JsonEnvelope =
            serde_json::from_str(&serde_json::to_string(&env).unwrap()).unwrap();
        assert_eq!(decoded, env);
    }
}
