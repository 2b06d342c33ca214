//! Clients for the downstream platform services.

use crate::config::Config;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use service_common::{build_http_client, HttpConfig, JsonEnvelope, PlatformError};
use std::time::Duration;
use url::Url;

/// Credentials forwarded to the validation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSubmission {
    pub email: String,
    pub password: String,
}

/// Event forwarded to the log sink.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSubmission {
    pub name: String,
    pub data: String,
}

/// Client for the internal validation service.
#[derive(Clone)]
pub struct AuthClient {
    http: Client,
    base_url: Url,
}

impl AuthClient {
    /// Build the client from gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, PlatformError> {
        let http = build_http_client(
            &HttpConfig::default()
                .with_timeout(Duration::from_secs(config.request_timeout_secs)),
        )?;
        Ok(Self {
            http,
            base_url: config.auth_service_url.clone(),
        })
    }

    /// Forward a login attempt, returning the upstream status and envelope.
    ///
    /// Status interpretation belongs to the caller. The body is only decoded
    /// on a 202 answer; a rejection's status stands on its own, whatever the
    /// body looks like.
    pub async fn authenticate(
        &self,
        submission: &AuthSubmission,
    ) -> Result<(StatusCode, Option<JsonEnvelope>), PlatformError> {
        let url = self
            .base_url
            .join("authenticate")
            .map_err(|e| PlatformError::invalid_input(e.to_string()))?;

        let response = self.http.post(url).json(submission).send().await?;
        let status = response.status();
        if status != StatusCode::ACCEPTED {
            return Ok((status, None));
        }
        let envelope: JsonEnvelope = response.json().await?;
        Ok((status, Some(envelope)))
    }
}

/// Client for the activity-log sink.
#[derive(Clone)]
pub struct LogClient {
    http: Client,
    base_url: Url,
}

impl LogClient {
    /// Build the client from gateway configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, PlatformError> {
        let http = build_http_client(
            &HttpConfig::default()
                .with_timeout(Duration::from_secs(config.request_timeout_secs)),
        )?;
        Ok(Self {
            http,
            base_url: config.log_service_url.clone(),
        })
    }

    /// Forward a log entry; anything but 202 is an unexpected status.
    pub async fn record(&self, submission: &LogSubmission) -> Result<(), PlatformError> {
        let url = self
            .base_url
            .join("log")
            .map_err(|e| PlatformError::invalid_input(e.to_string()))?;

        let response = self.http.post(url).json(submission).send().await?;
        if response.status() != StatusCode::ACCEPTED {
            return Err(PlatformError::UnexpectedStatus {
                service: "log-service".to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }
}
