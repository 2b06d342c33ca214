//! HTTP client for the external activity-log sink.
//!
//! The sink is append-only and best-effort: callers on the authentication
//! path record events through [`ActivityLogClient::record_detached`], which
//! runs the call on its own task with a bounded deadline so a slow or dead
//! sink can never stall or fail a login.

use crate::error::PlatformError;
use crate::http::{build_http_client, HttpConfig};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;
use url::Url;

/// Wire format of an activity event, as the log sink expects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEntry {
    /// Event name, e.g. `authentication` or `registrations`
    pub name: String,
    /// Free-form event payload
    pub data: String,
}

/// Activity-log client configuration.
#[derive(Debug, Clone)]
pub struct ActivityLogConfig {
    /// Base URL of the log sink
    pub base_url: Url,
    /// Service identifier included in local traces
    pub service_id: String,
    /// Deadline for a single record call (default: 10s)
    pub timeout: Duration,
}

impl ActivityLogConfig {
    /// Create a config for the given sink URL.
    #[must_use]
    pub fn new(base_url: Url, service_id: impl Into<String>) -> Self {
        Self {
            base_url,
            service_id: service_id.into(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Create a config with a custom deadline.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Client for the activity-log collaborator.
pub struct ActivityLogClient {
    config: ActivityLogConfig,
    http: Client,
}

impl ActivityLogClient {
    /// Create a new activity-log client.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ActivityLogConfig) -> Result<Self, PlatformError> {
        let http = build_http_client(&HttpConfig::default().with_timeout(config.timeout))?;
        Ok(Self { config, http })
    }

    /// Record an activity event, waiting for the sink's answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the sink is unreachable or answers with anything
    /// other than 202.
    pub async fn record(&self, name: &str, data: &str) -> Result<(), PlatformError> {
        let entry = ActivityEntry {
            name: name.to_string(),
            data: data.to_string(),
        };
        let url = self
            .config
            .base_url
            .join("log")
            .map_err(|e| PlatformError::invalid_input(e.to_string()))?;

        let response = self.http.post(url).json(&entry).send().await?;
        if response.status() != StatusCode::ACCEPTED {
            return Err(PlatformError::UnexpectedStatus {
                service: "log-service".to_string(),
                status: response.status().as_u16(),
            });
        }
        Ok(())
    }

    /// Record an activity event without waiting for it.
    ///
    /// The call runs on a detached task bounded by the client timeout.
    /// Failure is traced locally and otherwise dropped.
    pub fn record_detached(self: &Arc<Self>, name: impl Into<String>, data: impl Into<String>) {
        let client = Arc::clone(self);
        let name = name.into();
        let data = data.into();
        tokio::spawn(async move {
            if let Err(err) = client.record(&name, &data).await {
                warn!(
                    service = %client.config.service_id,
                    event = %name,
                    error = %err,
                    "activity log record failed"
                );
            }
        });
    }

    /// Get the service ID.
    #[must_use]
    pub fn service_id(&self) -> &str {
        &self.config.service_id
    }
}
