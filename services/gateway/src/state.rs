//! Shared gateway state.

use crate::clients::{AuthClient, LogClient};
use crate::config::Config;
use service_common::PlatformError;

/// Client handles threaded through the handlers; safe for concurrent use.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthClient,
    pub log: LogClient,
}

impl AppState {
    /// Build the downstream clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self, PlatformError> {
        Ok(Self {
            auth: AuthClient::new(config)?,
            log: LogClient::new(config)?,
        })
    }
}
