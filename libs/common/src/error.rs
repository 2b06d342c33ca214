//! Centralized error type shared by the platform services.

use thiserror::Error;

/// Common error type for platform operations.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Collaborator answered with an unexpected status
    #[error("Unexpected status from {service}: {status}")]
    UnexpectedStatus {
        /// The collaborator that answered
        service: String,
        /// The HTTP status it returned
        status: u16,
    },

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PlatformError {
    /// Create an invalid input error with the given message.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
