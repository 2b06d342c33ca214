//! Type-safe configuration with validation.
//!
//! The signing secret is process-wide state loaded once at startup. There is
//! deliberately no in-code default for it: a missing or empty
//! `JWT_SIGNING_SECRET` fails startup instead of silently signing with a
//! placeholder.

use secrecy::{ExposeSecret, SecretString};
use std::env;
use thiserror::Error;
use url::Url;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid URL format
    #[error("Invalid URL for {field}: {reason}")]
    InvalidUrl { field: String, reason: String },

    /// Invalid port number
    #[error("Invalid port: must be between 1 and 65535")]
    InvalidPort,

    /// Missing required field
    #[error("Missing required configuration: {0}")]
    MissingRequired(String),

    /// Environment variable parse error
    #[error("Failed to parse environment variable {name}: {reason}")]
    ParseError { name: String, reason: String },
}

/// Service configuration with validation.
#[derive(Clone)]
pub struct Config {
    /// Server host address
    pub host: String,
    /// Server port (1-65535)
    pub port: u16,
    /// Shared credential signing secret, required and non-empty
    pub signing_secret: SecretString,
    /// Activity-log sink URL
    pub log_service_url: Url,
}

impl Config {
    /// Loads configuration from environment variables with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable fails to parse or the signing secret
    /// is missing or empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let signing_secret = env::var("JWT_SIGNING_SECRET")
            .map(SecretString::from)
            .map_err(|_| ConfigError::MissingRequired("JWT_SIGNING_SECRET".to_string()))?;

        let config = Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_env("PORT", 8081)?,
            signing_secret,
            log_service_url: parse_url_env("LOG_SERVICE_URL", "http://log-service:82")?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidPort);
        }
        if self.signing_secret.expose_secret().is_empty() {
            return Err(ConfigError::MissingRequired(
                "JWT_SIGNING_SECRET".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parse an environment variable with a default value.
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| ConfigError::ParseError {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}

/// Parse a URL environment variable with a default value.
fn parse_url_env(name: &str, default: &str) -> Result<Url, ConfigError> {
    let url_str = env::var(name).unwrap_or_else(|_| default.to_string());
    Url::parse(&url_str).map_err(|e| ConfigError::InvalidUrl {
        field: name.to_string(),
        reason: e.to_string(),
    })
}
