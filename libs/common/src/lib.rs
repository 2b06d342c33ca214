//! Shared library for cross-cutting concerns in the session credential
//! platform.
//!
//! This crate provides centralized implementations for:
//! - The uniform JSON response envelope both services speak
//! - The shared platform error type
//! - HTTP client configuration and building
//! - The activity-log collaborator client
//! - Tracing initialization

#![forbid(unsafe_code)]

pub mod activity_log;
pub mod envelope;
pub mod error;
pub mod http;
pub mod tracing_config;

pub use activity_log::{ActivityLogClient, ActivityLogConfig};
pub use envelope::JsonEnvelope;
pub use error::PlatformError;
pub use http::{build_http_client, HttpConfig};
pub use tracing_config::{init_tracing, TracingConfig};
