//! Public-facing gateway.
//!
//! Accepts tagged submissions at the edge, forwards them to the internal
//! validation service or the log sink, and translates each downstream
//! outcome into the uniform caller-facing envelope.

#![forbid(unsafe_code)]

pub mod clients;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::Config;
pub use error::GatewayError;
pub use state::AppState;
