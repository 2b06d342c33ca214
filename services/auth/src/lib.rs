//! Internal credential validation service.
//!
//! Issues short-lived access credentials and companion refresh credentials at
//! login, verifies presented access credentials on protected routes, and
//! persists refresh verifiers through the user-repository port.

#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod repository;
pub mod routes;
pub mod state;
pub mod token;

pub use config::Config;
pub use error::AuthServiceError;
pub use state::AppState;
