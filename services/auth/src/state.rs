//! Shared application state.

use crate::config::Config;
use crate::repository::UserRepository;
use service_common::ActivityLogClient;
use std::sync::Arc;

/// State threaded through the handlers.
///
/// Everything here is fixed at startup and safe for concurrent read-only use:
/// the signing secret inside the config is never mutated, and the repository
/// serializes its own writes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub users: Arc<dyn UserRepository>,
    pub activity_log: Arc<ActivityLogClient>,
}

impl AppState {
    /// Assemble the state from its parts.
    #[must_use]
    pub fn new(
        config: Config,
        users: Arc<dyn UserRepository>,
        activity_log: ActivityLogClient,
    ) -> Self {
        Self {
            config: Arc::new(config),
            users,
            activity_log: Arc::new(activity_log),
        }
    }
}
