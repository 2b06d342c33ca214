//! Route table.

use crate::handlers;
use crate::state::AppState;
use axum::routing::post;
use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the gateway router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", post(handlers::ping))
        .route("/handle", post(handlers::handle_submission))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
