//! Route table.

use crate::handlers;
use crate::middleware::require_auth;
use crate::state::AppState;
use axum::routing::{get, post};
use axum::{middleware, Router};
use tower_http::trace::TraceLayer;

/// Build the service router.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/users", get(handlers::list_users))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .route("/authenticate", post(handlers::authenticate))
        .route("/register", post(handlers::register))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
