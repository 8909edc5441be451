use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::handlers;
use crate::probe::AUTH_PATH;
use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // The delegate answers on the same path it probes upstream, so
    // clients that used to talk to a single host directly need no
    // change beyond the base URL.
    Router::new()
        .route(AUTH_PATH, post(handlers::request_api_token))
        .route("/_internal/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
