use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use std::sync::Arc;

use crate::api::response::ResponseEnvelope;
use crate::race;
use crate::AppState;

/// Entry point for credential checks: fan the raw body out to every
/// configured host and answer with the first success.
///
/// The payload is forwarded opaquely; its shape is between the client
/// and the backend hosts.
pub async fn request_api_token(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> ResponseEnvelope {
    let result = race::run_race(&state.http_client, &state.config.hosts, body).await;
    ResponseEnvelope::from_result(result)
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub hosts: usize,
    pub status: String,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        hosts: state.config.hosts.len(),
        status: "healthy".to_string(),
    })
}
