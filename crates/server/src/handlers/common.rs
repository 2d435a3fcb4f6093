//! Root and health endpoints.

use crate::error::ApiResult;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use serde::Serialize;

/// Greeting response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /
pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "Hello, world!".to_string(),
    })
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// GET /health
///
/// Probes both stores; intentionally unauthenticated for load balancer
/// probes.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    state.service.health_check().await?;
    Ok(Json(HealthResponse { status: "ok" }))
}
