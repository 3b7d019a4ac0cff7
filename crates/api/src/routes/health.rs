//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Whether the metrics file currently exists. Informational only.
    pub metrics_file_present: bool,
}

/// GET /health — the service is up even when the metrics file is missing.
pub async fn check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let metrics_file_present = tokio::fs::try_exists(&state.metrics_file)
        .await
        .unwrap_or(false);

    Json(HealthResponse {
        status: "ok",
        metrics_file_present,
    })
}
