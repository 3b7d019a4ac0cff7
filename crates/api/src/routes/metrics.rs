//! The metrics document endpoint.

use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde_json::Value;

use crate::AppState;
use crate::error::{ApiError, MetricsFileError};
use crate::metrics_file;

/// GET /metrics — returns the metrics file parsed as JSON.
///
/// The file is read fresh on every request.
#[tracing::instrument(skip(state), fields(path = %state.metrics_file.display()))]
pub async fn get(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let start = Instant::now();
    let result = metrics_file::read(&state.metrics_file).await;
    metrics::histogram!("metrics_file_read_duration_seconds")
        .record(start.elapsed().as_secs_f64());

    let outcome = match &result {
        Ok(_) => "ok",
        Err(MetricsFileError::NotFound) => "not_found",
        Err(_) => "error",
    };
    metrics::counter!("metrics_file_requests_total", "outcome" => outcome).increment(1);

    match result {
        Ok(document) => Ok(Json(document)),
        Err(MetricsFileError::NotFound) => {
            tracing::debug!("metrics file absent");
            Err(MetricsFileError::NotFound.into())
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to load metrics file");
            Err(err.into())
        }
    }
}
