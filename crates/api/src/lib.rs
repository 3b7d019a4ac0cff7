//! HTTP service that serves a JSON metrics file written by an external process.
//!
//! `GET /metrics` re-reads the configured file on every request and returns
//! it as-is, or a structured JSON error when the file is missing or unreadable.

pub mod config;
pub mod error;
pub mod metrics_file;
pub mod routes;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;

/// Shared application state accessible from all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Location of the metrics document.
    pub metrics_file: PathBuf,
}

impl AppState {
    pub fn new(metrics_file: impl Into<PathBuf>) -> Self {
        Self {
            metrics_file: metrics_file.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.metrics_file.clone())
    }
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    let prometheus_router = Router::new()
        .route("/prometheus", get(routes::prometheus::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/metrics", get(routes::metrics::get))
        .with_state(state)
        .merge(prometheus_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
