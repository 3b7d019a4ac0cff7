//! Shared types for the metrics file service and the system monitor.

pub mod shutdown;
pub mod types;

pub use shutdown::{ShutdownSignal, shutdown_signal};
pub use types::{DEFAULT_METRICS_PATH, SystemMetrics};
