use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Path the monitor writes to and the API reads from unless overridden.
pub const DEFAULT_METRICS_PATH: &str = "/tmp/metrics.json";

/// A point-in-time snapshot of host resource usage.
///
/// This is the document the system monitor writes to the metrics file.
/// The HTTP service never deserializes into this type; it serves the
/// file as an opaque JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemMetrics {
    /// CPU busy time over the last sampling window, in percent.
    pub cpu_usage: f64,
    /// Memory in use (total minus available), in percent.
    pub mem_usage: f64,
    /// Power draw in watts, measured or simulated.
    pub power_usage: f64,
    /// When this snapshot was taken.
    pub timestamp: DateTime<Utc>,
}

impl SystemMetrics {
    /// Creates an all-zero snapshot stamped with the current time.
    pub fn new() -> Self {
        Self {
            cpu_usage: 0.0,
            mem_usage: 0.0,
            power_usage: 0.0,
            timestamp: Utc::now(),
        }
    }
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self::new()
    }
}
