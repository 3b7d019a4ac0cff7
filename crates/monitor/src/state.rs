//! Shared snapshot updated by the samplers and read by the writer.

use std::sync::Arc;

use chrono::Utc;
use common::SystemMetrics;
use tokio::sync::RwLock;

/// The resource a sampler measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Cpu,
    Memory,
    Power,
}

impl Resource {
    /// Label used in logs and metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Resource::Cpu => "cpu",
            Resource::Memory => "memory",
            Resource::Power => "power",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cloneable handle to the latest readings.
#[derive(Clone, Default)]
pub struct MetricsState {
    inner: Arc<RwLock<SystemMetrics>>,
}

impl MetricsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the latest reading for `resource`.
    pub async fn record(&self, resource: Resource, value: f64) {
        let mut metrics = self.inner.write().await;
        match resource {
            Resource::Cpu => metrics.cpu_usage = value,
            Resource::Memory => metrics.mem_usage = value,
            Resource::Power => metrics.power_usage = value,
        }
    }

    /// Returns a copy of the current readings stamped with the current time.
    pub async fn snapshot(&self) -> SystemMetrics {
        let mut snapshot = *self.inner.read().await;
        snapshot.timestamp = Utc::now();
        snapshot
    }
}
