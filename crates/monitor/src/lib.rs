//! System monitor daemon.
//!
//! Samples host resource usage and keeps the metrics file up to date:
//! 1. CPU usage from `/proc/stat`, as the busy share between two readings
//! 2. Memory usage from `/proc/meminfo`
//! 3. Power draw from the battery sensor, simulated when none is present
//!
//! Each sampler runs on its own task and records into a shared
//! [`MetricsState`]; a writer task periodically persists the snapshot.

pub mod config;
pub mod error;
pub mod sampler;
pub mod state;
pub mod writer;

use tokio::sync::watch;
use tokio::task::JoinSet;

pub use config::Config;
pub use error::{MonitorError, Result};
pub use sampler::{CpuSampler, MemorySampler, PowerSampler, Sampler};
pub use state::{MetricsState, Resource};

/// Owns the sampler and writer tasks for one metrics file.
pub struct Monitor {
    config: Config,
    state: MetricsState,
}

impl Monitor {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            state: MetricsState::new(),
        }
    }

    /// Handle to the readings shared by the tasks.
    pub fn state(&self) -> MetricsState {
        self.state.clone()
    }

    /// Runs all tasks until `shutdown` flips to `true` or its sender is dropped.
    pub async fn run(self, shutdown: watch::Receiver<bool>) {
        let Self { config, state } = self;
        let mut tasks = JoinSet::new();

        tasks.spawn(sampler::run(
            CpuSampler::new(config.proc_stat_path),
            state.clone(),
            config.sample_interval,
            shutdown.clone(),
        ));
        tasks.spawn(sampler::run(
            MemorySampler::new(config.proc_meminfo_path),
            state.clone(),
            config.sample_interval,
            shutdown.clone(),
        ));
        tasks.spawn(sampler::run(
            PowerSampler::new(config.power_now_path),
            state.clone(),
            config.sample_interval,
            shutdown.clone(),
        ));
        tasks.spawn(writer::run(
            state,
            config.metrics_file,
            config.write_interval,
            shutdown,
        ));

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                tracing::error!(error = %e, "monitor task failed");
            }
        }
    }
}
