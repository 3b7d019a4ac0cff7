//! Periodic readers for individual host resources.

pub mod cpu;
pub mod memory;
pub mod power;

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::error::Result;
use crate::state::{MetricsState, Resource};

pub use cpu::CpuSampler;
pub use memory::MemorySampler;
pub use power::PowerSampler;

/// A source of readings for one resource.
#[async_trait]
pub trait Sampler: Send {
    /// Which field of the snapshot this sampler feeds.
    fn resource(&self) -> Resource;

    /// Takes one reading.
    ///
    /// Returns `Ok(None)` when the sampler has nothing to report yet.
    async fn sample(&mut self) -> Result<Option<f64>>;
}

/// Drives `sampler` every `interval` until `shutdown` flips or its sender is dropped.
///
/// Failed readings are logged and retried on the next tick.
pub async fn run<S: Sampler>(
    mut sampler: S,
    state: MetricsState,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let resource = sampler.resource();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = shutdown.changed() => break,
        }

        match sampler.sample().await {
            Ok(Some(value)) => {
                tracing::trace!(%resource, value, "sampled");
                state.record(resource, value).await;
                metrics::counter!("monitor_samples_total", "sampler" => resource.as_str())
                    .increment(1);
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(%resource, error = %e, "sampling failed");
                metrics::counter!("monitor_sample_failures_total", "sampler" => resource.as_str())
                    .increment(1);
            }
        }
    }

    tracing::debug!(%resource, "sampler stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MonitorError;

    struct Scripted {
        readings: Vec<Result<Option<f64>>>,
    }

    #[async_trait]
    impl Sampler for Scripted {
        fn resource(&self) -> Resource {
            Resource::Memory
        }

        async fn sample(&mut self) -> Result<Option<f64>> {
            if self.readings.is_empty() {
                Ok(None)
            } else {
                self.readings.remove(0)
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn failed_readings_keep_last_value() {
        let state = MetricsState::new();
        let (tx, rx) = watch::channel(false);
        let sampler = Scripted {
            readings: vec![
                Ok(Some(10.0)),
                Err(MonitorError::parse("/proc/meminfo", "garbage")),
                Ok(None),
            ],
        };

        let handle = tokio::spawn(run(
            sampler,
            state.clone(),
            Duration::from_millis(100),
            rx,
        ));
        tokio::time::sleep(Duration::from_millis(350)).await;

        assert_eq!(state.snapshot().await.mem_usage, 10.0);

        tx.send(true).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn stops_when_shutdown_sender_is_dropped() {
        let (tx, rx) = watch::channel(false);
        let sampler = Scripted { readings: vec![] };

        let handle = tokio::spawn(run(
            sampler,
            MetricsState::new(),
            Duration::from_secs(1),
            rx,
        ));
        drop(tx);

        handle.await.unwrap();
    }
}
