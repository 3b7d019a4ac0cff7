//! Persists snapshots to the metrics file.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use common::SystemMetrics;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;

use crate::error::{MonitorError, Result};
use crate::state::MetricsState;

/// Sibling path the snapshot is staged in before the rename.
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Writes `snapshot` to `path` as pretty JSON.
///
/// The document is staged in a sibling file and renamed into place, so a
/// concurrent reader sees either the previous document or this one.
pub async fn write_snapshot(path: &Path, snapshot: &SystemMetrics) -> Result<()> {
    let mut json = serde_json::to_vec_pretty(snapshot)?;
    json.push(b'\n');

    let staging = staging_path(path);
    tokio::fs::write(&staging, &json)
        .await
        .map_err(MonitorError::io(&staging))?;
    tokio::fs::rename(&staging, path)
        .await
        .map_err(MonitorError::io(path))?;
    Ok(())
}

/// Writes the current snapshot every `interval` until shutdown.
pub async fn run(
    state: MetricsState,
    path: PathBuf,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = shutdown.changed() => break,
        }

        let snapshot = state.snapshot().await;
        match write_snapshot(&path, &snapshot).await {
            Ok(()) => {
                tracing::debug!(
                    cpu = snapshot.cpu_usage,
                    mem = snapshot.mem_usage,
                    power = snapshot.power_usage,
                    "metrics written"
                );
                metrics::counter!("monitor_writes_total", "outcome" => "ok").increment(1);
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to write metrics file");
                metrics::counter!("monitor_writes_total", "outcome" => "error").increment(1);
            }
        }
    }

    tracing::debug!("writer stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn staging_path_is_sibling() {
        assert_eq!(
            staging_path(Path::new("/tmp/metrics.json")),
            PathBuf::from("/tmp/metrics.json.tmp")
        );
    }

    #[tokio::test]
    async fn writes_camel_case_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        let snapshot = SystemMetrics {
            cpu_usage: 1.5,
            mem_usage: 2.5,
            power_usage: 3.5,
            timestamp: Utc::now(),
        };

        write_snapshot(&path, &snapshot).await.unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.ends_with('\n'));
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["cpuUsage"], 1.5);
        assert_eq!(json["memUsage"], 2.5);
        assert_eq!(json["powerUsage"], 3.5);
        assert!(!staging_path(&path).exists());
    }

    #[tokio::test]
    async fn overwrites_previous_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("metrics.json");
        std::fs::write(&path, "stale").unwrap();

        let snapshot = SystemMetrics::new();
        write_snapshot(&path, &snapshot).await.unwrap();

        let written: SystemMetrics =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(written, snapshot);
    }

    #[tokio::test]
    async fn missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent").join("metrics.json");

        let err = write_snapshot(&path, &SystemMetrics::new())
            .await
            .unwrap_err();
        assert!(matches!(err, MonitorError::Io { .. }));
    }
}
