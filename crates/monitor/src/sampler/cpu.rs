//! CPU usage from the aggregate line of `/proc/stat`.

use std::path::PathBuf;

use async_trait::async_trait;

use super::Sampler;
use crate::error::{MonitorError, Result};
use crate::state::Resource;

/// Cumulative jiffies from the `cpu` line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CpuTimes {
    /// idle + iowait
    pub idle: u64,
    /// user + nice + system + idle + iowait + irq + softirq + steal
    pub total: u64,
}

impl CpuTimes {
    /// Busy percentage between `prev` and `self`. Zero when no time elapsed.
    pub fn usage_since(&self, prev: &CpuTimes) -> f64 {
        let delta_total = self.total.saturating_sub(prev.total);
        let delta_idle = self.idle.saturating_sub(prev.idle);
        if delta_total == 0 {
            return 0.0;
        }
        let busy = delta_total.saturating_sub(delta_idle);
        100.0 * busy as f64 / delta_total as f64
    }
}

/// Parses the first (aggregate) line of `/proc/stat`.
///
/// Expects `cpu user nice system idle [iowait irq softirq steal ...]`;
/// absent trailing fields count as zero and fields past `steal` are ignored.
pub fn parse_cpu_line(line: &str) -> std::result::Result<CpuTimes, String> {
    let mut fields = line.split_whitespace();
    match fields.next() {
        Some("cpu") => {}
        other => return Err(format!("expected aggregate cpu line, found {other:?}")),
    }

    let mut values = [0u64; 8];
    let mut parsed = 0;
    for (slot, field) in values.iter_mut().zip(fields) {
        *slot = field
            .parse()
            .map_err(|e| format!("invalid counter {field:?}: {e}"))?;
        parsed += 1;
    }
    if parsed < 4 {
        return Err(format!("expected at least 4 counters, found {parsed}"));
    }

    let [_, _, _, idle, iowait, ..] = values;
    let overflow = || "counter sum overflows u64".to_string();
    Ok(CpuTimes {
        idle: idle.checked_add(iowait).ok_or_else(overflow)?,
        total: values
            .iter()
            .try_fold(0u64, |sum, &v| sum.checked_add(v))
            .ok_or_else(overflow)?,
    })
}

/// Samples CPU usage as the busy share between consecutive readings.
pub struct CpuSampler {
    path: PathBuf,
    prev: Option<CpuTimes>,
}

impl CpuSampler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            prev: None,
        }
    }
}

#[async_trait]
impl Sampler for CpuSampler {
    fn resource(&self) -> Resource {
        Resource::Cpu
    }

    /// The first call only primes the counters.
    async fn sample(&mut self) -> Result<Option<f64>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(MonitorError::io(&self.path))?;
        let line = contents.lines().next().unwrap_or_default();
        let current = parse_cpu_line(line).map_err(|reason| MonitorError::parse(&self.path, reason))?;

        let usage = self.prev.map(|prev| current.usage_since(&prev));
        self.prev = Some(current);
        Ok(usage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STAT: &str = "cpu  4705 356 584 3699 23 0 2 0 0 0\ncpu0 1393 280 326 2103 15 0 1 0 0 0\n";

    #[test]
    fn parses_aggregate_line() {
        let times = parse_cpu_line(STAT.lines().next().unwrap()).unwrap();
        assert_eq!(times.idle, 3699 + 23);
        assert_eq!(times.total, 4705 + 356 + 584 + 3699 + 23 + 2);
    }

    #[test]
    fn missing_trailing_fields_count_as_zero() {
        let times = parse_cpu_line("cpu 10 0 10 80").unwrap();
        assert_eq!(times, CpuTimes { idle: 80, total: 100 });
    }

    #[test]
    fn rejects_per_core_and_short_lines() {
        assert!(parse_cpu_line("cpu0 1 2 3 4").is_err());
        assert!(parse_cpu_line("cpu 1 2").is_err());
        assert!(parse_cpu_line("").is_err());
        assert!(parse_cpu_line("cpu 1 2 x 4").is_err());
    }

    #[test]
    fn overflowing_counters_are_rejected() {
        let err = parse_cpu_line("cpu 0 0 0 18446744073709551615 1 0 0 0").unwrap_err();
        assert!(err.contains("overflow"), "{err}");
        assert!(parse_cpu_line("cpu 18446744073709551615 1 0 0").is_err());
    }

    #[tokio::test]
    async fn overflowing_stat_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stat");
        std::fs::write(&path, "cpu 0 0 0 18446744073709551615 1 0 0 0\n").unwrap();

        let mut sampler = CpuSampler::new(&path);
        let err = sampler.sample().await.unwrap_err();
        assert!(matches!(err, MonitorError::Parse { .. }));
    }

    #[test]
    fn usage_is_busy_share_of_elapsed_time() {
        let prev = CpuTimes { idle: 100, total: 200 };
        let current = CpuTimes { idle: 175, total: 300 };
        assert_eq!(current.usage_since(&prev), 25.0);
    }

    #[test]
    fn usage_without_elapsed_time_is_zero() {
        let times = CpuTimes { idle: 5, total: 10 };
        assert_eq!(times.usage_since(&times), 0.0);
    }

    #[tokio::test]
    async fn first_sample_primes_then_reports_delta() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stat");
        std::fs::write(&path, "cpu 100 0 100 800 0 0 0 0\n").unwrap();

        let mut sampler = CpuSampler::new(&path);
        assert_eq!(sampler.sample().await.unwrap(), None);

        std::fs::write(&path, "cpu 150 0 150 900 0 0 0 0\n").unwrap();
        assert_eq!(sampler.sample().await.unwrap(), Some(50.0));
    }

    #[tokio::test]
    async fn missing_stat_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut sampler = CpuSampler::new(dir.path().join("stat"));

        let err = sampler.sample().await.unwrap_err();
        assert!(matches!(err, MonitorError::Io { .. }));
    }
}
