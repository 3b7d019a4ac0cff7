//! Monitor configuration loaded from environment variables.

use std::path::PathBuf;
use std::time::Duration;

use common::DEFAULT_METRICS_PATH;

/// Daemon configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `METRICS_FILE` — output path (default: `/tmp/metrics.json`)
/// - `SAMPLE_INTERVAL_MS` — sampler period (default: `1000`)
/// - `WRITE_INTERVAL_MS` — writer period (default: `2000`)
/// - `PROC_STAT_PATH`, `PROC_MEMINFO_PATH`, `POWER_NOW_PATH` — sensor sources
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `json` for JSON log lines
#[derive(Debug, Clone)]
pub struct Config {
    pub metrics_file: PathBuf,
    pub sample_interval: Duration,
    pub write_interval: Duration,
    pub proc_stat_path: PathBuf,
    pub proc_meminfo_path: PathBuf,
    pub power_now_path: PathBuf,
    pub log_level: String,
    pub json_logs: bool,
}

fn path_var(name: &str, default: PathBuf) -> PathBuf {
    std::env::var_os(name).map(PathBuf::from).unwrap_or(default)
}

fn millis_var(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .filter(|&ms| ms > 0)
        .map(Duration::from_millis)
        .unwrap_or(default)
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            metrics_file: path_var("METRICS_FILE", defaults.metrics_file),
            sample_interval: millis_var("SAMPLE_INTERVAL_MS", defaults.sample_interval),
            write_interval: millis_var("WRITE_INTERVAL_MS", defaults.write_interval),
            proc_stat_path: path_var("PROC_STAT_PATH", defaults.proc_stat_path),
            proc_meminfo_path: path_var("PROC_MEMINFO_PATH", defaults.proc_meminfo_path),
            power_now_path: path_var("POWER_NOW_PATH", defaults.power_now_path),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            json_logs: std::env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_logs),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            metrics_file: PathBuf::from(DEFAULT_METRICS_PATH),
            sample_interval: Duration::from_secs(1),
            write_interval: Duration::from_secs(2),
            proc_stat_path: PathBuf::from("/proc/stat"),
            proc_meminfo_path: PathBuf::from("/proc/meminfo"),
            power_now_path: PathBuf::from("/sys/class/power_supply/BAT0/power_now"),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}
