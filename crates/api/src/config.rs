//! Application configuration loaded from environment variables.

use std::path::PathBuf;

use common::DEFAULT_METRICS_PATH;

const DEFAULT_PORT: u16 = 5000;

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `5000`)
/// - `METRICS_FILE` — JSON document served on `/metrics` (default: `/tmp/metrics.json`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT` — `json` for JSON log lines, anything else for plain text
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub metrics_file: PathBuf,
    pub log_level: String,
    pub json_logs: bool,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: std::env::var("HOST").unwrap_or(defaults.host),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            metrics_file: std::env::var_os("METRICS_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.metrics_file),
            log_level: std::env::var("RUST_LOG").unwrap_or(defaults.log_level),
            json_logs: std::env::var("LOG_FORMAT")
                .map(|f| f.eq_ignore_ascii_case("json"))
                .unwrap_or(defaults.json_logs),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            metrics_file: PathBuf::from(DEFAULT_METRICS_PATH),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 5] = ["HOST", "PORT", "METRICS_FILE", "RUST_LOG", "LOG_FORMAT"];

    fn clear_env() {
        for var in VARS {
            // SAFETY: env-mutating tests are serialized with #[serial].
            unsafe { std::env::remove_var(var) };
        }
    }

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 5000);
        assert_eq!(config.metrics_file, PathBuf::from("/tmp/metrics.json"));
        assert_eq!(config.log_level, "info");
        assert!(!config.json_logs);
    }

    #[test]
    fn test_addr_formatting() {
        let config = Config {
            host: "127.0.0.1".to_string(),
            port: 8080,
            ..Config::default()
        };
        assert_eq!(config.addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_addr_default() {
        let config = Config::default();
        assert_eq!(config.addr(), "0.0.0.0:5000");
    }

    #[test]
    #[serial]
    fn test_from_env_without_variables_uses_defaults() {
        clear_env();
        let config = Config::from_env();
        assert_eq!(config.addr(), "0.0.0.0:5000");
        assert_eq!(config.metrics_file, PathBuf::from(DEFAULT_METRICS_PATH));
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        // SAFETY: env-mutating tests are serialized with #[serial].
        unsafe {
            std::env::set_var("HOST", "127.0.0.1");
            std::env::set_var("PORT", "9090");
            std::env::set_var("METRICS_FILE", "/var/run/host-metrics.json");
            std::env::set_var("LOG_FORMAT", "JSON");
        }

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.addr(), "127.0.0.1:9090");
        assert_eq!(
            config.metrics_file,
            PathBuf::from("/var/run/host-metrics.json")
        );
        assert!(config.json_logs);
    }

    #[test]
    #[serial]
    fn test_from_env_ignores_unparsable_port() {
        clear_env();
        // SAFETY: env-mutating tests are serialized with #[serial].
        unsafe { std::env::set_var("PORT", "not-a-port") };

        let config = Config::from_env();
        clear_env();

        assert_eq!(config.port, 5000);
    }
}
