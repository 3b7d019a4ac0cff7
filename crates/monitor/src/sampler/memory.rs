//! Memory usage from `/proc/meminfo`.

use std::path::PathBuf;

use async_trait::async_trait;

use super::Sampler;
use crate::error::{MonitorError, Result};
use crate::state::Resource;

/// The two `/proc/meminfo` fields the usage figure needs, in kB.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemInfo {
    pub total_kb: u64,
    pub available_kb: u64,
}

impl MemInfo {
    /// Percentage of memory not available for new allocations.
    pub fn usage(&self) -> f64 {
        if self.total_kb == 0 {
            return 0.0;
        }
        let used = self.total_kb.saturating_sub(self.available_kb);
        100.0 * used as f64 / self.total_kb as f64
    }
}

/// Extracts `MemTotal` and `MemAvailable` from `/proc/meminfo` contents.
pub fn parse_meminfo(contents: &str) -> std::result::Result<MemInfo, String> {
    let mut total = None;
    let mut available = None;

    for line in contents.lines() {
        let mut fields = line.split_whitespace();
        let slot = match fields.next() {
            Some("MemTotal:") => &mut total,
            Some("MemAvailable:") => &mut available,
            _ => continue,
        };
        let value = fields.next().ok_or_else(|| format!("missing value in {line:?}"))?;
        *slot = Some(
            value
                .parse::<u64>()
                .map_err(|e| format!("invalid value in {line:?}: {e}"))?,
        );
        if total.is_some() && available.is_some() {
            break;
        }
    }

    Ok(MemInfo {
        total_kb: total.ok_or("MemTotal not present")?,
        available_kb: available.ok_or("MemAvailable not present")?,
    })
}

/// Samples memory usage on every tick.
pub struct MemorySampler {
    path: PathBuf,
}

impl MemorySampler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Sampler for MemorySampler {
    fn resource(&self) -> Resource {
        Resource::Memory
    }

    async fn sample(&mut self) -> Result<Option<f64>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(MonitorError::io(&self.path))?;
        let info = parse_meminfo(&contents).map_err(|reason| MonitorError::parse(&self.path, reason))?;
        Ok(Some(info.usage()))
    }
}
