//! Power draw from the battery sensor, simulated when no sensor exists.

use std::path::PathBuf;

use async_trait::async_trait;
use rand::Rng;

use super::Sampler;
use crate::error::Result;
use crate::state::Resource;

/// Range of simulated readings in watts, used on hosts without a battery sensor.
pub const SIMULATED_WATTS: std::ops::Range<u32> = 50..70;

/// Converts a `power_now` reading (microwatts) to watts.
pub fn parse_power_now(contents: &str) -> std::result::Result<f64, String> {
    let microwatts: f64 = contents
        .trim()
        .parse()
        .map_err(|e| format!("invalid power_now value {contents:?}: {e}"))?;
    Ok(microwatts / 1_000_000.0)
}

/// Picks a whole number of watts from [`SIMULATED_WATTS`].
pub fn simulated_watts() -> f64 {
    f64::from(rand::rng().random_range(SIMULATED_WATTS))
}

/// Samples power draw. Never fails: an unreadable sensor yields a simulated value.
pub struct PowerSampler {
    path: PathBuf,
}

impl PowerSampler {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_sensor(&self) -> std::result::Result<f64, String> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| e.to_string())?;
        parse_power_now(&contents)
    }
}

#[async_trait]
impl Sampler for PowerSampler {
    fn resource(&self) -> Resource {
        Resource::Power
    }

    async fn sample(&mut self) -> Result<Option<f64>> {
        match self.read_sensor().await {
            Ok(watts) => Ok(Some(watts)),
            Err(reason) => {
                tracing::trace!(path = %self.path.display(), %reason, "no power sensor, simulating");
                Ok(Some(simulated_watts()))
            }
        }
    }
}
