//! Runtime configuration from `BREW_*` environment variables.

use std::env;
use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Where snapshots are written. `None` keeps them in memory.
    pub data_dir: Option<PathBuf>,
    pub tracking_step: Duration,
    /// Loyalty balance for a fresh order store.
    pub loyalty_points: u32,
    pub pickup_estimate: String,
    pub channel_buffer: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            tracking_step: Duration::from_millis(2000),
            loyalty_points: 150,
            pickup_estimate: "15-20 minutes".to_string(),
            channel_buffer: 32,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `load` uses the environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let data_dir = lookup("BREW_DATA_DIR").filter(|dir| !dir.is_empty()).map(PathBuf::from);
        if data_dir.is_none() {
            info!("BREW_DATA_DIR not set, keeping snapshots in memory");
        }
        let step_ms: u64 = try_load(&lookup, "BREW_TRACKING_STEP_MS", 2000)?;

        let config = Self {
            data_dir,
            tracking_step: Duration::from_millis(step_ms),
            loyalty_points: try_load(&lookup, "BREW_LOYALTY_POINTS", defaults.loyalty_points)?,
            pickup_estimate: try_load(&lookup, "BREW_PICKUP_ESTIMATE", defaults.pickup_estimate)?,
            channel_buffer: try_load(&lookup, "BREW_CHANNEL_BUFFER", defaults.channel_buffer)?,
        };
        if config.channel_buffer == 0 {
            return Err(ConfigError::Invalid {
                key: "BREW_CHANNEL_BUFFER",
                value: "0".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(config)
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError::Invalid {
            key,
            value: raw.clone(),
            reason: e.to_string(),
        }
    })
}
