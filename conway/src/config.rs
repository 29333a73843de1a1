// config.rs - Grid size and tick intervals, optionally read from TOML

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::board::GRID_SIZE;

pub const DEFAULT_SIM_INTERVAL_MS: u64 = 600;
pub const DEFAULT_RENDER_INTERVAL_MS: u64 = 16;

/// File name looked up in the working directory by the app.
pub const CONFIG_FILE: &str = "conway.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LifeConfig {
    /// Side length of the square board.
    pub grid_size: usize,
    /// Milliseconds between generation steps.
    pub sim_interval_ms: u64,
    /// Milliseconds between redraws.
    pub render_interval_ms: u64,
    /// Pause when the board repeats a recent generation.
    pub stop_on_cycle: bool,
}

impl Default for LifeConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            sim_interval_ms: DEFAULT_SIM_INTERVAL_MS,
            render_interval_ms: DEFAULT_RENDER_INTERVAL_MS,
            stop_on_cycle: false,
        }
    }
}

impl LifeConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: LifeConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` if it exists. A missing file means defaults; a broken one
    /// is logged and also falls back to defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("{err}; using defaults");
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size == 0 {
            return Err(ConfigError::Invalid("grid_size must be at least 1".into()));
        }
        if self.sim_interval_ms == 0 || self.render_interval_ms == 0 {
            return Err(ConfigError::Invalid("intervals must be at least 1 ms".into()));
        }
        Ok(())
    }

    pub fn sim_interval(&self) -> Duration {
        Duration::from_millis(self.sim_interval_ms)
    }

    pub fn render_interval(&self) -> Duration {
        Duration::from_millis(self.render_interval_ms)
    }
}
