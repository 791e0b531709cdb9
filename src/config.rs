use crate::notify::DEFAULT_INTERVAL;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_FILE: &str = "progress_data.json";

/// Optional on-disk configuration; CLI flags take precedence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Working document used when no FILE argument is given
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
    #[serde(default = "default_true")]
    pub autosave: bool,
    /// Seconds between deadline scans
    #[serde(default = "default_notify_interval")]
    pub notify_interval_secs: u64,
    #[serde(default = "default_true")]
    pub audible_alerts: bool,
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_true() -> bool {
    true
}

fn default_notify_interval() -> u64 {
    DEFAULT_INTERVAL.as_secs()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            autosave: true,
            notify_interval_secs: default_notify_interval(),
            audible_alerts: true,
        }
    }
}

impl TrackerConfig {
    pub fn config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("progress-mcp")
            .join("config.toml"))
    }

    /// Load from the default location. Returns default config if the file
    /// doesn't exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Self = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }
}
