//! Configuration file and dataset location resolution.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::dataset::LoadPolicy;
use crate::lookup::DEFAULT_MAX_DIFF;

/// Environment variable naming the dataset file
pub const DATA_ENV_VAR: &str = "INDIAPINS_DATA";

/// File looked up in the working directory when nothing else is configured
pub const DEFAULT_DATA_FILE: &str = "pins.json.gz";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub dataset: DatasetConfig,
    pub nearby: NearbyConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatasetConfig {
    pub path: Option<PathBuf>,
    pub strict: bool,
    pub spatial_index: bool,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            strict: false,
            spatial_index: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct NearbyConfig {
    pub max_diff: f64,
}

impl Default for NearbyConfig {
    fn default() -> Self {
        Self {
            max_diff: DEFAULT_MAX_DIFF,
        }
    }
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;
        Ok(config)
    }

    pub fn load_policy(&self) -> LoadPolicy {
        if self.dataset.strict {
            LoadPolicy::Strict
        } else {
            LoadPolicy::Tolerant
        }
    }

    /// Dataset location: explicit override, then the config file, then
    /// `INDIAPINS_DATA`, then `pins.json.gz` in the working directory.
    pub fn resolve_data_path(&self, explicit: Option<&Path>) -> PathBuf {
        resolve_data_path(
            explicit,
            self.dataset.path.as_deref(),
            std::env::var_os(DATA_ENV_VAR).map(PathBuf::from),
        )
    }
}

fn resolve_data_path(
    explicit: Option<&Path>,
    configured: Option<&Path>,
    from_env: Option<PathBuf>,
) -> PathBuf {
    explicit
        .or(configured)
        .map(Path::to_path_buf)
        .or(from_env)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE))
}
