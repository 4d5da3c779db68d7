//! Configuration for the turbine data paths.
//!
//! The three dataset locations are resolved in order: explicit JSON config
//! file, then environment variables, then the compiled-in defaults pointing at
//! the sample data shipped with the repository.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default location of the average-measurement file.
pub const DEFAULT_AVG_DATA: &str = "data/turbine_avg.csv";
/// Default location of the deviation-measurement file.
pub const DEFAULT_DEV_DATA: &str = "data/turbine_dev.csv";
/// Default location of the theoretical power-curve file.
pub const DEFAULT_POWER_CURVE: &str = "data/power_curve.csv";

/// Environment variables overriding the default paths.
pub const ENV_AVG_DATA: &str = "WINDCURVE_AVG_DATA";
pub const ENV_DEV_DATA: &str = "WINDCURVE_DEV_DATA";
pub const ENV_POWER_CURVE: &str = "WINDCURVE_POWER_CURVE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Locations of the three turbine datasets.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Average-measurement CSV (tstamp, wsp, pwr).
    pub path_avg: PathBuf,
    /// Deviation-measurement CSV (same column shape as the average file).
    pub path_dev: PathBuf,
    /// Theoretical power-curve CSV (wsp, pwr).
    pub path_pwr_curve: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path_avg: PathBuf::from(DEFAULT_AVG_DATA),
            path_dev: PathBuf::from(DEFAULT_DEV_DATA),
            path_pwr_curve: PathBuf::from(DEFAULT_POWER_CURVE),
        }
    }
}

impl Config {
    /// Build a config from the environment, falling back to the defaults for
    /// any variable that is unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var(ENV_AVG_DATA) {
            config.path_avg = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var(ENV_DEV_DATA) {
            config.path_dev = PathBuf::from(path);
        }
        if let Ok(path) = std::env::var(ENV_POWER_CURVE) {
            config.path_pwr_curve = PathBuf::from(path);
        }
        config
    }

    /// Load a config from a JSON file. Missing keys fall back to the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Resolve the effective config: explicit file if given, else environment.
    pub fn resolve(file: Option<&Path>) -> Result<Self, ConfigError> {
        match file {
            Some(path) => Self::from_file(path),
            None => Ok(Self::from_env()),
        }
    }
}
