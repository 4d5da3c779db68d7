//! Turbine dataset facade.

use polars::prelude::*;
use std::path::PathBuf;

use super::loader::{read_measurement_table, read_power_curve_table, TableError};
use crate::config::Config;

/// Handle to the three turbine data files.
///
/// Holds nothing but the paths: every accessor re-reads the underlying file,
/// so callers always see the current file contents.
#[derive(Debug, Clone)]
pub struct TurbineData {
    path_avg: PathBuf,
    path_dev: PathBuf,
    path_pwr_curve: PathBuf,
}

impl TurbineData {
    /// Build a handle from the resolved configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            path_avg: config.path_avg.clone(),
            path_dev: config.path_dev.clone(),
            path_pwr_curve: config.path_pwr_curve.clone(),
        }
    }

    /// Build a handle from explicit paths.
    pub fn from_paths(
        path_avg: impl Into<PathBuf>,
        path_dev: impl Into<PathBuf>,
        path_pwr_curve: impl Into<PathBuf>,
    ) -> Self {
        Self {
            path_avg: path_avg.into(),
            path_dev: path_dev.into(),
            path_pwr_curve: path_pwr_curve.into(),
        }
    }

    /// Average measurement data.
    ///
    /// With `unix` the `tstamp` column stays in raw epoch seconds; otherwise it
    /// is converted to calendar time, localized to Europe/Berlin when
    /// `localtime` is set.
    pub fn avg_data(&self, unix: bool, localtime: bool) -> Result<DataFrame, TableError> {
        read_measurement_table(&self.path_avg, unix, localtime)
    }

    /// Deviation measurement data. Same column shape as the average data.
    pub fn dev_data(&self, unix: bool, localtime: bool) -> Result<DataFrame, TableError> {
        read_measurement_table(&self.path_dev, unix, localtime)
    }

    /// The manufacturer's theoretical power curve.
    pub fn pwr_curve(&self) -> Result<DataFrame, TableError> {
        read_power_curve_table(&self.path_pwr_curve)
    }
}
