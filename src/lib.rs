//! Windcurve - Wind-turbine power-curve analysis.
//!
//! Loads turbine sensor measurements and a manufacturer power-curve reference
//! from CSV files, normalizes unix timestamps to calendar time, and renders a
//! measured-vs-theoretical power chart.

pub mod charts;
pub mod config;
pub mod data;
