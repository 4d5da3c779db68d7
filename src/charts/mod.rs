//! Charts module - power-curve chart rendering

mod power_curve;

pub use power_curve::{plot_power, ChartError};
