//! Data module - table loading and the turbine dataset facade

mod loader;
mod timestamp;
mod turbine;

pub use loader::{
    read_measurement_table, read_power_curve_table, read_table, TableError, DEFAULT_DELIMITER,
    POWER_COLUMN, TIMESTAMP_COLUMN, WIND_SPEED_COLUMN,
};
pub use timestamp::{convert_unix_to_datetime, LOCAL_TIMEZONE};
pub use turbine::TurbineData;
