//! Unix-to-calendar timestamp conversion.
//!
//! Conversion is one-directional: a column of unix seconds becomes a
//! timezone-aware Datetime column. Localization only changes the display zone;
//! the stored instants are identical either way.

use polars::prelude::*;

use super::loader::TableError;

/// Civil timezone used for localized timestamps.
pub const LOCAL_TIMEZONE: &str = "Europe/Berlin";

const UTC_TIMEZONE: &str = "UTC";

/// Convert a column of unix seconds to calendar timestamps, returning a new
/// frame with the column replaced.
///
/// When `localtime` is set the column carries Europe/Berlin civil time
/// (daylight-saving aware); otherwise it carries UTC.
pub fn convert_unix_to_datetime(
    df: &DataFrame,
    column: &str,
    localtime: bool,
) -> Result<DataFrame, TableError> {
    let source = df.column(column).map_err(|_| TableError::TimeConversion {
        column: column.to_string(),
        msg: "column not found".to_string(),
    })?;
    let seconds = source
        .cast(&DataType::Int64)
        .map_err(|e| TableError::TimeConversion {
            column: column.to_string(),
            msg: e.to_string(),
        })?;
    let seconds = seconds.i64().map_err(|e| TableError::TimeConversion {
        column: column.to_string(),
        msg: e.to_string(),
    })?;

    let mut millis: Vec<i64> = Vec::with_capacity(seconds.len());
    for (row, value) in seconds.iter().enumerate() {
        let secs = value.ok_or_else(|| TableError::TimeConversion {
            column: column.to_string(),
            msg: format!("non-numeric or missing value at row {row}"),
        })?;
        let ms = secs.checked_mul(1_000).ok_or_else(|| TableError::TimeConversion {
            column: column.to_string(),
            msg: format!("value {secs} at row {row} is outside the representable range"),
        })?;
        millis.push(ms);
    }

    let zone = if localtime { LOCAL_TIMEZONE } else { UTC_TIMEZONE };
    let converted = Int64Chunked::from_vec(column.into(), millis)
        .into_datetime(TimeUnit::Milliseconds, Some(zone.into()))
        .into_series();

    let mut out = df.clone();
    out.replace(column, converted)
        .map_err(|e| TableError::TimeConversion {
            column: column.to_string(),
            msg: e.to_string(),
        })?;
    Ok(out)
}
