//! CSV Table Loader Module
//! Reads delimited turbine data files into Polars DataFrames.

use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use super::timestamp::convert_unix_to_datetime;

/// Default field delimiter for turbine data files.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Timestamp column name in the measurement files (unix seconds).
pub const TIMESTAMP_COLUMN: &str = "tstamp";
/// Wind-speed column name (m/s).
pub const WIND_SPEED_COLUMN: &str = "wsp";
/// Power column name (kW).
pub const POWER_COLUMN: &str = "pwr";

#[derive(Error, Debug)]
pub enum TableError {
    #[error("Failed to access {path}: {source}")]
    DataAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed table data in {path}: {msg}")]
    Parse { path: PathBuf, msg: String },
    #[error("Timestamp conversion failed for column '{column}': {msg}")]
    TimeConversion { column: String, msg: String },
}

/// Parse a delimited text file whose first line names the columns.
pub fn read_table(path: &Path, delimiter: u8) -> Result<DataFrame, TableError> {
    // Surface missing/unreadable files as DataAccess before Polars gets involved.
    std::fs::metadata(path).map_err(|source| TableError::DataAccess {
        path: path.to_path_buf(),
        source,
    })?;

    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_separator(delimiter)
        .with_infer_schema_length(Some(10000))
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|e| table_error(path, e))?;

    debug!(rows = df.height(), path = %path.display(), "loaded table");
    Ok(df)
}

/// Read a measurement table (average or deviation data).
///
/// Unless `unix` is set, the `tstamp` column is converted from unix seconds to
/// a calendar timestamp, localized to Europe/Berlin when `localtime` is set and
/// kept in UTC otherwise.
pub fn read_measurement_table(
    path: &Path,
    unix: bool,
    localtime: bool,
) -> Result<DataFrame, TableError> {
    let df = read_table(path, DEFAULT_DELIMITER)?;
    require_numeric(
        &df,
        path,
        &[TIMESTAMP_COLUMN, WIND_SPEED_COLUMN, POWER_COLUMN],
    )?;
    if unix {
        return Ok(df);
    }
    convert_unix_to_datetime(&df, TIMESTAMP_COLUMN, localtime)
}

/// Read the theoretical power-curve table. No time column, no conversion.
pub fn read_power_curve_table(path: &Path) -> Result<DataFrame, TableError> {
    let df = read_table(path, DEFAULT_DELIMITER)?;
    require_numeric(&df, path, &[WIND_SPEED_COLUMN, POWER_COLUMN])?;
    Ok(df)
}

/// Check that the required columns exist and carry a numeric dtype.
///
/// A `tstamp` column that is absent or was inferred as text (unparsable
/// entries) is rejected here rather than guessed at downstream.
fn require_numeric(df: &DataFrame, path: &Path, columns: &[&str]) -> Result<(), TableError> {
    for name in columns {
        let column = df.column(name).map_err(|_| TableError::Parse {
            path: path.to_path_buf(),
            msg: format!("missing required column '{name}'"),
        })?;
        if !is_numeric(column.dtype()) {
            return Err(TableError::Parse {
                path: path.to_path_buf(),
                msg: format!(
                    "column '{name}' must be numeric, found {}",
                    column.dtype()
                ),
            });
        }
    }
    Ok(())
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

fn table_error(path: &Path, err: PolarsError) -> TableError {
    match err {
        PolarsError::IO { error, .. } => TableError::DataAccess {
            path: path.to_path_buf(),
            source: std::io::Error::new(error.kind(), error.to_string()),
        },
        other => TableError::Parse {
            path: path.to_path_buf(),
            msg: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    const MEASUREMENTS: &str = "tstamp,wsp,pwr\n1622520000,5.0,120.0\n1622523600,6.0,150.0\n";

    #[test]
    fn reads_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "avg.csv", MEASUREMENTS);

        let df = read_table(&path, DEFAULT_DELIMITER).unwrap();
        assert_eq!(df.height(), 2);
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, vec!["tstamp", "wsp", "pwr"]);
    }

    #[test]
    fn supports_alternate_delimiters() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "avg.tsv", "tstamp;wsp;pwr\n1622520000;5.0;120.0\n");

        let df = read_table(&path, b';').unwrap();
        assert_eq!(df.height(), 1);
        assert_eq!(df.column("wsp").unwrap().f64().unwrap().get(0), Some(5.0));
    }

    #[test]
    fn round_trips_through_serialization() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "avg.csv", MEASUREMENTS);
        let mut df = read_table(&path, DEFAULT_DELIMITER).unwrap();

        let copy_path = dir.path().join("copy.csv");
        let mut file = fs::File::create(&copy_path).unwrap();
        CsvWriter::new(&mut file)
            .include_header(true)
            .with_separator(DEFAULT_DELIMITER)
            .finish(&mut df)
            .unwrap();

        let reread = read_table(&copy_path, DEFAULT_DELIMITER).unwrap();
        assert!(df.equals(&reread));
    }

    #[test]
    fn missing_file_is_a_data_access_error() {
        let err = read_table(Path::new("/nonexistent/avg.csv"), DEFAULT_DELIMITER).unwrap_err();
        assert!(matches!(err, TableError::DataAccess { .. }));
    }

    #[test]
    fn ragged_rows_are_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(
            &dir,
            "ragged.csv",
            "tstamp,wsp,pwr\n1622520000,5.0,120.0,extra\n",
        );

        let err = read_table(&path, DEFAULT_DELIMITER).unwrap_err();
        assert!(matches!(err, TableError::Parse { .. }));
    }

    #[test]
    fn measurement_table_without_tstamp_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "avg.csv", "time,wsp,pwr\n1622520000,5.0,120.0\n");

        let err = read_measurement_table(&path, false, true).unwrap_err();
        assert!(matches!(err, TableError::Parse { .. }));
    }

    #[test]
    fn non_numeric_tstamp_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "avg.csv", "tstamp,wsp,pwr\nyesterday,5.0,120.0\n");

        let err = read_measurement_table(&path, false, true).unwrap_err();
        assert!(matches!(err, TableError::Parse { .. }));
    }

    #[test]
    fn measurement_table_converts_tstamp_by_default() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "avg.csv", MEASUREMENTS);

        let df = read_measurement_table(&path, false, true).unwrap();
        assert!(matches!(
            df.column(TIMESTAMP_COLUMN).unwrap().dtype(),
            DataType::Datetime(TimeUnit::Milliseconds, Some(_))
        ));
    }

    #[test]
    fn measurement_table_keeps_unix_seconds_when_asked() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "avg.csv", MEASUREMENTS);

        let df = read_measurement_table(&path, true, true).unwrap();
        assert_eq!(
            df.column(TIMESTAMP_COLUMN).unwrap().i64().unwrap().get(0),
            Some(1622520000)
        );
    }

    #[test]
    fn power_curve_requires_numeric_columns() {
        let dir = TempDir::new().unwrap();
        let good = write_file(&dir, "curve.csv", "wsp,pwr\n5.0,118.0\n6.0,148.0\n");
        let bad = write_file(&dir, "bad.csv", "wsp,pwr\nslow,118.0\n");

        let df = read_power_curve_table(&good).unwrap();
        assert_eq!(df.height(), 2);

        let err = read_power_curve_table(&bad).unwrap_err();
        assert!(matches!(err, TableError::Parse { .. }));
    }
}
