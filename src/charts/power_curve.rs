//! Power-Curve Chart Renderer
//! Draws measured power against the theoretical power curve with Plotters.

use plotters::prelude::*;
use polars::prelude::*;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::data::{TableError, TurbineData, POWER_COLUMN, WIND_SPEED_COLUMN};

/// Output raster size, matching the original 14x8 inch figure.
const FIGURE_SIZE: (u32, u32) = (1400, 800);

// Series colors (tab:blue / tab:orange)
const SCATTER_COLOR: RGBColor = RGBColor(31, 119, 180);
const CURVE_COLOR: RGBColor = RGBColor(255, 127, 14);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("Chart data error: {0}")]
    Data(#[from] PolarsError),
    #[error("No rows to plot")]
    NoData,
    #[error("Failed to render chart: {0}")]
    Render(String),
}

/// Render the power-curve comparison chart to a PNG file.
///
/// Scatter series: measured (wind speed, power) from the average data.
/// Line series: the manufacturer's theoretical curve.
pub fn plot_power(turbine: &TurbineData, output: &Path) -> Result<(), ChartError> {
    let measured = series_points(&turbine.avg_data(false, true)?)?;
    let mut curve = series_points(&turbine.pwr_curve()?)?;
    if measured.is_empty() || curve.is_empty() {
        return Err(ChartError::NoData);
    }
    curve.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));

    let (x_range, y_range) = axis_ranges(&[&measured, &curve]);

    let root = BitMapBackend::new(output, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE).map_err(render_err)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Power Curve", ("sans-serif", 36))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(x_range, y_range)
        .map_err(render_err)?;

    chart
        .configure_mesh()
        .x_desc("Wind speed in m/s")
        .y_desc("Power in kW")
        .label_style(("sans-serif", 18))
        .axis_desc_style(("sans-serif", 22))
        .draw()
        .map_err(render_err)?;

    chart
        .draw_series(
            measured
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 2, SCATTER_COLOR.mix(0.6).filled())),
        )
        .map_err(render_err)?
        .label("Turbine data")
        .legend(|(x, y)| Circle::new((x, y), 4, SCATTER_COLOR.filled()));

    chart
        .draw_series(LineSeries::new(
            curve.iter().copied(),
            CURVE_COLOR.stroke_width(2),
        ))
        .map_err(render_err)?
        .label("Theoretical power curve")
        .legend(|(x, y)| {
            PathElement::new(vec![(x, y), (x + 20, y)], CURVE_COLOR.stroke_width(2))
        });

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .border_style(BLACK)
        .background_style(WHITE.mix(0.8))
        .label_font(("sans-serif", 18))
        .draw()
        .map_err(render_err)?;

    root.present().map_err(render_err)?;
    info!(path = %output.display(), points = measured.len(), "rendered power-curve chart");
    Ok(())
}

fn render_err<E: std::fmt::Display>(e: E) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Extract (wsp, pwr) pairs from a frame, skipping rows with missing values.
fn series_points(df: &DataFrame) -> Result<Vec<(f64, f64)>, ChartError> {
    let xs = df.column(WIND_SPEED_COLUMN)?.cast(&DataType::Float64)?;
    let ys = df.column(POWER_COLUMN)?.cast(&DataType::Float64)?;
    let xs = xs.f64()?;
    let ys = ys.f64()?;
    Ok(xs
        .iter()
        .zip(ys.iter())
        .filter_map(|(x, y)| Some((x?, y?)))
        .collect())
}

/// Padded data ranges for the chart axes.
fn axis_ranges(series: &[&[(f64, f64)]]) -> (Range<f64>, Range<f64>) {
    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for points in series {
        for &(x, y) in *points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
    }
    let x_pad = ((x_max - x_min) * 0.05).max(0.5);
    let y_pad = ((y_max - y_min) * 0.05).max(1.0);
    (x_min - x_pad..x_max + x_pad, y_min - y_pad..y_max + y_pad)
}
