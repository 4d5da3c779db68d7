//! Windcurve - Wind-turbine power-curve analysis CLI.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use windcurve::charts::plot_power;
use windcurve::config::Config;
use windcurve::data::TurbineData;

#[derive(Parser, Debug)]
#[command(name = "windcurve")]
#[command(about = "Wind-turbine power-curve analysis", long_about = None)]
struct Args {
    /// Path to a JSON config file naming the dataset locations
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a turbine data table to stdout
    Show {
        /// Which dataset to print
        #[arg(long, value_enum, default_value_t = Dataset::Avg)]
        dataset: Dataset,

        /// Keep the tstamp column as raw unix seconds
        #[arg(long)]
        unix: bool,

        /// Report calendar timestamps in UTC instead of Europe/Berlin
        #[arg(long)]
        utc: bool,
    },
    /// Render the measured-vs-theoretical power chart
    Plot {
        /// Output PNG path
        #[arg(long, default_value = "power_curve.png")]
        out: PathBuf,

        /// Skip opening the rendered chart in the system viewer
        #[arg(long)]
        no_open: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Dataset {
    /// Average measurements
    Avg,
    /// Deviation measurements
    Dev,
    /// Theoretical power curve
    Curve,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::resolve(args.config.as_deref())?;
    let turbine = TurbineData::new(&config);

    match args.command {
        Command::Show { dataset, unix, utc } => {
            let df = match dataset {
                Dataset::Avg => turbine.avg_data(unix, !utc)?,
                Dataset::Dev => turbine.dev_data(unix, !utc)?,
                Dataset::Curve => turbine.pwr_curve()?,
            };
            println!("{df}");
        }
        Command::Plot { out, no_open } => {
            plot_power(&turbine, &out)?;
            println!("Chart written to {}", out.display());
            if !no_open {
                open::that(&out)
                    .with_context(|| format!("Failed to open {}", out.display()))?;
            }
        }
    }

    Ok(())
}
