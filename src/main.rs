use std::path::PathBuf;

use clap::Parser;
use miette::IntoDiagnostic;
use surface_temp::{Error, PlotConfig};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Plot daily surface temperature against the day of year, once with
/// numeric labels and once with month initials.
#[derive(Parser)]
#[command(name = "surface-temp", version)]
struct Cli {
    /// CSV file with day, month, year, depth and temperature columns
    input: PathBuf,

    /// Directory receiving the two charts
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// TOML file overriding the default figure size, theme and filters
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .finish();
    tracing::subscriber::set_global_default(subscriber).into_diagnostic()?;

    let mut config = match &cli.config {
        Some(path) => PlotConfig::from_file(path).map_err(Error::from)?,
        None => PlotConfig::default(),
    };
    if let Some(output_dir) = cli.output_dir {
        config.output_dir = output_dir;
    }

    let outputs = surface_temp::run(&cli.input, &config)?;
    info!(
        day_of_year = %outputs.day_of_year.display(),
        month_axis = %outputs.month_axis.display(),
        "done"
    );
    Ok(())
}
