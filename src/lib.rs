use std::{
    fs, io,
    path::{Path, PathBuf},
};

use miette::Diagnostic;
use thiserror::Error;
use tracing::{debug, info, warn};

pub mod aggregate;
pub mod calendar;
pub mod config;
pub mod record;
pub mod render;
pub mod smooth;

pub use aggregate::{daily_means, DailyAggregate, SurfaceBand};
pub use calendar::{AxisTick, MonthAxis, MONTH_LENGTHS};
pub use config::{ConfigError, PlotConfig, Theme};
pub use record::{load_records, read_records, LoadError, TemperatureRecord};
pub use render::{RenderError, XAxis};
pub use smooth::SmoothError;

pub const DAY_OF_YEAR_FILE: &str = "temperature_day_of_year.png";
pub const MONTH_AXIS_FILE: &str = "temperature_month_axis.png";

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(
        code(surface_temp::input),
        help("the input must be a CSV file with day, month, year, depth and temperature columns")
    )]
    Load(#[from] LoadError),
    #[error(transparent)]
    #[diagnostic(code(surface_temp::config))]
    Config(#[from] ConfigError),
    #[error(transparent)]
    #[diagnostic(code(surface_temp::render))]
    Render(#[from] RenderError),
    #[error("Cannot create output directory {}: {source}", .path.display())]
    #[diagnostic(code(surface_temp::output))]
    OutputDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Paths of the two charts written by [`run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outputs {
    pub day_of_year: PathBuf,
    pub month_axis: PathBuf,
}

/// Daily means of the surface records, plus the trend drawn over them.
pub fn prepare(
    records: &[TemperatureRecord],
    config: &PlotConfig,
) -> (Vec<DailyAggregate>, Vec<(f64, f64)>) {
    if records
        .iter()
        .any(|record| time::util::is_leap_year(record.date.year()))
    {
        warn!("leap year in the data, month labels still assume a 365 day year");
    }

    let days = daily_means(records, &config.surface);
    let trend = match smooth::lowess_trend(&DailyAggregate::points(&days), config.smoothing_span)
    {
        Ok(trend) => trend,
        Err(e) => {
            warn!(error = %e, "no trend line drawn");
            Vec::new()
        }
    };
    debug!(days = days.len(), trend = trend.len(), "data prepared");
    (days, trend)
}

/// Load `input`, aggregate it and write both charts to the output directory.
pub fn run(input: &Path, config: &PlotConfig) -> Result<Outputs, Error> {
    info!(input = %input.display(), "loading records");
    let records = load_records(input)?;
    let (days, trend) = prepare(&records, config);
    info!(
        records = records.len(),
        days = days.len(),
        "daily means computed"
    );

    fs::create_dir_all(&config.output_dir).map_err(|source| Error::OutputDir {
        path: config.output_dir.clone(),
        source,
    })?;
    let outputs = Outputs {
        day_of_year: config.output_dir.join(DAY_OF_YEAR_FILE),
        month_axis: config.output_dir.join(MONTH_AXIS_FILE),
    };

    render::render_png(&outputs.day_of_year, &days, &trend, XAxis::DayOfYear, config)?;
    info!(path = %outputs.day_of_year.display(), "day of year chart written");

    let months = MonthAxis::new();
    render::render_png(
        &outputs.month_axis,
        &days,
        &trend,
        XAxis::Months(&months),
        config,
    )?;
    info!(path = %outputs.month_axis.display(), "month chart written");

    Ok(outputs)
}
