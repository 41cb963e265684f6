//! Trend line drawn over the daily means.
//!
//! A LOWESS fit over the day of year. It only has to look reasonable on a
//! chart, no fit statistics are kept.

use lowess::prelude::*;
use thiserror::Error;

/// Below this many points there is nothing worth smoothing.
pub const MIN_POINTS: usize = 3;

#[derive(Debug, Error)]
pub enum SmoothError {
    #[error("Trend fit failed: {0}")]
    Fit(String),
}

/// Fit a local linear regression through `points` using `span` (fraction of
/// the data in each local window) and return the fitted value at every
/// observed day, sorted by day.
///
/// Returns nothing when there are fewer than [`MIN_POINTS`] points.
pub fn lowess_trend(points: &[(f64, f64)], span: f64) -> std::result::Result<Vec<(f64, f64)>, SmoothError> {
    if points.len() < MIN_POINTS {
        return Ok(Vec::new());
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|left, right| left.0.total_cmp(&right.0));
    let (days, temperatures): (Vec<f64>, Vec<f64>) = sorted.into_iter().unzip();

    // no robustness passes, the daily means are already cleaned
    let model = Lowess::new()
        .fraction(span)
        .iterations(0)
        .adapter(Batch)
        .build()
        .map_err(|e| SmoothError::Fit(e.to_string()))?;
    let fit = model
        .fit(&days, &temperatures)
        .map_err(|e| SmoothError::Fit(e.to_string()))?;

    Ok(days.into_iter().zip(fit.y).collect())
}
