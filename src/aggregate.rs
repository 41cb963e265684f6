use std::{collections::BTreeMap, ops::Range};

use serde::Deserialize;
use time::Date;
use tracing::{debug, warn};

use crate::record::TemperatureRecord;

/// Depth range treated as representative of near-surface conditions.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurfaceBand {
    pub min_depth: f64,
    pub max_depth: f64,
}

impl Default for SurfaceBand {
    fn default() -> Self {
        Self {
            min_depth: 1.0,
            max_depth: 5.0,
        }
    }
}

impl SurfaceBand {
    pub fn contains(&self, depth: f64) -> bool {
        (self.min_depth..=self.max_depth).contains(&depth)
    }

    /// Records outside the band or with a non positive temperature are
    /// dropped. A missing temperature is kept so the date is still reported.
    pub fn admits(&self, record: &TemperatureRecord) -> bool {
        self.contains(record.depth) && record.temperature.map_or(true, |t| t > 0.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyAggregate {
    pub date: Date,
    pub day_of_year: u16,
    /// `None` when every record of the day was missing its temperature.
    pub mean_temperature: Option<f64>,
}

impl DailyAggregate {
    /// `(day of year, mean)` pairs, skipping undefined means.
    pub fn points(aggregates: &[Self]) -> Vec<(f64, f64)> {
        aggregates
            .iter()
            .filter_map(|day| Some((f64::from(day.day_of_year), day.mean_temperature?)))
            .collect()
    }
}

#[derive(Debug)]
struct Accumulator {
    day_of_year: u16,
    sum: f64,
    count: usize,
}

/// Mean temperature of every date that has at least one record in `band`.
/// The result is sorted by date.
pub fn daily_means<'a>(
    records: impl IntoIterator<Item = &'a TemperatureRecord>,
    band: &SurfaceBand,
) -> Vec<DailyAggregate> {
    let mut days: BTreeMap<Date, Accumulator> = BTreeMap::new();
    let mut kept = 0;

    for record in records.into_iter().filter(|record| band.admits(record)) {
        kept += 1;
        // the first record of a date decides its day of year
        let day = days.entry(record.date).or_insert(Accumulator {
            day_of_year: record.day_of_year,
            sum: 0.0,
            count: 0,
        });
        if let Some(temperature) = record.temperature {
            day.sum += temperature;
            day.count += 1;
        }
    }
    debug!(kept, dates = days.len(), "records filtered to the surface band");

    days.into_iter()
        .map(|(date, day)| {
            let mean_temperature = (day.count > 0).then(|| day.sum / day.count as f64);
            if mean_temperature.is_none() {
                warn!(%date, "no temperature recorded, daily mean left undefined");
            }
            DailyAggregate {
                date,
                day_of_year: day.day_of_year,
                mean_temperature,
            }
        })
        .collect()
}

/// Lowest to highest defined mean, `None` if there is none.
pub fn temperature_range(aggregates: &[DailyAggregate]) -> Option<Range<f64>> {
    let mut means = aggregates.iter().filter_map(|day| day.mean_temperature);
    let first = means.next()?;
    Some(means.fold(first..first, |range, mean| {
        range.start.min(mean)..range.end.max(mean)
    }))
}
