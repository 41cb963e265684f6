use std::{fs::File, io, path::Path};

use serde::{de, Deserialize, Deserializer};
use thiserror::Error;
use time::{Date, Month};
use tracing::debug;

/// One measurement of the input series.
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureRecord {
    pub date: Date,
    /// 1 to 365, or 366 in a leap year.
    pub day_of_year: u16,
    pub depth: f64,
    pub temperature: Option<f64>,
}

impl TemperatureRecord {
    pub fn new(date: Date, depth: f64, temperature: Option<f64>) -> Self {
        Self {
            date,
            day_of_year: date.ordinal(),
            depth,
            temperature,
        }
    }

    pub fn from_calendar(
        year: i32,
        month: u8,
        day: u8,
        depth: f64,
        temperature: Option<f64>,
    ) -> Result<Self, time::error::ComponentRange> {
        let date = Date::from_calendar_date(year, Month::try_from(month)?, day)?;
        Ok(Self::new(date, depth, temperature))
    }
}

/// Raw CSV row. Columns other than these are ignored.
#[derive(Debug, Deserialize)]
struct Row {
    day: u8,
    month: u8,
    year: i32,
    depth: f64,
    #[serde(alias = "tmp", deserialize_with = "missing_as_none")]
    temperature: Option<f64>,
}

fn missing_as_none<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("na") {
        return Ok(None);
    }
    let value: f64 = raw.parse().map_err(de::Error::custom)?;
    Ok(value.is_finite().then_some(value))
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot open input file: {0}")]
    Open(#[source] io::Error),
    #[error("Malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("Invalid date on line {line}: {source}")]
    InvalidDate {
        line: u64,
        #[source]
        source: time::error::ComponentRange,
    },
}

/// Read every record of the CSV file at `path`.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<TemperatureRecord>, LoadError> {
    let file = File::open(path.as_ref()).map_err(LoadError::Open)?;
    read_records(file)
}

/// Read every record from a CSV stream with a header line.
///
/// The first bad row aborts the whole read; nothing is returned partially.
pub fn read_records(input: impl io::Read) -> Result<Vec<TemperatureRecord>, LoadError> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let headers = reader.headers()?.clone();

    let mut records = Vec::new();
    let mut raw = csv::StringRecord::new();
    while reader.read_record(&mut raw)? {
        let line = raw.position().map_or(0, |position| position.line());
        let row: Row = raw.deserialize(Some(&headers))?;
        let record =
            TemperatureRecord::from_calendar(row.year, row.month, row.day, row.depth, row.temperature)
                .map_err(|source| LoadError::InvalidDate { line, source })?;
        records.push(record);
    }

    debug!(records = records.len(), "input read");
    Ok(records)
}
