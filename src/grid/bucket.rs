//! Bucketing of hourly samples into grid cells.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::clock::ReferenceZone;
use super::severity::{classify, Severity};
use super::Sample;

/// Hours a day-mode sample is rotated to the right on the grid.
pub const GRID_SHIFT_HOURS: u32 = 4;

/// Number of columns in day mode.
pub const DAY_SLOTS: usize = 24;

/// Display period selected by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("invalid period: {0}")]
pub struct PeriodParseError(pub String);

impl Period {
    pub const ALL: [Period; 3] = [Period::Day, Period::Week, Period::Month];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
        }
    }

    /// Days of history the backend returns for this period.
    pub fn days(&self) -> u32 {
        match self {
            Period::Day => 1,
            Period::Week => 7,
            Period::Month => 30,
        }
    }

    /// Number of hourly samples the backend returns for this period.
    pub fn expected_samples(&self) -> usize {
        self.days() as usize * 24
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "day" => Ok(Period::Day),
            "week" => Ok(Period::Week),
            "month" => Ok(Period::Month),
            other => Err(PeriodParseError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellKind {
    Hour,
    Day,
}

/// One grid cell. Built fresh on every pass and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cell {
    pub kind: CellKind,
    /// Bucket start as a unix timestamp; 0 for empty day-mode slots.
    pub bucket: i64,
    pub ratio: Option<f64>,
    pub severity: Severity,
}

impl Cell {
    /// Placeholder for a day-mode slot nothing landed in.
    pub fn empty_hour() -> Self {
        Self {
            kind: CellKind::Hour,
            bucket: 0,
            ratio: None,
            severity: Severity::None,
        }
    }

    fn from_ratio(kind: CellKind, bucket: i64, ratio: Option<f64>) -> Self {
        Self {
            kind,
            bucket,
            ratio,
            severity: classify(ratio),
        }
    }
}

/// Grid column for a sample observed at reference-zone hour `hour`.
pub fn grid_index(hour: u32) -> usize {
    ((hour + GRID_SHIFT_HOURS) % DAY_SLOTS as u32) as usize
}

/// Convert a series into the cells for `period`.
pub fn bucketize(series: &[Sample], period: Period, zone: &ReferenceZone) -> Vec<Cell> {
    match period {
        Period::Day => hourly_cells(series, zone),
        Period::Week | Period::Month => daily_cells(series, zone),
    }
}

/// Slice of the series that backs the displayed window.
pub fn window(series: &[Sample], period: Period) -> &[Sample] {
    match period {
        Period::Day => &series[..series.len().min(DAY_SLOTS)],
        Period::Week | Period::Month => series,
    }
}

/// First and last samples of the unshifted input window.
pub fn data_window(series: &[Sample], period: Period) -> Option<(&Sample, &Sample)> {
    let window = window(series, period);
    Some((window.first()?, window.last()?))
}

/// Day mode: always 24 cells, rotated by the grid shift.
///
/// When two samples share a reference hour the later one wins.
fn hourly_cells(series: &[Sample], zone: &ReferenceZone) -> Vec<Cell> {
    let mut cells = vec![Cell::empty_hour(); DAY_SLOTS];

    for sample in window(series, Period::Day) {
        let hour = zone.calendar_fields(sample.hour).hour;
        cells[grid_index(hour)] = Cell::from_ratio(CellKind::Hour, sample.hour, sample.ok_ratio);
    }

    cells
}

#[derive(Default)]
struct DayAccumulator {
    first_ts: Option<i64>,
    sum: f64,
    count: u32,
}

/// Week/month mode: one cell per distinct reference-zone date.
fn daily_cells(series: &[Sample], zone: &ReferenceZone) -> Vec<Cell> {
    // `YYYY-MM-DD` keys order chronologically.
    let mut days: BTreeMap<String, DayAccumulator> = BTreeMap::new();

    for sample in series {
        let acc = days.entry(zone.calendar_fields(sample.hour).date_key).or_default();
        acc.first_ts = Some(acc.first_ts.map_or(sample.hour, |ts| ts.min(sample.hour)));
        if let Some(ratio) = sample.ok_ratio {
            acc.sum += ratio;
            acc.count += 1;
        }
    }

    days.into_values()
        .map(|acc| {
            let ratio = if acc.count > 0 {
                Some(acc.sum / acc.count as f64)
            } else {
                None
            };
            Cell::from_ratio(CellKind::Day, acc.first_ts.unwrap_or_default(), ratio)
        })
        .collect()
}
