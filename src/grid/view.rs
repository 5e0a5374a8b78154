//! Per-server view model consumed by the renderer.

use serde::Serialize;

use crate::source::{ServerSeries, UptimePayload};

use super::bucket::{bucketize, data_window, Cell, CellKind, Period};
use super::clock::ReferenceZone;
use super::range::{
    day_label, day_range, hour_end_label, hour_range_shifted, hour_start_label, NO_DATA_LABEL,
};
use super::severity::{classify, Severity};

/// Tooltip of a day-mode slot no sample landed in.
pub const NO_DATA_TOOLTIP: &str = "no data";

/// A cell with its hover text already formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellView {
    pub kind: CellKind,
    pub bucket: i64,
    pub ratio: Option<f64>,
    pub severity: Severity,
    pub tooltip: String,
}

/// The pill shown next to a server name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub percent: Option<f64>,
    pub label: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridRow {
    pub server: String,
    pub period: Period,
    pub cells: Vec<CellView>,
    pub summary: Summary,
    pub start_label: String,
    pub end_label: String,
}

/// Build the rows for every server, keeping the backend's order.
pub fn build_grid(payload: &UptimePayload, period: Period, zone: &ReferenceZone) -> Vec<GridRow> {
    payload
        .servers
        .iter()
        .map(|(server, data)| build_row(server, data, period, zone))
        .collect()
}

pub fn build_row(
    server: &str,
    data: &ServerSeries,
    period: Period,
    zone: &ReferenceZone,
) -> GridRow {
    let cells = bucketize(&data.series, period, zone);

    let (start_label, end_label) = match period {
        // Day labels describe the data window, not the rotated grid
        Period::Day => match data_window(&data.series, period) {
            Some((first, last)) => (
                hour_start_label(zone, first.hour),
                hour_end_label(zone, last.hour),
            ),
            None => no_data_labels(),
        },
        Period::Week | Period::Month => match (cells.first(), cells.last()) {
            (Some(first), Some(last)) => (
                day_label(zone, first.bucket),
                day_label(zone, last.bucket),
            ),
            _ => no_data_labels(),
        },
    };

    GridRow {
        server: server.to_string(),
        period,
        cells: cells.iter().map(|cell| cell_view(cell, zone)).collect(),
        summary: summarize(data.uptime_percent),
        start_label,
        end_label,
    }
}

/// Summary as supplied by the backend; it is not recomputed from cells.
pub fn summarize(percent: Option<f64>) -> Summary {
    Summary {
        percent,
        label: percent.map_or_else(|| NO_DATA_LABEL.to_string(), |p| format!("{:.2}%", p)),
        severity: classify(percent.map(|p| p / 100.0)),
    }
}

fn cell_view(cell: &Cell, zone: &ReferenceZone) -> CellView {
    let tooltip = match cell.kind {
        CellKind::Hour if cell.ratio.is_none() && cell.bucket == 0 => NO_DATA_TOOLTIP.to_string(),
        CellKind::Hour => hour_range_shifted(zone, cell.bucket),
        CellKind::Day => day_range(zone, cell.bucket),
    };

    CellView {
        kind: cell.kind,
        bucket: cell.bucket,
        ratio: cell.ratio,
        severity: cell.severity,
        tooltip,
    }
}

fn no_data_labels() -> (String, String) {
    (NO_DATA_LABEL.to_string(), NO_DATA_LABEL.to_string())
}
