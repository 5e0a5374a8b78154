//! Time-bucketing engine for the uptime grid.
//!
//! Turns per-server hourly samples into classified grid cells and the
//! labels shown around them. Everything here is pure and synchronous.

mod bucket;
mod clock;
mod range;
mod severity;
mod view;

pub use bucket::*;
pub use clock::*;
pub use range::*;
pub use severity::*;
pub use view::*;

use serde::{Deserialize, Serialize};

/// Availability of one hour as reported by the monitoring backend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Hour start, unix seconds.
    pub hour: i64,
    /// Share of successful checks in the hour; `None` when nothing ran.
    pub ok_ratio: Option<f64>,
}

impl Sample {
    pub fn new(hour: i64, ok_ratio: Option<f64>) -> Self {
        Self { hour, ok_ratio }
    }
}
