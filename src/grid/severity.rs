//! Severity tiers for availability ratios.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lower bound (inclusive) for the `good` tier.
pub const GOOD_THRESHOLD: f64 = 0.99;
/// Lower bound (inclusive) for the `ok` tier.
pub const OK_THRESHOLD: f64 = 0.80;
/// Lower bound (inclusive) for the `warn` tier.
pub const WARN_THRESHOLD: f64 = 0.50;

/// Discrete severity of a grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// No data for the bucket.
    None,
    Good,
    Ok,
    Warn,
    Bad,
}

impl Severity {
    /// Lowercase tag used by the renderer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::None => "none",
            Severity::Good => "good",
            Severity::Ok => "ok",
            Severity::Warn => "warn",
            Severity::Bad => "bad",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a nullable success ratio.
///
/// `NaN` fails every comparison and lands in `Bad`.
pub fn classify(ratio: Option<f64>) -> Severity {
    match ratio {
        None => Severity::None,
        Some(r) if r >= GOOD_THRESHOLD => Severity::Good,
        Some(r) if r >= OK_THRESHOLD => Severity::Ok,
        Some(r) if r >= WARN_THRESHOLD => Severity::Warn,
        Some(_) => Severity::Bad,
    }
}
