//! Monitoring backend access.
//!
//! The backend computes hourly ratios; this module only fetches and
//! decodes them.

mod client;
mod models;

pub use client::*;
pub use models::*;

use thiserror::Error;

/// Failures at the backend boundary.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("data unavailable: {0}")]
    Unavailable(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("invalid configuration: {0}")]
    Config(String),
}
