//! Configuration module for uptime-grid.
//!
//! Loads configuration from environment variables with sensible defaults.

use std::env;
use std::time::Duration;

use chrono_tz::Tz;

use crate::grid::{ReferenceZone, DEFAULT_TIMEZONE};

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP port for the web server (default: 8080)
    pub http_port: u16,
    /// Base URL of the monitoring backend (default: "http://127.0.0.1:25990")
    pub backend_url: String,
    /// Reference timezone for all grid arithmetic (default: Europe/Moscow)
    pub timezone: Tz,
    /// Seconds between cache refreshes (default: 60)
    pub refresh_interval_secs: u64,
    /// Backend request timeout in seconds (default: 5)
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: 8080,
            backend_url: "http://127.0.0.1:25990".to_string(),
            timezone: DEFAULT_TIMEZONE,
            refresh_interval_secs: 60,
            request_timeout_secs: 5,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `UPTIME_GRID_HTTP_PORT`: HTTP port (default: 8080)
    /// - `UPTIME_GRID_BACKEND_URL`: backend base URL
    /// - `UPTIME_GRID_TIMEZONE`: IANA zone name (default: "Europe/Moscow")
    /// - `UPTIME_GRID_REFRESH_SECS`: refresh interval (default: 60)
    /// - `UPTIME_GRID_REQUEST_TIMEOUT_SECS`: backend timeout (default: 5)
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(port) = lookup("UPTIME_GRID_HTTP_PORT").and_then(|s| s.parse().ok()) {
            cfg.http_port = port;
        }

        if let Some(url) = lookup("UPTIME_GRID_BACKEND_URL") {
            cfg.backend_url = url;
        }

        if let Some(name) = lookup("UPTIME_GRID_TIMEZONE") {
            match name.parse::<Tz>() {
                Ok(tz) => cfg.timezone = tz,
                Err(e) => tracing::warn!(
                    "Unknown timezone {:?} ({}), using {}",
                    name,
                    e,
                    cfg.timezone.name()
                ),
            }
        }

        if let Some(secs) = lookup("UPTIME_GRID_REFRESH_SECS").and_then(|s| s.parse().ok()) {
            cfg.refresh_interval_secs = secs;
        }

        if let Some(secs) = lookup("UPTIME_GRID_REQUEST_TIMEOUT_SECS").and_then(|s| s.parse().ok()) {
            cfg.request_timeout_secs = secs;
        }

        cfg
    }

    pub fn zone(&self) -> ReferenceZone {
        ReferenceZone::new(self.timezone)
    }

    /// Refresh interval, never shorter than one second.
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}
