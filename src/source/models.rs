//! Payload types returned by the monitoring backend.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::grid::Sample;

/// History of one server for the requested period.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServerSeries {
    /// Overall uptime in percent (0..=100), computed upstream.
    pub uptime_percent: Option<f64>,
    pub series: Vec<Sample>,
}

/// Server name to series, in the order the backend listed them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UptimePayload {
    pub servers: Vec<(String, ServerSeries)>,
}

impl UptimePayload {
    /// Decode a payload object, degrading per server instead of failing.
    ///
    /// Returns `None` only when the top level is not an object.
    pub fn from_value(value: &Value) -> Option<Self> {
        let object = value.as_object()?;
        let servers = object
            .iter()
            .map(|(name, entry)| (name.clone(), ServerSeries::from_value(entry)))
            .collect();
        Some(Self { servers })
    }

    pub fn get(&self, server: &str) -> Option<&ServerSeries> {
        self.servers
            .iter()
            .find(|(name, _)| name == server)
            .map(|(_, series)| series)
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

impl ServerSeries {
    /// Anything that is not the expected shape becomes an empty series.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        Self {
            uptime_percent: object.get("uptime_percent").and_then(Value::as_f64),
            series: object
                .get("series")
                .and_then(Value::as_array)
                .map(|items| items.iter().filter_map(sample_from_value).collect())
                .unwrap_or_default(),
        }
    }
}

/// Samples without an integer `hour` are dropped; a non-numeric ratio is no data.
fn sample_from_value(value: &Value) -> Option<Sample> {
    let object: &Map<String, Value> = value.as_object()?;
    let hour = object.get("hour").and_then(Value::as_i64)?;
    let ok_ratio = object.get("ok_ratio").and_then(Value::as_f64);
    Some(Sample::new(hour, ok_ratio))
}
