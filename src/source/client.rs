//! HTTP client for the backend's uptime API.

use std::time::Duration;

use serde_json::Value;

use super::{SourceError, UptimePayload};
use crate::grid::Period;

/// Client for `GET /api/uptime` and `POST /api/force-check`.
#[derive(Debug, Clone)]
pub struct UptimeClient {
    base_url: String,
    client: reqwest::Client,
}

impl UptimeClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let base_url = if base_url.starts_with("http://") || base_url.starts_with("https://") {
            base_url.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", base_url.trim_end_matches('/'))
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Config(e.to_string()))?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the hourly series of every server for `period`.
    pub async fn fetch(&self, period: Period) -> Result<UptimePayload, SourceError> {
        let url = format!("{}/api/uptime?period={}", self.base_url, period);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(unavailable)?;

        let body: Value = response.json().await.map_err(|e| {
            if e.is_decode() {
                SourceError::Malformed(e.to_string())
            } else {
                unavailable(e)
            }
        })?;

        let payload = UptimePayload::from_value(&body)
            .ok_or_else(|| SourceError::Malformed("expected a JSON object".to_string()))?;

        tracing::debug!(
            "UptimeClient: Fetched {} servers for period {}",
            payload.len(),
            period
        );

        Ok(payload)
    }

    /// Ask the backend to run a check round right away.
    pub async fn force_check(&self) -> Result<(), SourceError> {
        let url = format!("{}/api/force-check", self.base_url);

        self.client
            .post(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(unavailable)?;

        Ok(())
    }
}

fn unavailable(e: reqwest::Error) -> SourceError {
    if e.is_timeout() {
        SourceError::Unavailable("backend timed out".to_string())
    } else {
        SourceError::Unavailable(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        extract::Query,
        http::StatusCode,
        routing::{get, post},
        Json, Router,
    };
    use serde_json::json;
    use std::collections::HashMap;

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn client(url: &str) -> UptimeClient {
        UptimeClient::new(url, Duration::from_secs(2)).unwrap()
    }

    #[test]
    fn test_base_url_normalized() {
        let c = UptimeClient::new("localhost:25990/", Duration::from_secs(1)).unwrap();
        assert_eq!(c.base_url(), "http://localhost:25990");
    }

    #[tokio::test]
    async fn test_fetch_passes_period() {
        let router = Router::new().route(
            "/api/uptime",
            get(|Query(q): Query<HashMap<String, String>>| async move {
                let period = q.get("period").cloned().unwrap_or_default();
                let mut body = serde_json::Map::new();
                body.insert(
                    period,
                    json!({
                        "uptime_percent": 100.0,
                        "series": [{"hour": 1704056400, "ok_ratio": 1.0}]
                    }),
                );
                Json(Value::Object(body))
            }),
        );
        let url = spawn_backend(router).await;

        let payload = client(&url).fetch(Period::Week).await.unwrap();
        let week = payload.get("week").unwrap();
        assert_eq!(week.uptime_percent, Some(100.0));
        assert_eq!(week.series.len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_malformed() {
        let router = Router::new()
            .route("/api/uptime", get(|| async { "not json" }));
        let url = spawn_backend(router).await;
        let result = client(&url).fetch(Period::Day).await;
        assert!(matches!(result, Err(SourceError::Malformed(_))));

        let router = Router::new()
            .route("/api/uptime", get(|| async { Json(json!([1, 2])) }));
        let url = spawn_backend(router).await;
        let result = client(&url).fetch(Period::Day).await;
        assert!(matches!(result, Err(SourceError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let router = Router::new().route(
            "/api/uptime",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        );
        let url = spawn_backend(router).await;
        let result = client(&url).fetch(Period::Day).await;
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_fetch_unreachable() {
        let result = client("http://127.0.0.1:1").fetch(Period::Day).await;
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_force_check() {
        let router = Router::new()
            .route("/api/force-check", post(|| async { Json(json!({"ok": true})) }));
        let url = spawn_backend(router).await;
        assert!(client(&url).force_check().await.is_ok());
    }
}
