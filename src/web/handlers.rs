//! HTTP request handlers.

use super::AppState;
use crate::grid::{Period, GRID_SHIFT_HOURS, TOOLTIP_SHIFT_HOURS};
use crate::source::SourceError;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Default, Deserialize)]
pub struct PeriodQuery {
    #[serde(default)]
    pub period: Option<String>,
}

impl PeriodQuery {
    /// Missing period means `day`.
    fn period(&self) -> Result<Period, Response> {
        match self.period.as_deref() {
            None | Some("") => Ok(Period::Day),
            Some(s) => s.parse().map_err(|e: crate::grid::PeriodParseError| {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": e.to_string() }))).into_response()
            }),
        }
    }
}

fn unavailable(e: SourceError) -> Response {
    tracing::warn!("Grid data unavailable: {}", e);
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(json!({ "error": "data unavailable", "detail": e.to_string() })),
    )
        .into_response()
}

// ============================================================================
// API: Grid
// ============================================================================

pub async fn handle_get_grid(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    let period = match query.period() {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    match state.refresher.snapshot(period).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => unavailable(e),
    }
}

pub async fn handle_refresh(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> impl IntoResponse {
    let period = match query.period() {
        Ok(p) => p,
        Err(resp) => return resp,
    };

    if let Err(e) = state.refresher.client().force_check().await {
        return unavailable(e);
    }

    match state.refresher.refresh(period).await {
        Ok(snapshot) => Json(snapshot).into_response(),
        Err(e) => unavailable(e),
    }
}

// ============================================================================
// API: Config
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ConfigResponse {
    pub timezone: &'static str,
    pub grid_shift_hours: u32,
    pub tooltip_shift_hours: u32,
    pub refresh_interval_secs: u64,
    pub periods: Vec<Period>,
}

pub async fn handle_get_config(State(state): State<AppState>) -> impl IntoResponse {
    Json(ConfigResponse {
        timezone: state.config.zone().label(),
        grid_shift_hours: GRID_SHIFT_HOURS,
        tooltip_shift_hours: TOOLTIP_SHIFT_HOURS,
        refresh_interval_secs: state.config.refresh_interval().as_secs(),
        periods: Period::ALL.to_vec(),
    })
}
