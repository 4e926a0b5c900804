use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::analytics::{AggregationEngine, QueryOutcome, StatsQuery};
use crate::models::{ClickPayload, ConversionPayload};

pub struct AppState {
    pub engine: AggregationEngine,
    pub query: StatsQuery,
    pub started_at: Instant,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct SuccessResponse {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct AnalyticsParams {
    pub campaign_id: Option<String>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub data: HealthData,
}

#[derive(Serialize)]
pub struct HealthData {
    pub total_campaigns: usize,
    pub uptime_secs: u64,
    pub uptime: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: &str) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
}

fn success(message: &str) -> Json<SuccessResponse> {
    Json(SuccessResponse {
        status: "success".to_string(),
        message: message.to_string(),
    })
}

/// Decode a JSON event body whatever the `Content-Type` header says.
fn decode_event<T: DeserializeOwned>(body: &Bytes, kind: &str) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Rejected {} payload: {}", kind, e);
        error(StatusCode::BAD_REQUEST, "Invalid JSON")
    })
}

/// Record a live click event
pub async fn submit_click(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, ApiError> {
    let payload: ClickPayload = decode_event(&body, "click")?;

    state.engine.apply_click(&payload.into_event()).await;
    Ok(success("Click event recorded"))
}

/// Record a live conversion event
pub async fn submit_conversion(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<SuccessResponse>, ApiError> {
    let payload: ConversionPayload = decode_event(&body, "conversion")?;

    state.engine.apply_conversion(&payload.into_event()).await;
    Ok(success("Conversion event recorded"))
}

/// Stats for one campaign (`?campaign_id=`) or for all of them
pub async fn get_analytics(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnalyticsParams>,
) -> Result<Response, ApiError> {
    match state.query.query(params.campaign_id.as_deref()).await {
        QueryOutcome::Campaign(stats) => Ok(Json(stats).into_response()),
        QueryOutcome::All(all) => Ok(Json(all).into_response()),
        QueryOutcome::NotFound => Err(error(StatusCode::NOT_FOUND, "Campaign not found")),
    }
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let uptime = state.started_at.elapsed();

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        data: HealthData {
            total_campaigns: state.query.campaign_count().await,
            uptime_secs: uptime.as_secs(),
            uptime: format_uptime(uptime),
        },
    })
}

/// Render a duration as e.g. `1h 2m 3s`
fn format_uptime(uptime: Duration) -> String {
    let secs = uptime.as_secs();
    let (hours, minutes, seconds) = (secs / 3600, (secs % 3600) / 60, secs % 60);

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
