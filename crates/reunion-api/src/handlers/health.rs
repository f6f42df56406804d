//! Health check handlers and response types.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthCheckResponse {
    pub status: String,
    pub environment: String,
    /// `configured` or `missing_credentials`
    pub drive: String,
    /// `configured` or `missing_sheet_id`
    pub sheets: String,
}

/// Liveness probe - process is running.
#[utoipa::path(get, path = "/live", tag = "health", responses((status = 200, description = "Alive")))]
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Configuration report. Upstreams are not called, so a missing credential
/// shows up as `degraded` rather than as a failed probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service configuration report", body = HealthCheckResponse))
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = &state.config;

    let drive_ready = config.google_api_key().is_some() && config.drive_folder_id().is_some();
    let sheets_ready = config.sheet_id().is_some();

    let response = HealthCheckResponse {
        status: if drive_ready && sheets_ready {
            "healthy"
        } else {
            "degraded"
        }
        .to_string(),
        environment: config.environment().to_string(),
        drive: if drive_ready {
            "configured"
        } else {
            "missing_credentials"
        }
        .to_string(),
        sheets: if sheets_ready {
            "configured"
        } else {
            "missing_sheet_id"
        }
        .to_string(),
    };

    (StatusCode::OK, Json(response))
}
