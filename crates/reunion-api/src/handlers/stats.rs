use crate::constants::{STATS_CACHE_CONTROL, STATS_FETCH_FAILED};
use crate::error::log_error;
use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use reunion_core::StatsSnapshot;
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: StatsSnapshot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Headline numbers: classmates, photos, videos and cities.
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "stats",
    responses(
        (status = 200, description = "Current statistics", body = StatsResponse),
        (status = 500, description = "Contacts could not be fetched; stats are zeroed", body = StatsResponse)
    )
)]
#[tracing::instrument(skip(state), fields(operation = "get_stats"))]
pub async fn get_stats(State(state): State<Arc<AppState>>) -> Response {
    match state.stats.snapshot().await {
        Ok(stats) => (
            [(header::CACHE_CONTROL, STATS_CACHE_CONTROL)],
            Json(StatsResponse {
                success: true,
                stats,
                error: None,
            }),
        )
            .into_response(),
        Err(e) => {
            log_error(&e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(StatsResponse {
                    success: false,
                    stats: StatsSnapshot::default(),
                    error: Some(STATS_FETCH_FAILED.to_string()),
                }),
            )
                .into_response()
        }
    }
}
