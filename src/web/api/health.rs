use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub tle_source_exists: bool,
    pub satellite_count: usize,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReloadResponse {
    pub satellite_count: usize,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "service",
    responses(
        (status = 200, description = "Service status", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let loader = state.tle_loader.read().await;
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        tle_source_exists: loader.source_exists(),
        satellite_count: loader.satellites().len(),
    })
}

#[utoipa::path(
    post,
    path = "/api/tle/reload",
    tag = "service",
    responses(
        (status = 200, description = "TLE source re-read", body = ReloadResponse),
        (status = 404, description = "TLE source missing", body = ErrorResponse),
        (status = 500, description = "TLE source unreadable", body = ErrorResponse)
    )
)]
pub async fn reload_tle(State(state): State<AppState>) -> ApiResult<Json<ReloadResponse>> {
    let mut loader = state.tle_loader.write().await;
    let satellite_count = loader.reload()?;
    Ok(Json(ReloadResponse { satellite_count }))
}
