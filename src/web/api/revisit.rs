use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::coverage::{analyze_revisit, RevisitQuery, RevisitStats, DEFAULT_DURATION_HOURS};
use crate::swath::DEFAULT_SIDE_ANGLE_DEG;
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::api::{parse_start, run_blocking};
use crate::web::state::AppState;

const MAX_DURATION_HOURS: i64 = 24 * 14;

#[derive(Debug, Deserialize, ToSchema)]
pub struct RevisitParams {
    pub latitude: f64,
    pub longitude: f64,
    /// Hours
    pub duration: Option<u32>,
    pub side_angle: Option<f64>,
    pub start: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/revisit",
    tag = "coverage",
    params(
        ("latitude" = f64, Query, description = "Query point latitude (degrees)"),
        ("longitude" = f64, Query, description = "Query point longitude (degrees)"),
        ("duration" = Option<u32>, Query, description = "Analysis window (hours), default 24"),
        ("side_angle" = Option<f64>, Query, description = "Off-nadir side angle (degrees)"),
        ("start" = Option<String>, Query, description = "Window start (RFC3339)")
    ),
    responses(
        (status = 200, description = "Revisit statistics", body = RevisitStats),
        (status = 400, description = "Invalid parameters or no satellites", body = ErrorResponse),
        (status = 504, description = "Computation timed out", body = ErrorResponse)
    )
)]
pub async fn calculate_revisit(
    State(state): State<AppState>,
    Query(params): Query<RevisitParams>,
) -> ApiResult<Json<RevisitStats>> {
    let hours = params.duration.map_or(DEFAULT_DURATION_HOURS, i64::from);
    if hours > MAX_DURATION_HOURS {
        return Err(ApiError::Validation(format!(
            "duration must be at most {MAX_DURATION_HOURS} hours"
        )));
    }

    let query = RevisitQuery {
        duration: chrono::Duration::hours(hours),
        side_angle_deg: params.side_angle.unwrap_or(DEFAULT_SIDE_ANGLE_DEG),
        radius_km: state.config.coverage.radius_km,
        max_events: state.config.coverage.max_events,
        ..RevisitQuery::new(params.latitude, params.longitude)
    };
    query.validate()?;
    let start = parse_start(params.start.as_deref())?;

    let satellites = state.tle_loader.read().await.satellites().to_vec();
    let propagator = state.propagator.clone();
    let swath = state.config.swath.clone();
    let stats = run_blocking(&state, move || {
        analyze_revisit(&satellites, propagator.as_ref(), &swath, &query, start)
    })
    .await??;

    Ok(Json(stats))
}
