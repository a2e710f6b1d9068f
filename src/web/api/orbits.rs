use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::config::parse_duration;
use crate::swath::{OrbitPayload, SwathConfig, SwathGenerator};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::api::{parse_start, run_blocking};
use crate::web::state::AppState;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrbitsQuery {
    pub side_angle: Option<f64>,
    pub samples: Option<usize>,
    /// humantime duration, e.g. `5m`
    pub cadence: Option<String>,
    /// RFC3339, defaults to now
    pub start: Option<String>,
}

impl OrbitsQuery {
    /// Request overrides applied to the configured defaults
    pub fn swath_config(&self, defaults: &SwathConfig) -> ApiResult<SwathConfig> {
        let mut config = defaults.clone();
        if let Some(angle) = self.side_angle {
            config.side_angle_deg = angle;
        }
        if let Some(samples) = self.samples {
            config.sample_count = samples;
        }
        if let Some(cadence) = &self.cadence {
            config.cadence =
                parse_duration(cadence).map_err(|e| ApiError::Validation(e.to_string()))?;
        }
        config.validate()?;
        Ok(config)
    }
}

#[utoipa::path(
    get,
    path = "/api/orbits",
    tag = "orbits",
    params(
        ("side_angle" = Option<f64>, Query, description = "Off-nadir side angle (degrees)"),
        ("samples" = Option<usize>, Query, description = "Samples per satellite"),
        ("cadence" = Option<String>, Query, description = "Sample spacing, e.g. 5m"),
        ("start" = Option<String>, Query, description = "First sample time (RFC3339)")
    ),
    responses(
        (status = 200, description = "Ground tracks and swath edges", body = Vec<OrbitPayload>),
        (status = 400, description = "Invalid parameters", body = ErrorResponse),
        (status = 504, description = "Computation timed out", body = ErrorResponse)
    )
)]
pub async fn list_orbits(
    State(state): State<AppState>,
    Query(query): Query<OrbitsQuery>,
) -> ApiResult<Json<Vec<OrbitPayload>>> {
    let config = query.swath_config(&state.config.swath)?;
    let start = parse_start(query.start.as_deref())?;

    let satellites = state.tle_loader.read().await.satellites().to_vec();
    if satellites.is_empty() {
        log::warn!("No satellites loaded");
        return Ok(Json(Vec::new()));
    }

    let propagator = state.propagator.clone();
    let results = run_blocking(&state, move || {
        SwathGenerator::new(config).generate(&satellites, propagator.as_ref(), start)
    })
    .await??;

    Ok(Json(OrbitPayload::from_results(&results)))
}
