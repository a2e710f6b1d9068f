use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::health::{HealthResponse, ReloadResponse};
use super::api::orbits::OrbitsQuery;
use super::api::revisit::RevisitParams;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::orbits::list_orbits,
        super::api::revisit::calculate_revisit,
        super::api::health::health,
        super::api::health::reload_tle,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            ReloadResponse,
            OrbitsQuery,
            RevisitParams,
            crate::swath::OrbitPayload,
            crate::swath::FallbackFlag,
            crate::swath::FailureKind,
            crate::swath::Series,
            crate::coverage::RevisitStats,
            crate::coverage::CoverageEvent,
            crate::coverage::RevisitSummary,
            crate::coverage::QueryPoint,
            crate::coverage::SatellitePosition,
        )
    ),
    info(
        title = "Swath Track API",
        description = "Satellite ground tracks, sensor swath edges and revisit analysis",
        version = "0.1.0"
    ),
    tags(
        (name = "orbits", description = "Ground tracks and swaths"),
        (name = "coverage", description = "Revisit analysis"),
        (name = "service", description = "Health and TLE management")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let doc = ApiDoc::openapi();
        for path in ["/api/orbits", "/api/revisit", "/api/health", "/api/tle/reload"] {
            assert!(doc.paths.paths.contains_key(path), "{path} missing");
        }
    }
}
