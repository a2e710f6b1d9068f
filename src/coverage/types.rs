use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::coverage::error::RevisitError;
use crate::swath::DEFAULT_SIDE_ANGLE_DEG;

pub const DEFAULT_RADIUS_KM: f64 = 1000.0;
pub const DEFAULT_MAX_EVENTS: usize = 20;
pub const DEFAULT_DURATION_HOURS: i64 = 24;

/// Ground point whose revisits are counted
#[derive(Debug, Clone, PartialEq)]
pub struct RevisitQuery {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    /// Track samples closer than this count as a pass over the point
    pub radius_km: f64,
    pub duration: Duration,
    pub side_angle_deg: f64,
    /// Events listed in the result; the statistics use all of them
    pub max_events: usize,
}

impl RevisitQuery {
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            radius_km: DEFAULT_RADIUS_KM,
            duration: Duration::hours(DEFAULT_DURATION_HOURS),
            side_angle_deg: DEFAULT_SIDE_ANGLE_DEG,
            max_events: DEFAULT_MAX_EVENTS,
        }
    }

    pub fn validate(&self) -> Result<(), RevisitError> {
        if !(-90.0..=90.0).contains(&self.latitude_deg) {
            return Err(RevisitError::InvalidLatitude(self.latitude_deg));
        }
        if !(-180.0..=180.0).contains(&self.longitude_deg) {
            return Err(RevisitError::InvalidLongitude(self.longitude_deg));
        }
        if self.duration <= Duration::zero() {
            return Err(RevisitError::InvalidDuration(format!(
                "{} s",
                self.duration.num_seconds()
            )));
        }
        Ok(())
    }

    pub fn duration_hours(&self) -> f64 {
        self.duration.num_milliseconds() as f64 / 3_600_000.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct SatellitePosition {
    pub longitude: f64,
    pub latitude: f64,
    pub altitude: f64,
}

/// A nominal track sample within the radius of the query point
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CoverageEvent {
    pub satellite: String,
    pub time: DateTime<Utc>,
    pub distance_km: f64,
    pub satellite_position: SatellitePosition,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct QueryPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Gaps between consecutive coverage events
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, ToSchema)]
pub struct RevisitSummary {
    pub average_revisit_hours: f64,
    pub min_revisit_hours: f64,
    pub max_revisit_hours: f64,
    pub coverage_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RevisitStats {
    pub total_coverage_events: usize,
    /// Earliest events, chronologically
    pub coverage_times: Vec<CoverageEvent>,
    pub query_point: QueryPoint,
    pub duration_hours: f64,
    pub side_angle_degrees: f64,
    /// Absent when the point is never covered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<RevisitSummary>,
}
