use chrono::{DateTime, Utc};
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One satellite as read from a TLE source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SatelliteTle {
    pub name: String,
    pub line1: String,
    pub line2: String,
}

impl SatelliteTle {
    pub fn new(
        name: impl Into<String>,
        line1: impl Into<String>,
        line2: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            line1: line1.into(),
            line2: line2.into(),
        }
    }

    /// Catalog number from columns 3-7 of line 1
    pub fn norad_id(&self) -> Option<u32> {
        self.line1.get(2..7)?.trim().parse().ok()
    }
}

/// Position and velocity in the propagator's pseudo-inertial frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position_km: Vector3<f64>,
    pub velocity_km_s: Vector3<f64>,
    pub epoch: DateTime<Utc>,
}

impl StateVector {
    pub fn new(position_km: [f64; 3], velocity_km_s: [f64; 3], epoch: DateTime<Utc>) -> Self {
        Self {
            position_km: Vector3::from(position_km),
            velocity_km_s: Vector3::from(velocity_km_s),
            epoch,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position_km.iter().all(|v| v.is_finite())
            && self.velocity_km_s.iter().all(|v| v.is_finite())
    }
}
