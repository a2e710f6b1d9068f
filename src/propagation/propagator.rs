use chrono::{DateTime, Utc};
use sgp4::{Constants, Elements};

use super::error::PropagationError;
use super::types::{SatelliteTle, StateVector};

/// Source of state vectors for a satellite at a given instant.
///
/// Called once per sample, possibly from several threads at once; every
/// call may fail independently.
pub trait Propagator: Send + Sync {
    fn propagate(
        &self,
        tle: &SatelliteTle,
        at: DateTime<Utc>,
    ) -> Result<StateVector, PropagationError>;
}

/// SGP4/SDP4 propagation of two-line elements into the TEME frame
#[derive(Debug, Default, Clone, Copy)]
pub struct Sgp4Propagator;

impl Sgp4Propagator {
    pub fn new() -> Self {
        Self
    }

    /// Parses and validates the elements of a satellite without propagating
    pub fn check(tle: &SatelliteTle) -> Result<(), PropagationError> {
        let elements = parse_elements(tle)?;
        Constants::from_elements(&elements)
            .map(|_| ())
            .map_err(|e| PropagationError::Elements(e.to_string()))
    }
}

impl Propagator for Sgp4Propagator {
    fn propagate(
        &self,
        tle: &SatelliteTle,
        at: DateTime<Utc>,
    ) -> Result<StateVector, PropagationError> {
        let elements = parse_elements(tle)?;
        let constants = Constants::from_elements(&elements)
            .map_err(|e| PropagationError::Elements(e.to_string()))?;

        let minutes = elements
            .datetime_to_minutes_since_epoch(&at.naive_utc())
            .map_err(|e| PropagationError::Epoch(e.to_string()))?;

        let prediction = constants
            .propagate(minutes)
            .map_err(|e| PropagationError::Propagation(e.to_string()))?;

        let state = StateVector::new(prediction.position, prediction.velocity, at);
        if state.is_finite() {
            Ok(state)
        } else {
            Err(PropagationError::NonFinite)
        }
    }
}

fn parse_elements(tle: &SatelliteTle) -> Result<Elements, PropagationError> {
    Elements::from_tle(
        Some(tle.name.clone()),
        tle.line1.as_bytes(),
        tle.line2.as_bytes(),
    )
    .map_err(|e| PropagationError::InvalidTle(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn iss() -> SatelliteTle {
        SatelliteTle::new(
            "ISS (ZARYA)",
            "1 25544U 98067A   25078.36999458  .00023040  00000+0  41584-3 0  9998",
            "2 25544  51.6365  31.8868 0003892  28.0409 332.0788 15.49628144501233",
        )
    }

    #[test]
    fn propagates_iss_to_low_earth_orbit() {
        let at = Utc.with_ymd_and_hms(2025, 3, 20, 11, 10, 0).unwrap();
        let state = Sgp4Propagator::new().propagate(&iss(), at).unwrap();
        let radius = state.position_km.norm();
        let speed = state.velocity_km_s.norm();
        assert!((6600.0..6900.0).contains(&radius), "radius {}", radius);
        assert!((7.4..7.9).contains(&speed), "speed {}", speed);
        assert_eq!(state.epoch, at);
    }

    #[test]
    fn malformed_lines_are_propagation_errors() {
        let tle = SatelliteTle::new("BROKEN", "1 garbage", "2 garbage");
        let at = Utc.with_ymd_and_hms(2025, 3, 20, 0, 0, 0).unwrap();
        let err = Sgp4Propagator::new().propagate(&tle, at).unwrap_err();
        assert!(matches!(err, PropagationError::InvalidTle(_)));
        assert!(Sgp4Propagator::check(&tle).is_err());
    }

    #[test]
    fn norad_id_is_read_from_line_one() {
        assert_eq!(iss().norad_id(), Some(25544));
        assert_eq!(SatelliteTle::new("X", "1", "2").norad_id(), None);
    }
}
