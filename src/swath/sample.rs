use chrono::{DateTime, Utc};

use crate::geometry::intersect::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use crate::geometry::{
    intersect_with, rotate_to_earth_fixed, to_geodetic, GeodeticPoint, GeometryError, OrbitalFrame,
};
use crate::propagation::{Propagator, SatelliteTle, StateVector};
use crate::swath::types::{SampleFailure, SampleResult};

const M_PER_KM: f64 = 1000.0;

/// Newton budget for the beam/ellipsoid crossing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

/// Nominal ground-track point and both swath edges of one state vector
pub fn compute_sample(state: &StateVector, side_angle_deg: f64) -> SampleResult {
    compute_sample_with(state, side_angle_deg, SolverSettings::default())
}

pub fn compute_sample_with(
    state: &StateVector,
    side_angle_deg: f64,
    solver: SolverSettings,
) -> SampleResult {
    let nominal = sub_satellite_point(state).map_err(SampleFailure::from);

    let (left, right) = match OrbitalFrame::from_state(state) {
        Ok(frame) => (
            footprint(state, &frame, -side_angle_deg, solver).map_err(SampleFailure::from),
            footprint(state, &frame, side_angle_deg, solver).map_err(SampleFailure::from),
        ),
        Err(e) => (Err(e.into()), Err(e.into())),
    };

    SampleResult {
        epoch: state.epoch,
        nominal,
        left,
        right,
    }
}

/// Obtains the state vector for `epoch` and computes its sample; a
/// propagation failure fails all three points of the sample.
pub fn propagate_sample<P: Propagator + ?Sized>(
    propagator: &P,
    tle: &SatelliteTle,
    epoch: DateTime<Utc>,
    side_angle_deg: f64,
    solver: SolverSettings,
) -> SampleResult {
    match propagator.propagate(tle, epoch) {
        Ok(state) => compute_sample_with(&state, side_angle_deg, solver),
        Err(e) => SampleResult::failed(epoch, e.into()),
    }
}

/// Geodetic position of the satellite itself
pub fn sub_satellite_point(state: &StateVector) -> Result<GeodeticPoint, GeometryError> {
    let earth_fixed = rotate_to_earth_fixed(&state.position_km, state.epoch);
    to_geodetic(&(earth_fixed * M_PER_KM))
}

/// Ground point hit by the beam tilted `side_angle_deg` off nadir, height 0
pub fn footprint(
    state: &StateVector,
    frame: &OrbitalFrame,
    side_angle_deg: f64,
    solver: SolverSettings,
) -> Result<GeodeticPoint, GeometryError> {
    let direction = frame.boresight(side_angle_deg);
    let hit = intersect_with(
        &state.position_km,
        &direction,
        solver.max_iterations,
        solver.tolerance,
    )?;
    let earth_fixed = rotate_to_earth_fixed(&hit, state.epoch);
    let mut point = to_geodetic(&(earth_fixed * M_PER_KM))?;
    // on the surface by construction
    point.height_m = 0.0;
    Ok(point)
}
