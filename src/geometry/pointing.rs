use nalgebra::{Matrix3, Vector3};

use super::error::GeometryError;
use crate::propagation::StateVector;

/// Relative size of `R x v` below which the frame is considered undefined
const DEGENERATE_SINE: f64 = 1e-9;

/// Local orbital frame of a satellite.
///
/// Columns are transverse (along-track), orbit normal and radial (towards
/// the Earth centre) unit vectors, expressed in the frame of the state vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitalFrame {
    matrix: Matrix3<f64>,
}

impl OrbitalFrame {
    pub fn from_state(state: &StateVector) -> Result<Self, GeometryError> {
        let position = state.position_km;
        let velocity = state.velocity_km_s;

        let distance = position.norm();
        if !(distance > 0.0 && distance.is_finite()) {
            return Err(GeometryError::DegenerateFrame);
        }
        let radial = -position / distance;

        let h = radial.cross(&velocity);
        let h_norm = h.norm();
        if !(h_norm > DEGENERATE_SINE * velocity.norm()) || !h_norm.is_finite() {
            return Err(GeometryError::DegenerateFrame);
        }
        let normal = h / h_norm;
        let transverse = normal.cross(&radial);

        Ok(Self {
            matrix: Matrix3::from_columns(&[transverse, normal, radial]),
        })
    }

    pub fn transverse(&self) -> Vector3<f64> {
        self.matrix.column(0).into_owned()
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.matrix.column(1).into_owned()
    }

    pub fn radial(&self) -> Vector3<f64> {
        self.matrix.column(2).into_owned()
    }

    /// Orbital-frame to state-frame rotation `[T | N | R]`
    pub fn matrix(&self) -> &Matrix3<f64> {
        &self.matrix
    }

    /// Nadir beam rotated about the transverse axis by `side_angle_deg`,
    /// positive angles tilting towards the orbit normal.
    pub fn boresight(&self, side_angle_deg: f64) -> Vector3<f64> {
        let (sin_side, cos_side) = side_angle_deg.to_radians().sin_cos();
        // about T: nadir (0, 0, 1) -> (0, sin, cos)
        let local = Vector3::new(0.0, sin_side, cos_side);
        self.matrix * local
    }
}

/// Unit sensor boresight in the frame of `state.position_km`.
///
/// An angle of 0 is nadir; the left swath edge uses `-angle`, the right
/// edge `+angle`.
pub fn boresight_direction(
    state: &StateVector,
    side_angle_deg: f64,
) -> Result<Vector3<f64>, GeometryError> {
    Ok(OrbitalFrame::from_state(state)?.boresight(side_angle_deg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::Utc;

    fn state(position: [f64; 3], velocity: [f64; 3]) -> StateVector {
        StateVector {
            position_km: Vector3::from(position),
            velocity_km_s: Vector3::from(velocity),
            epoch: Utc::now(),
        }
    }

    fn assert_orthonormal(frame: &OrbitalFrame) {
        let axes = [frame.transverse(), frame.normal(), frame.radial()];
        for (i, a) in axes.iter().enumerate() {
            assert_abs_diff_eq!(a.norm(), 1.0, epsilon = 1e-9);
            for b in axes.iter().skip(i + 1) {
                assert!(a.dot(b).abs() < 1e-9, "axes not orthogonal: {}", a.dot(b));
            }
        }
    }

    #[test]
    fn frame_is_orthonormal_for_assorted_states() {
        let states = [
            state([7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]),
            state([-4400.594, 1932.870, 4760.712], [-2.6, -7.0, 0.4]),
            state([6878.0, -120.0, 35.0], [0.1, 1.2, 7.5]),
            state([42_164.0, 10.0, -3.0], [-0.001, 3.07, 0.02]),
            state([-2000.0, 26_000.0, 4000.0], [-3.9, -0.1, 0.6]),
        ];
        for s in &states {
            assert_orthonormal(&OrbitalFrame::from_state(s).unwrap());
        }
    }

    #[test]
    fn equatorial_prograde_frame_axes() {
        let frame = OrbitalFrame::from_state(&state([7000.0, 0.0, 0.0], [0.0, 7.5, 0.0])).unwrap();
        assert_abs_diff_eq!(frame.radial(), Vector3::new(-1.0, 0.0, 0.0), epsilon = 1e-15);
        assert_abs_diff_eq!(frame.normal(), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-15);
        assert_abs_diff_eq!(frame.transverse(), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-15);
    }

    #[test]
    fn nadir_boresight_points_at_earth_centre() {
        let s = state([-4400.594, 1932.870, 4760.712], [-2.6, -7.0, 0.4]);
        let d = boresight_direction(&s, 0.0).unwrap();
        let towards_centre = -s.position_km.normalize();
        assert_abs_diff_eq!(d, towards_centre, epsilon = 1e-12);
    }

    #[test]
    fn side_angle_tilts_towards_normal() {
        let s = state([7000.0, 0.0, 0.0], [0.0, 7.5, 0.0]);
        let frame = OrbitalFrame::from_state(&s).unwrap();
        let right = frame.boresight(20.0);
        let left = frame.boresight(-20.0);

        assert_abs_diff_eq!(right.norm(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(right.dot(&frame.radial()), 20f64.to_radians().cos(), epsilon = 1e-12);
        assert!(right.dot(&frame.normal()) > 0.0);
        assert!(left.dot(&frame.normal()) < 0.0);
        assert_abs_diff_eq!(right.dot(&frame.transverse()), 0.0, epsilon = 1e-15);
    }

    #[test]
    fn parallel_velocity_is_degenerate() {
        let s = state([7000.0, 0.0, 0.0], [7.5, 0.0, 0.0]);
        assert_eq!(
            OrbitalFrame::from_state(&s).unwrap_err(),
            GeometryError::DegenerateFrame
        );
        let s = state([7000.0, 0.0, 0.0], [0.0, 0.0, 0.0]);
        assert!(boresight_direction(&s, 20.0).is_err());
    }

    #[test]
    fn zero_or_nan_position_is_degenerate() {
        assert!(OrbitalFrame::from_state(&state([0.0; 3], [0.0, 7.5, 0.0])).is_err());
        assert!(OrbitalFrame::from_state(&state([f64::NAN, 0.0, 0.0], [0.0, 7.5, 0.0])).is_err());
    }
}
