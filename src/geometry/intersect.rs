use nalgebra::Vector3;

use super::error::NoIntersection;
use super::wgs84::{A_KM, C_KM};

pub const DEFAULT_MAX_ITERATIONS: usize = 20;
pub const DEFAULT_TOLERANCE: f64 = 1e-12;

/// |f'(t)| below this means the ray grazes the surface
const MIN_SLOPE: f64 = 1e-12;

/// Implicit ellipsoid equation `(x^2 + y^2)/a^2 + z^2/c^2 - 1`, km
pub fn ellipsoid_residual(p: &Vector3<f64>) -> f64 {
    (p.x * p.x + p.y * p.y) / (A_KM * A_KM) + p.z * p.z / (C_KM * C_KM) - 1.0
}

/// First crossing of the ray `origin + t * direction`, `t >= 0`, with the
/// WGS-84 ellipsoid, using the default iteration budget.
pub fn intersect(
    origin_km: &Vector3<f64>,
    direction: &Vector3<f64>,
) -> Result<Vector3<f64>, NoIntersection> {
    intersect_with(origin_km, direction, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE)
}

/// Newton iteration on the ray parameter starting from `t = 0`.
///
/// Converges monotonically onto the near crossing when the origin lies
/// outside the ellipsoid and the ray points inwards. The result is in the
/// frame and units of `origin_km`.
pub fn intersect_with(
    origin_km: &Vector3<f64>,
    direction: &Vector3<f64>,
    max_iters: usize,
    tol: f64,
) -> Result<Vector3<f64>, NoIntersection> {
    let a2 = A_KM * A_KM;
    let c2 = C_KM * C_KM;

    let mut t = 0.0;
    let mut residual = f64::NAN;
    for _ in 0..max_iters {
        let r = origin_km + direction * t;
        residual = ellipsoid_residual(&r);
        if !residual.is_finite() {
            return Err(NoIntersection::Diverged);
        }
        if residual.abs() < tol {
            return if t >= 0.0 {
                Ok(r)
            } else {
                Err(NoIntersection::BehindOrigin { t })
            };
        }

        let slope =
            2.0 * (r.x * direction.x + r.y * direction.y) / a2 + 2.0 * r.z * direction.z / c2;
        if slope.abs() < MIN_SLOPE {
            return Err(NoIntersection::TangentRay);
        }
        t -= residual / slope;
        if !t.is_finite() {
            return Err(NoIntersection::Diverged);
        }
    }

    Err(NoIntersection::NotConverged { residual })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn nadir_ray_hits_equator_at_semi_major_axis() {
        let hit =
            intersect(&Vector3::new(7000.0, 0.0, 0.0), &Vector3::new(-1.0, 0.0, 0.0)).unwrap();
        assert_abs_diff_eq!(hit, Vector3::new(A_KM, 0.0, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn nadir_ray_over_pole_hits_semi_minor_axis() {
        let hit =
            intersect(&Vector3::new(0.0, 0.0, 7000.0), &Vector3::new(0.0, 0.0, -1.0)).unwrap();
        assert_abs_diff_eq!(hit.z, C_KM, epsilon = 1e-9);
    }

    #[test]
    fn intersection_lies_on_surface() {
        let origins = [
            Vector3::new(7000.0, 0.0, 0.0),
            Vector3::new(-4400.594, 1932.870, 4760.712),
            Vector3::new(1200.0, -6500.0, -2500.0),
        ];
        for origin in &origins {
            for side in [-35.0f64, -20.0, 0.0, 12.5, 30.0] {
                // tilt the nadir direction out of the radial plane
                let nadir = -origin.normalize();
                let across = nadir.cross(&Vector3::z()).normalize();
                let (s, c) = side.to_radians().sin_cos();
                let direction = nadir * c + across * s;

                let hit = intersect(origin, &direction).unwrap();
                assert!(ellipsoid_residual(&hit).abs() < DEFAULT_TOLERANCE);
                assert!((hit - origin).dot(&direction) >= 0.0);
            }
        }
    }

    #[test]
    fn known_off_nadir_crossing() {
        let side = 20f64.to_radians();
        let direction = Vector3::new(-side.cos(), 0.0, -side.sin());
        let hit = intersect(&Vector3::new(7000.0, 0.0, 0.0), &direction).unwrap();
        assert_abs_diff_eq!(hit.x, 6374.039_122_966, epsilon = 1e-6);
        assert_abs_diff_eq!(hit.z, -227.831_127_055, epsilon = 1e-6);
    }

    #[test]
    fn ray_pointing_away_fails() {
        let err = intersect(&Vector3::new(7000.0, 0.0, 0.0), &Vector3::new(1.0, 0.0, 0.0))
            .unwrap_err();
        assert!(matches!(err, NoIntersection::BehindOrigin { .. }));
    }

    #[test]
    fn tangent_ray_fails() {
        let err = intersect(&Vector3::new(7000.0, 0.0, 0.0), &Vector3::new(0.0, 1.0, 0.0))
            .unwrap_err();
        assert_eq!(err, NoIntersection::TangentRay);
    }

    #[test]
    fn ray_missing_the_earth_does_not_converge() {
        // 80 degrees off nadir from LEO passes well above the limb
        let side = 80f64.to_radians();
        let direction = Vector3::new(-side.cos(), side.sin(), 0.0);
        assert!(intersect(&Vector3::new(7000.0, 0.0, 0.0), &direction).is_err());
    }

    #[test]
    fn iteration_budget_is_respected() {
        let side = 20f64.to_radians();
        let direction = Vector3::new(-side.cos(), 0.0, -side.sin());
        let err =
            intersect_with(&Vector3::new(7000.0, 0.0, 0.0), &direction, 1, 1e-12).unwrap_err();
        assert!(matches!(err, NoIntersection::NotConverged { .. }));
    }
}
