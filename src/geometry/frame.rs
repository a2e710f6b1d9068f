use chrono::{DateTime, Utc};
use nalgebra::Vector3;

/// J2000.0 epoch (2000-01-01T12:00:00 UTC) as unix milliseconds
const J2000_UNIX_MILLIS: i64 = 946_728_000_000;
const MILLIS_PER_DAY: f64 = 86_400_000.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Fractional days elapsed since J2000.0 (negative before it)
pub fn julian_days_since_j2000(epoch: DateTime<Utc>) -> f64 {
    (epoch.timestamp_millis() - J2000_UNIX_MILLIS) as f64 / MILLIS_PER_DAY
}

/// Greenwich Mean Sidereal Time in degrees, reduced to [0, 360)
pub fn gmst_deg(epoch: DateTime<Utc>) -> f64 {
    let d = julian_days_since_j2000(epoch);
    let t = d / DAYS_PER_CENTURY;
    let gmst = 280.460_618_37 + 360.985_647_366_29 * d + 3.879_33e-4 * t * t
        - t * t * t / 38_710_000.0;
    gmst.rem_euclid(360.0)
}

/// Rotates a pseudo-inertial vector into the Earth-fixed frame.
///
/// Works for positions and unit directions alike; only the orientation
/// changes, the units of the input are preserved.
pub fn rotate_to_earth_fixed(v: &Vector3<f64>, epoch: DateTime<Utc>) -> Vector3<f64> {
    rotate_by_gmst(v, gmst_deg(epoch).to_radians())
}

/// Clockwise rotation about the polar axis by `gmst_rad`
pub fn rotate_by_gmst(v: &Vector3<f64>, gmst_rad: f64) -> Vector3<f64> {
    let (sin_gmst, cos_gmst) = gmst_rad.sin_cos();
    Vector3::new(
        v.x * cos_gmst + v.y * sin_gmst,
        -v.x * sin_gmst + v.y * cos_gmst,
        v.z,
    )
}
