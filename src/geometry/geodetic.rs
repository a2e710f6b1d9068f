use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::error::GeometryError;
use super::wgs84::{A_M, E2};

const MAX_ITERATIONS: usize = 10;
const CONVERGENCE_RAD: f64 = 1e-12;
/// Heights below this during iteration are numerical blow-up, not geometry
const IMPLAUSIBLE_HEIGHT_M: f64 = -1_000_000.0;

/// A WGS-84 geodetic position
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeodeticPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub height_m: f64,
}

impl GeodeticPoint {
    pub fn new(latitude_deg: f64, longitude_deg: f64, height_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            height_m,
        }
    }

    /// `(lon, lat, h)`, the order the display client consumes
    pub fn triplet(&self) -> [f64; 3] {
        [self.longitude_deg, self.latitude_deg, self.height_m]
    }

    /// Same latitude, longitude shifted by `delta_deg` and wrapped, height 0.
    pub fn shifted_on_surface(&self, delta_deg: f64) -> Self {
        Self {
            latitude_deg: self.latitude_deg,
            longitude_deg: wrap_longitude_deg(self.longitude_deg + delta_deg),
            height_m: 0.0,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.latitude_deg.is_finite() && self.longitude_deg.is_finite() && self.height_m.is_finite()
    }
}

/// Wraps a longitude into (-180, 180]
pub fn wrap_longitude_deg(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Converts an Earth-fixed position in meters to WGS-84 latitude/longitude/height.
///
/// Latitude is found by fixed-point iteration on the prime-vertical radius of
/// curvature, seeded from the spherical approximation. Heights are floored at 0.
pub fn to_geodetic(position_m: &Vector3<f64>) -> Result<GeodeticPoint, GeometryError> {
    let (x, y, z) = (position_m.x, position_m.y, position_m.z);
    if !(x.is_finite() && y.is_finite() && z.is_finite()) {
        return Err(GeometryError::ConversionFailure);
    }

    let lon = y.atan2(x);
    let p = (x * x + y * y).sqrt();

    let mut lat = z.atan2(p * (1.0 - E2));
    for _ in 0..MAX_ITERATIONS {
        let n = prime_vertical_radius(lat);
        let mut h = p / lat.cos() - n;
        if h < IMPLAUSIBLE_HEIGHT_M {
            h = 0.0;
        }

        let next = z.atan2(p * (1.0 - E2 * n / (n + h)));
        let converged = (next - lat).abs() < CONVERGENCE_RAD;
        lat = next;
        if converged {
            break;
        }
    }

    // equal to p / cos(lat) - N, but stays finite at the poles
    let (sin_lat, cos_lat) = lat.sin_cos();
    let height = p * cos_lat + z * sin_lat - A_M * (1.0 - E2 * sin_lat * sin_lat).sqrt();

    let point = GeodeticPoint {
        latitude_deg: lat.to_degrees(),
        longitude_deg: wrap_longitude_deg(lon.to_degrees()),
        height_m: height.max(0.0),
    };

    if point.is_finite() {
        Ok(point)
    } else {
        Err(GeometryError::ConversionFailure)
    }
}

/// Earth-fixed position in meters of a geodetic point
pub fn from_geodetic(point: &GeodeticPoint) -> Vector3<f64> {
    let lat = point.latitude_deg.to_radians();
    let lon = point.longitude_deg.to_radians();
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();
    let n = prime_vertical_radius(lat);
    let h = point.height_m;
    Vector3::new(
        (n + h) * cos_lat * cos_lon,
        (n + h) * cos_lat * sin_lon,
        (n * (1.0 - E2) + h) * sin_lat,
    )
}

/// Prime-vertical radius of curvature in meters
pub fn prime_vertical_radius(lat_rad: f64) -> f64 {
    A_M / (1.0 - E2 * lat_rad.sin().powi(2)).sqrt()
}
