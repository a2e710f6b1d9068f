//! WGS-84 reference ellipsoid.

/// Semi-major axis in meters
pub const A_M: f64 = 6_378_137.0;
/// Flattening
pub const F: f64 = 1.0 / 298.257_223_563;
/// First eccentricity squared, `2f - f^2`
pub const E2: f64 = 2.0 * F - F * F;

/// Semi-major axis in km
pub const A_KM: f64 = A_M / 1000.0;
/// Semi-minor (polar) axis in km
pub const C_KM: f64 = 6_356.752_314_245;
