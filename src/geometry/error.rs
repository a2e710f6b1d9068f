use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum NoIntersection {
    #[error("ray is tangent to the ellipsoid")]
    TangentRay,
    #[error("newton iteration diverged")]
    Diverged,
    #[error("newton iteration did not converge (residual {residual:e})")]
    NotConverged { residual: f64 },
    #[error("ellipsoid crossing lies behind the ray origin (t = {t})")]
    BehindOrigin { t: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    #[error("degenerate orbital frame: position and velocity are parallel")]
    DegenerateFrame,
    #[error("no ellipsoid intersection: {0}")]
    NoIntersection(#[from] NoIntersection),
    #[error("geodetic conversion of a non-finite vector")]
    ConversionFailure,
}
