mod error;
mod revisit;
mod types;

pub use error::RevisitError;
pub use revisit::{analyze_revisit, revisit};
pub use types::{
    CoverageEvent, QueryPoint, RevisitQuery, RevisitStats, RevisitSummary, SatellitePosition,
    DEFAULT_DURATION_HOURS, DEFAULT_MAX_EVENTS, DEFAULT_RADIUS_KM,
};
