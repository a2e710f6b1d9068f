mod config;
mod error;
mod fallback;
mod generator;
mod sample;
mod types;

pub use config::{
    SwathConfig, DEFAULT_CADENCE_SECONDS, DEFAULT_FALLBACK_OFFSET_DEG, DEFAULT_SAMPLE_COUNT,
    DEFAULT_SIDE_ANGLE_DEG, MAX_SAMPLES,
};
pub use error::SwathConfigError;
pub use fallback::{FallbackPolicy, ResolvedSeries};
pub use generator::SwathGenerator;
pub use sample::{
    compute_sample, compute_sample_with, footprint, propagate_sample, sub_satellite_point,
    SolverSettings,
};
pub use types::{
    FailureKind, FallbackFlag, OrbitPayload, SampleFailure, SampleResult, SatelliteOrbitResult,
    Series, SwathBoundary, Track,
};
