use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SwathConfigError {
    #[error("side angle must be finite, got {0}")]
    NonFiniteSideAngle(f64),
    #[error("fallback offset must be finite, got {0}")]
    NonFiniteOffset(f64),
    #[error("cadence must be positive")]
    NonPositiveCadence,
    #[error("{count} samples exceed the limit of {max}")]
    TooManySamples { count: usize, max: usize },
    #[error("solver tolerance must be positive, got {0}")]
    InvalidTolerance(f64),
    #[error("sample grid does not fit the supported time range")]
    EpochOutOfRange,
}
