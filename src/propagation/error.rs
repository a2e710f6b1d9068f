use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PropagationError {
    #[error("invalid TLE: {0}")]
    InvalidTle(String),
    #[error("elements error: {0}")]
    Elements(String),
    #[error("epoch out of range: {0}")]
    Epoch(String),
    #[error("propagation error: {0}")]
    Propagation(String),
    #[error("propagator returned a non-finite state vector")]
    NonFinite,
}

#[derive(Debug, Error)]
pub enum TleLoadError {
    #[error("TLE source not found: {0}")]
    NotFound(String),
    #[error("TLE file read error: {0}")]
    FileRead(#[from] std::io::Error),
}
