use thiserror::Error;

use crate::swath::SwathConfigError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RevisitError {
    #[error("Latitude must be between -90 and 90, got {0}")]
    InvalidLatitude(f64),
    #[error("Longitude must be between -180 and 180, got {0}")]
    InvalidLongitude(f64),
    #[error("Invalid analysis duration: {0}")]
    InvalidDuration(String),
    #[error("No satellites to analyse")]
    NoSatellites,
    #[error(transparent)]
    Swath(#[from] SwathConfigError),
}
