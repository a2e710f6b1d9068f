mod error;
mod propagator;
mod tle_loader;
mod types;

pub use error::{PropagationError, TleLoadError};
pub use propagator::{Propagator, Sgp4Propagator};
pub use tle_loader::{parse_multi_tle, TleLoader};
pub use types::{SatelliteTle, StateVector};
