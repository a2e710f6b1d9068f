pub mod error;
pub mod health;
pub mod orbits;
pub mod revisit;

use chrono::{DateTime, Utc};

use crate::web::api::error::{ApiError, ApiResult};
use crate::web::state::AppState;

/// Runs a CPU-bound computation off the async runtime within the configured
/// wall-clock budget.
pub(crate) async fn run_blocking<T, F>(state: &AppState, work: F) -> ApiResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let budget = state.config.web.compute_timeout;
    let task = tokio::task::spawn_blocking(work);
    match tokio::time::timeout(budget, task).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(ApiError::Internal(e.to_string())),
        Err(_) => {
            log::warn!("Computation exceeded {:?}", budget);
            Err(ApiError::Timeout)
        }
    }
}

pub(crate) fn parse_start(start: Option<&str>) -> ApiResult<DateTime<Utc>> {
    match start {
        None => Ok(Utc::now()),
        Some(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| ApiError::Validation(format!("start: {e}"))),
    }
}
