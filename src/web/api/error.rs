use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::coverage::RevisitError;
use crate::propagation::TleLoadError;
use crate::swath::SwathConfigError;

#[derive(Debug)]
pub enum ApiError {
    Validation(String),
    NotFound(&'static str),
    Timeout,
    Internal(String),
}

impl From<RevisitError> for ApiError {
    fn from(e: RevisitError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<SwathConfigError> for ApiError {
    fn from(e: SwathConfigError) -> Self {
        ApiError::Validation(e.to_string())
    }
}

impl From<TleLoadError> for ApiError {
    fn from(e: TleLoadError) -> Self {
        match e {
            TleLoadError::NotFound(_) => ApiError::NotFound("tle_source_not_found"),
            _ => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::with_message("validation_failed", &msg)),
            )
                .into_response(),
            ApiError::NotFound(reason) => {
                (StatusCode::NOT_FOUND, Json(ErrorResponse::new(reason))).into_response()
            }
            ApiError::Timeout => (
                StatusCode::GATEWAY_TIMEOUT,
                Json(ErrorResponse::new("computation_timed_out")),
            )
                .into_response(),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::with_message("internal_error", &msg)),
            )
                .into_response(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: None,
        }
    }

    pub fn with_message(error: &str, message: &str) -> Self {
        ErrorResponse {
            error: error.to_string(),
            message: Some(message.to_string()),
        }
    }
}
