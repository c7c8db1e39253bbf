//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

use domain_inference::PipelineError;

const GENERIC_PREDICTION_FAILURE: &str = "Prediction failed";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid claim date: {0}")]
    InvalidDate(String),

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Inference failure: {0}")]
    InferenceFailure(String),

    #[error("Prediction timed out after {0}ms")]
    Timeout(u64),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Maps a pipeline failure, hiding server-side detail unless `expose`
    ///
    /// A bad claim date is the client's input and is always reported as is.
    pub fn from_pipeline(err: PipelineError, expose: bool) -> Self {
        let detail = |message: String| {
            if expose {
                message
            } else {
                GENERIC_PREDICTION_FAILURE.to_string()
            }
        };

        match err {
            PipelineError::InvalidDate { input } => ApiError::InvalidDate(input),
            PipelineError::SchemaMismatch(msg) => ApiError::SchemaMismatch(detail(msg)),
            PipelineError::InferenceFailure(msg) => ApiError::InferenceFailure(detail(msg)),
        }
    }

    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::UNPROCESSABLE_ENTITY, "validation_error"),
            ApiError::InvalidDate(_) => (StatusCode::BAD_REQUEST, "invalid_date"),
            ApiError::SchemaMismatch(_) => (StatusCode::INTERNAL_SERVER_ERROR, "schema_mismatch"),
            ApiError::InferenceFailure(_) => (StatusCode::INTERNAL_SERVER_ERROR, "inference_failure"),
            ApiError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "timeout"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub error: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.parts();

        let body = ErrorResponse {
            status: "error",
            error: error_type.to_string(),
            message: self.to_string(),
            timestamp: Utc::now(),
        };

        (status, Json(body)).into_response()
    }
}
