//! Inference errors

use std::path::PathBuf;
use thiserror::Error;

use core_kernel::TemporalError;

/// Failure of a single pipeline invocation
///
/// Local to one request: the model bundle is never modified, and the caller
/// decides how to report it. The pipeline never retries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PipelineError {
    #[error("Invalid claim date '{input}'")]
    InvalidDate { input: String },

    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),

    #[error("Inference failure: {0}")]
    InferenceFailure(String),
}

impl PipelineError {
    pub fn schema(message: impl Into<String>) -> Self {
        PipelineError::SchemaMismatch(message.into())
    }

    /// Short machine-readable kind, used in logs and API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidDate { .. } => "invalid_date",
            PipelineError::SchemaMismatch(_) => "schema_mismatch",
            PipelineError::InferenceFailure(_) => "inference_failure",
        }
    }
}

impl From<TemporalError> for PipelineError {
    fn from(err: TemporalError) -> Self {
        match err {
            TemporalError::InvalidDate { input } => PipelineError::InvalidDate { input },
        }
    }
}

impl From<ForecastError> for PipelineError {
    fn from(err: ForecastError) -> Self {
        PipelineError::InferenceFailure(format!("baseline forecast: {err}"))
    }
}

impl From<InferenceError> for PipelineError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::DimensionMismatch { stage: "scaler", expected, actual } => {
                PipelineError::SchemaMismatch(format!(
                    "scaler expects {expected} columns, aligned vector has {actual}"
                ))
            }
            other => PipelineError::InferenceFailure(other.to_string()),
        }
    }
}

/// Errors raised by a baseline forecaster
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ForecastError {
    #[error("Invalid forecaster parameters: {0}")]
    InvalidParameters(String),

    #[error("Forecast for {date} is not finite")]
    NonFinite { date: String },
}

/// Errors raised by the scaler or the residual model
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    #[error("{stage} expects {expected} features, got {actual}")]
    DimensionMismatch {
        stage: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{stage} produced a non-finite value")]
    NonFinite { stage: &'static str },
}

/// Errors loading persisted model artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid artifact bundle: {0}")]
    Invalid(#[from] PipelineError),
}
