//! Claims domain errors

use thiserror::Error;

/// Errors that can occur while building or validating a claim record
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClaimError {
    #[error("Invalid {field} '{value}': expected two letters followed by three digits")]
    InvalidCode { field: &'static str, value: String },

    #[error("Invalid {field} {value}: must be a finite, non-negative number")]
    InvalidNumeric { field: &'static str, value: f64 },

    #[error("Unknown {field} '{value}'")]
    UnknownCategory { field: &'static str, value: String },
}
