//! Tests for core_kernel error types

use core_kernel::error::CoreError;
use core_kernel::temporal::TemporalError;

#[test]
fn test_core_error_from_temporal_error() {
    let temporal = TemporalError::InvalidDate { input: "yesterday".to_string() };
    let core_error: CoreError = temporal.into();

    assert!(matches!(core_error, CoreError::Temporal(_)));
    assert!(core_error.to_string().contains("yesterday"));
}

#[test]
fn test_core_error_configuration() {
    let error = CoreError::configuration("Missing model directory");

    match error {
        CoreError::Configuration(msg) => assert_eq!(msg, "Missing model directory"),
        _ => panic!("Expected Configuration error"),
    }
}

#[test]
fn test_core_error_display() {
    let error = CoreError::configuration("model_dir is empty");
    assert_eq!(error.to_string(), "Configuration error: model_dir is empty");
}
