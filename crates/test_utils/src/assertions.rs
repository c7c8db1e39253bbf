//! Custom Test Assertions
//!
//! Assertion helpers for predictions and feature frames that report the
//! values involved on failure.

use domain_inference::{FeatureFrame, PredictionResult, TrainedSchema};

/// Asserts that two floats differ by at most `tolerance`
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "Values differ by more than tolerance: actual={}, expected={}, diff={}, tolerance={}",
        actual,
        expected,
        diff,
        tolerance
    );
}

/// Asserts the components are finite and `final == baseline + residual`
pub fn assert_prediction_consistent(prediction: &PredictionResult) {
    assert!(prediction.baseline.is_finite(), "Baseline is not finite: {:?}", prediction);
    assert!(prediction.residual.is_finite(), "Residual is not finite: {:?}", prediction);
    assert_eq!(
        prediction.final_amount,
        prediction.baseline + prediction.residual,
        "Final amount is not baseline + residual: {:?}",
        prediction
    );
}

/// Asserts a frame has exactly the schema's columns, in order
pub fn assert_frame_matches_schema(frame: &FeatureFrame, schema: &TrainedSchema) {
    let names: Vec<&str> = frame.names().collect();
    let expected: Vec<&str> = schema.columns().iter().map(String::as_str).collect();
    assert_eq!(names, expected, "Frame columns do not match the trained schema");
}

/// Asserts a frame column holds `expected`
pub fn assert_column(frame: &FeatureFrame, column: &str, expected: f64) {
    match frame.get(column) {
        Some(actual) => assert_eq!(
            actual, expected,
            "Column {} holds {}, expected {}",
            column, actual, expected
        ),
        None => panic!("Column {} missing from frame", column),
    }
}
