//! Linear residual model

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;
use crate::models::Regressor;

/// Ordinary least squares model: `coefficients · x + intercept`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearRegressor {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LinearRegressor {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }
}

impl Regressor for LinearRegressor {
    fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        if features.len() != self.coefficients.len() {
            return Err(InferenceError::DimensionMismatch {
                stage: "residual model",
                expected: self.coefficients.len(),
                actual: features.len(),
            });
        }

        let value = self
            .coefficients
            .iter()
            .zip(features)
            .fold(self.intercept, |acc, (c, x)| acc + c * x);

        if value.is_finite() {
            Ok(value)
        } else {
            Err(InferenceError::NonFinite { stage: "residual model" })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_product_plus_intercept() {
        let model = LinearRegressor::new(vec![2.0, -1.0, 0.5], 10.0);
        assert_eq!(model.predict(&[1.0, 3.0, 4.0]).unwrap(), 11.0);
    }

    #[test]
    fn test_negative_output_passes_through() {
        let model = LinearRegressor::new(vec![-100.0], 0.0);
        assert_eq!(model.predict(&[5.0]).unwrap(), -500.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let model = LinearRegressor::new(vec![1.0, 1.0], 0.0);
        assert_eq!(
            model.predict(&[1.0]),
            Err(InferenceError::DimensionMismatch { stage: "residual model", expected: 2, actual: 1 })
        );
    }

    #[test]
    fn test_non_finite_output() {
        let model = LinearRegressor::new(vec![f64::MAX], f64::MAX);
        assert!(matches!(model.predict(&[2.0]), Err(InferenceError::NonFinite { .. })));
    }
}
