//! Standardizing scaler

use serde::{Deserialize, Serialize};

use crate::error::InferenceError;
use crate::models::Scaler;

/// Fitted standardization `(x - mean) / scale`
///
/// A zero scale (a constant training column) divides by one instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    /// Scaler that leaves vectors of length `n` unchanged
    pub fn identity(n: usize) -> Self {
        Self::new(vec![0.0; n], vec![1.0; n])
    }
}

impl Scaler for StandardScaler {
    fn n_features(&self) -> usize {
        self.mean.len()
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if self.mean.len() != self.scale.len() || features.len() != self.mean.len() {
            return Err(InferenceError::DimensionMismatch {
                stage: "scaler",
                expected: self.mean.len(),
                actual: features.len(),
            });
        }

        Ok(features
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(x, (mean, scale))| {
                let divisor = if *scale == 0.0 { 1.0 } else { *scale };
                (x - mean) / divisor
            })
            .collect())
    }
}
