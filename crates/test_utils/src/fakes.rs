//! Fake Models
//!
//! Stand-ins for the forecaster, regressor and scaler with fixed or failing
//! behaviour, for exercising the pipeline without fitted parameters.

use chrono::NaiveDate;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use domain_inference::{Forecast, ForecastError, Forecaster, InferenceError, Regressor, Scaler};

/// Forecaster returning the same baseline for every date
pub struct ConstantForecaster(pub f64);

impl Forecaster for ConstantForecaster {
    fn forecast(&self, _date: NaiveDate) -> Result<Forecast, ForecastError> {
        Ok(Forecast {
            yhat: self.0,
            yhat_lower: self.0,
            yhat_upper: self.0,
        })
    }
}

/// Forecaster that always fails
pub struct FailingForecaster;

impl Forecaster for FailingForecaster {
    fn forecast(&self, date: NaiveDate) -> Result<Forecast, ForecastError> {
        Err(ForecastError::NonFinite {
            date: date.to_string(),
        })
    }
}

/// Forecaster that blocks its thread before answering
pub struct SlowForecaster {
    pub delay: Duration,
    pub baseline: f64,
}

impl Forecaster for SlowForecaster {
    fn forecast(&self, date: NaiveDate) -> Result<Forecast, ForecastError> {
        std::thread::sleep(self.delay);
        ConstantForecaster(self.baseline).forecast(date)
    }
}

/// Regressor returning a constant residual and counting its calls
pub struct ConstantRegressor {
    pub n_features: usize,
    pub value: f64,
    calls: AtomicUsize,
}

impl ConstantRegressor {
    pub fn new(n_features: usize, value: f64) -> Self {
        Self {
            n_features,
            value,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Regressor for ConstantRegressor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if features.len() != self.n_features {
            return Err(InferenceError::DimensionMismatch {
                stage: "residual model",
                expected: self.n_features,
                actual: features.len(),
            });
        }
        Ok(self.value)
    }
}

/// Regressor that always fails
pub struct FailingRegressor {
    pub n_features: usize,
}

impl Regressor for FailingRegressor {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, _features: &[f64]) -> Result<f64, InferenceError> {
        Err(InferenceError::NonFinite { stage: "residual model" })
    }
}

/// Scaler reporting one dimension but accepting vectors of another
///
/// Models a scaler artifact fitted on a different column list than the
/// bundle metadata describes.
pub struct MisfittedScaler {
    pub reported: usize,
    pub fitted: usize,
}

impl Scaler for MisfittedScaler {
    fn n_features(&self) -> usize {
        self.reported
    }

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError> {
        if features.len() != self.fitted {
            return Err(InferenceError::DimensionMismatch {
                stage: "scaler",
                expected: self.fitted,
                actual: features.len(),
            });
        }
        Ok(features.to_vec())
    }
}
