//! Model interfaces
//!
//! The pipeline depends only on these three traits. Every method takes
//! `&self` and implementors must be `Send + Sync`, so one loaded bundle can
//! serve concurrent requests without locking. An implementation whose
//! inference mutates internal state must guard it itself.

pub mod forecaster;
pub mod regressor;
pub mod scaler;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ForecastError, InferenceError};

pub use forecaster::{AdditiveForecaster, Changepoint, Seasonality};
pub use regressor::LinearRegressor;
pub use scaler::StandardScaler;

/// Baseline forecast for one date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// Point forecast
    pub yhat: f64,
    pub yhat_lower: f64,
    pub yhat_upper: f64,
}

/// Time-series model mapping a date to a baseline amount
pub trait Forecaster: Send + Sync {
    fn forecast(&self, date: NaiveDate) -> Result<Forecast, ForecastError>;
}

/// Residual model mapping a scaled feature vector to a correction
pub trait Regressor: Send + Sync {
    /// Number of features the model expects
    fn n_features(&self) -> usize;

    fn predict(&self, features: &[f64]) -> Result<f64, InferenceError>;
}

/// Fitted feature scaler, applied without refitting
pub trait Scaler: Send + Sync {
    /// Number of features the scaler was fitted on
    fn n_features(&self) -> usize;

    fn transform(&self, features: &[f64]) -> Result<Vec<f64>, InferenceError>;
}
