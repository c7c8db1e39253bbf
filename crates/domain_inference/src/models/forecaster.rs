//! Additive trend + seasonality forecaster
//!
//! Evaluates a fitted additive decomposition of the claim-amount series:
//!
//! ```text
//! t        = (days(ds) - days(start)) / t_scale
//! trend(t) = (k + Σ δ_j) · t + (m + Σ -c_j · δ_j)     over changepoints c_j <= t
//! s(ds)    = Σ β · [sin(2πnτ/P), cos(2πnτ/P)]  n = 1..=order, τ = days since 1970-01-01
//! yhat     = (trend(t) + Σ s(ds)) · y_scale
//! ```
//!
//! Trend and seasonality parameters are fitted on scaled data (`y / y_scale`
//! and scaled time). Dates outside the fitted range extrapolate the last
//! trend segment; seasonal terms are periodic and defined for every date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use core_kernel::days_since_epoch;

use crate::error::ForecastError;
use crate::models::{Forecast, Forecaster};

/// A trend changepoint in scaled time
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Changepoint {
    /// Position in scaled time, `0.0` is the first training date
    pub t: f64,
    /// Rate adjustment applied from `t` onwards
    pub delta: f64,
}

/// A Fourier seasonal component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seasonality {
    pub name: String,
    pub period_days: f64,
    pub order: usize,
    /// `2 * order` coefficients ordered sin₁, cos₁, sin₂, cos₂, …
    pub beta: Vec<f64>,
}

impl Seasonality {
    pub fn new(name: impl Into<String>, period_days: f64, beta: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            period_days,
            order: beta.len() / 2,
            beta,
        }
    }

    pub fn yearly(beta: Vec<f64>) -> Self {
        Self::new("yearly", 365.25, beta)
    }

    pub fn weekly(beta: Vec<f64>) -> Self {
        Self::new("weekly", 7.0, beta)
    }

    fn value(&self, days: f64) -> f64 {
        (1..=self.order)
            .map(|n| {
                let x = 2.0 * PI * n as f64 * days / self.period_days;
                self.beta[2 * (n - 1)] * x.sin() + self.beta[2 * (n - 1) + 1] * x.cos()
            })
            .sum()
    }
}

/// Fitted additive forecaster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditiveForecaster {
    /// First training date, origin of scaled time
    pub start: NaiveDate,
    /// Length of the training range in days
    pub t_scale_days: f64,
    /// Divisor applied to the target during fitting
    pub y_scale: f64,
    /// Base growth rate
    pub k: f64,
    /// Base offset
    pub m: f64,
    #[serde(default)]
    pub changepoints: Vec<Changepoint>,
    #[serde(default)]
    pub seasonalities: Vec<Seasonality>,
    /// Half-width of the uncertainty interval in scaled units
    #[serde(default)]
    pub interval_half_width: f64,
}

impl AdditiveForecaster {
    pub fn new(start: NaiveDate, t_scale_days: f64, y_scale: f64, k: f64, m: f64) -> Self {
        Self {
            start,
            t_scale_days,
            y_scale,
            k,
            m,
            changepoints: Vec::new(),
            seasonalities: Vec::new(),
            interval_half_width: 0.0,
        }
    }

    pub fn with_changepoint(mut self, t: f64, delta: f64) -> Self {
        self.changepoints.push(Changepoint { t, delta });
        self
    }

    pub fn with_seasonality(mut self, seasonality: Seasonality) -> Self {
        self.seasonalities.push(seasonality);
        self
    }

    pub fn with_interval(mut self, half_width: f64) -> Self {
        self.interval_half_width = half_width;
        self
    }

    /// Checks the parameters are usable for forecasting
    pub fn validate(&self) -> Result<(), ForecastError> {
        if !(self.t_scale_days.is_finite() && self.t_scale_days > 0.0) {
            return Err(ForecastError::InvalidParameters(format!(
                "t_scale_days must be positive, got {}",
                self.t_scale_days
            )));
        }
        if !self.y_scale.is_finite() {
            return Err(ForecastError::InvalidParameters("y_scale is not finite".to_string()));
        }
        for s in &self.seasonalities {
            if !(s.period_days.is_finite() && s.period_days > 0.0) {
                return Err(ForecastError::InvalidParameters(format!(
                    "seasonality {} has period {}",
                    s.name, s.period_days
                )));
            }
            if s.beta.len() != 2 * s.order {
                return Err(ForecastError::InvalidParameters(format!(
                    "seasonality {} of order {} needs {} coefficients, has {}",
                    s.name,
                    s.order,
                    2 * s.order,
                    s.beta.len()
                )));
            }
        }
        Ok(())
    }

    fn trend(&self, t: f64) -> f64 {
        let (rate, offset) = self
            .changepoints
            .iter()
            .filter(|cp| cp.t <= t)
            .fold((self.k, self.m), |(rate, offset), cp| {
                (rate + cp.delta, offset - cp.t * cp.delta)
            });
        rate * t + offset
    }
}

impl Forecaster for AdditiveForecaster {
    fn forecast(&self, date: NaiveDate) -> Result<Forecast, ForecastError> {
        self.validate()?;

        let days = days_since_epoch(date) as f64;
        let t = (days - days_since_epoch(self.start) as f64) / self.t_scale_days;
        let seasonal: f64 = self.seasonalities.iter().map(|s| s.value(days)).sum();

        let yhat = (self.trend(t) + seasonal) * self.y_scale;
        if !yhat.is_finite() {
            return Err(ForecastError::NonFinite {
                date: date.to_string(),
            });
        }

        let half_width = self.interval_half_width * self.y_scale;
        Ok(Forecast {
            yhat,
            yhat_lower: yhat - half_width,
            yhat_upper: yhat + half_width,
        })
    }
}
