//! Pre-built Test Fixtures
//!
//! Reference claims, training metadata and fitted model parameters. The
//! values are fixed so that tests comparing predictions are reproducible.

use chrono::NaiveDate;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

use domain_claims::{
    ClaimRecord, ClaimRecordBuilder, ClaimType, EmploymentStatus,
};
use domain_inference::artifacts::{FORECASTER_FILE, METADATA_FILE, RESIDUAL_MODEL_FILE, SCALER_FILE};
use domain_inference::encoding::indicator_name;
use domain_inference::features::*;
use domain_inference::models::{AdditiveForecaster, LinearRegressor, Seasonality, StandardScaler};
use domain_inference::{CategoryEncoding, ModelBundle, ModelMetadata, UnseenCategoryPolicy};

/// Fixture for claim records
pub struct ClaimFixtures;

impl ClaimFixtures {
    /// Monday 2024-01-15, age 40, income 50000, Routine, Employed, every
    /// other attribute at the form default
    pub fn reference_claim() -> ClaimRecord {
        ClaimRecordBuilder::new()
            .claim_date("2024-01-15")
            .age(40.0)
            .income(50_000.0)
            .claim_type(ClaimType::Routine)
            .employment_status(EmploymentStatus::Employed)
            .build()
            .expect("reference claim is valid")
    }

    /// Saturday 2024-03-02 emergency claim from a retired patient
    pub fn weekend_emergency_claim() -> ClaimRecord {
        ClaimRecordBuilder::new()
            .claim_date("2024-03-02")
            .age(72.0)
            .income(18_000.0)
            .claim_type(ClaimType::Emergency)
            .employment_status(EmploymentStatus::Retired)
            .build()
            .expect("weekend claim is valid")
    }

    /// Reference claim with another date string
    pub fn claim_on(date: &str) -> ClaimRecord {
        let mut record = Self::reference_claim();
        record.claim_date = date.to_string();
        record
    }
}

/// Fixture for training metadata and fitted models
pub struct ModelFixtures;

impl ModelFixtures {
    /// Numeric source columns, in feature order
    pub fn numeric_features() -> Vec<&'static str> {
        vec![
            PATIENT_AGE,
            PATIENT_INCOME,
            YEAR,
            MONTH,
            DAY_OF_WEEK,
            IS_WEEKEND,
            QUARTER,
            WEEK_OF_YEAR,
            AGE_CLAIM_TYPE,
            INCOME_EMPLOYMENT,
        ]
    }

    /// Closed categorical source columns, in feature order
    pub fn categorical_features() -> Vec<&'static str> {
        vec![
            PATIENT_GENDER,
            PATIENT_MARITAL_STATUS,
            PATIENT_EMPLOYMENT_STATUS,
            CLAIM_TYPE,
            CLAIM_STATUS,
            CLAIM_SUBMISSION_METHOD,
            PROVIDER_SPECIALTY,
        ]
    }

    /// Selected source columns
    pub fn features() -> Vec<String> {
        Self::numeric_features()
            .into_iter()
            .chain(Self::categorical_features())
            .map(str::to_string)
            .collect()
    }

    /// Numeric columns followed by every drop-first indicator (28 columns)
    pub fn train_columns() -> Vec<String> {
        let encoding = CategoryEncoding::sorted_labels();
        let mut columns: Vec<String> =
            Self::numeric_features().into_iter().map(str::to_string).collect();
        for field in Self::categorical_features() {
            columns.extend(encoding.indicator_columns(field).unwrap_or_default());
        }
        columns
    }

    pub fn metadata() -> ModelMetadata {
        ModelMetadata {
            features: Self::features(),
            train_columns: Self::train_columns(),
            encoding: CategoryEncoding::sorted_labels(),
            unseen_categories: UnseenCategoryPolicy::Reject,
        }
    }

    /// Two-year trend with one changepoint, yearly and weekly seasonality
    pub fn forecaster() -> AdditiveForecaster {
        AdditiveForecaster::new(date(2022, 1, 1), 730.0, 5_000.0, 0.4, 0.8)
            .with_changepoint(0.5, -0.1)
            .with_seasonality(Seasonality::yearly(vec![0.05, -0.02, 0.01, 0.03]))
            .with_seasonality(Seasonality::weekly(vec![0.02, -0.01]))
            .with_interval(0.1)
    }

    pub fn regressor() -> LinearRegressor {
        let n = Self::train_columns().len();
        let coefficients = (0..n).map(|i| ((i % 7) as f64 - 3.0) * 12.5).collect();
        LinearRegressor::new(coefficients, 150.0)
    }

    pub fn scaler() -> StandardScaler {
        let (mut mean, mut scale) = (Vec::new(), Vec::new());
        for column in Self::train_columns() {
            let (m, s) = match column.as_str() {
                PATIENT_AGE => (45.0, 15.0),
                PATIENT_INCOME => (60_000.0, 25_000.0),
                YEAR => (2023.0, 1.0),
                MONTH => (6.5, 3.45),
                DAY_OF_WEEK => (3.0, 2.0),
                IS_WEEKEND => (0.28, 0.45),
                QUARTER => (2.5, 1.1),
                WEEK_OF_YEAR => (26.5, 15.0),
                AGE_CLAIM_TYPE => (67.0, 55.0),
                INCOME_EMPLOYMENT => (90_000.0, 80_000.0),
                _ => (0.25, 0.43),
            };
            mean.push(m);
            scale.push(s);
        }
        StandardScaler::new(mean, scale)
    }

    /// Bundle of the fixture models and metadata
    pub fn bundle() -> ModelBundle {
        ModelBundle::new(
            Arc::new(Self::forecaster()),
            Arc::new(Self::regressor()),
            Arc::new(Self::scaler()),
            Self::metadata(),
        )
        .expect("fixture bundle is consistent")
    }

    /// Indicator column for a categorical value
    pub fn indicator(field: &str, label: &str) -> String {
        indicator_name(field, label)
    }
}

/// Temporary directory holding JSON model artifacts, removed on drop
pub struct ArtifactDir {
    dir: TempDir,
}

impl ArtifactDir {
    /// Creates an empty temporary directory
    pub fn empty() -> Self {
        let dir = tempfile::Builder::new()
            .prefix("claim-artifacts-")
            .tempdir()
            .expect("create artifact dir");
        Self { dir }
    }

    /// Creates a directory containing the fixture artifacts
    pub fn with_fixture_models() -> Self {
        let dir = Self::empty();
        dir.write_json(FORECASTER_FILE, &serde_json::to_value(ModelFixtures::forecaster()).unwrap());
        dir.write_json(RESIDUAL_MODEL_FILE, &serde_json::to_value(ModelFixtures::regressor()).unwrap());
        dir.write_json(SCALER_FILE, &serde_json::to_value(ModelFixtures::scaler()).unwrap());
        dir.write_json(METADATA_FILE, &serde_json::to_value(ModelFixtures::metadata()).unwrap());
        dir
    }

    /// Overwrites one artifact file with arbitrary contents
    pub fn write_raw(&self, file: &str, contents: &str) {
        fs::write(self.path().join(file), contents).expect("write artifact");
    }

    pub fn write_json(&self, file: &str, value: &serde_json::Value) {
        self.write_raw(file, &serde_json::to_string_pretty(value).expect("serialize artifact"));
    }

    pub fn remove(&self, file: &str) {
        fs::remove_file(self.path().join(file)).expect("remove artifact");
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid fixture date")
}
