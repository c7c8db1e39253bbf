//! Claim feature pipeline
//!
//! One prediction runs these steps against a [`ModelBundle`]:
//!
//! 1. parse the claim date and take the forecaster's point value as the baseline
//! 2. derive calendar columns from the date
//! 3. derive the interaction columns from ordinal codes
//! 4. select the trained feature columns and one-hot encode them (drop-first)
//! 5. align the result to the trained-column schema
//! 6. scale with the fitted scaler
//! 7. take the residual model's correction
//! 8. return baseline + residual, unclamped
//!
//! The pipeline holds no mutable state, so a single instance may serve
//! concurrent callers. Deadlines, if any, belong to the caller.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use core_kernel::parse_claim_date;
use domain_claims::ClaimRecord;

use crate::artifacts::ModelBundle;
use crate::encoding::UnseenCategoryPolicy;
use crate::error::PipelineError;
use crate::features::{FeatureFrame, engineer, expand, unseen_indicators};
use crate::schema::align;

/// Components of one prediction
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// Time-series baseline for the claim date
    #[serde(rename = "prophet")]
    pub baseline: f64,
    /// Correction from the claim attributes
    pub residual: f64,
    /// `baseline + residual`
    #[serde(rename = "final")]
    pub final_amount: f64,
}

impl PredictionResult {
    pub fn new(baseline: f64, residual: f64) -> Self {
        Self {
            baseline,
            residual,
            final_amount: baseline + residual,
        }
    }
}

/// Baseline + residual claim amount predictor
#[derive(Debug, Clone)]
pub struct ClaimFeaturePipeline {
    bundle: ModelBundle,
}

impl ClaimFeaturePipeline {
    pub fn new(bundle: ModelBundle) -> Self {
        Self { bundle }
    }

    pub fn bundle(&self) -> &ModelBundle {
        &self.bundle
    }

    /// Predicts the claim amount
    ///
    /// # Errors
    ///
    /// - `InvalidDate` if the claim date does not parse
    /// - `SchemaMismatch` if the record cannot be expressed in the trained
    ///   columns, or the scaler disagrees with them
    /// - `InferenceFailure` if the forecaster or residual model fails
    pub fn predict(&self, record: &ClaimRecord) -> Result<PredictionResult, PipelineError> {
        let date = parse_claim_date(&record.claim_date)?;
        let baseline = self.bundle.forecaster().forecast(date)?.yhat;

        let aligned = self.engineer_aligned(record, date)?;
        let scaled = self.bundle.scaler().transform(&aligned.values())?;
        let residual = self.bundle.regressor().predict(&scaled)?;

        let result = PredictionResult::new(baseline, residual);
        debug!(
            claim_date = %date,
            baseline = result.baseline,
            residual = result.residual,
            final_amount = result.final_amount,
            "Claim amount predicted"
        );
        Ok(result)
    }

    /// Runs steps 2–5 and returns the aligned, unscaled feature vector
    pub fn engineer_features(&self, record: &ClaimRecord) -> Result<FeatureFrame, PipelineError> {
        let date = parse_claim_date(&record.claim_date)?;
        self.engineer_aligned(record, date)
    }

    fn engineer_aligned(
        &self,
        record: &ClaimRecord,
        date: NaiveDate,
    ) -> Result<FeatureFrame, PipelineError> {
        let metadata = self.bundle.metadata();
        let schema = self.bundle.schema();

        let raw = engineer(record, date, &metadata.encoding)?;

        if metadata.unseen_categories == UnseenCategoryPolicy::Reject {
            let unseen = unseen_indicators(&raw, &metadata.features, &metadata.encoding, schema);
            if !unseen.is_empty() {
                return Err(PipelineError::schema(format!(
                    "categories not seen at training time: {}",
                    unseen.join(", ")
                )));
            }
        }

        let expanded = expand(&raw, &metadata.features, &metadata.encoding)?;
        let aligned = align(&expanded, schema);
        debug!(
            expanded = expanded.len(),
            aligned = aligned.len(),
            "Features aligned to trained columns"
        );
        Ok(aligned)
    }
}
