//! Prediction handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use std::time::Duration;
use tracing::{info, warn};
use validator::Validate;

use core_kernel::PredictionId;
use domain_claims::ClaimRecord;

use crate::dto::prediction::{PredictRequest, PredictResponse};
use crate::{AppState, error::ApiError};

/// Predicts the amount of a claim
///
/// The pipeline runs on the blocking pool. When a deadline is configured
/// it bounds the whole invocation; a timed-out computation is abandoned,
/// not interrupted.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        warn!(reason = %rejection.body_text(), "Rejected prediction request body");
        ApiError::Validation(rejection.body_text())
    })?;

    request.validate().map_err(|errors| {
        warn!(%errors, "Prediction request failed validation");
        ApiError::Validation(errors.to_string())
    })?;

    let record = ClaimRecord::try_from(request).map_err(|e| ApiError::Validation(e.to_string()))?;

    let pipeline = state.pipeline.clone();
    let task = tokio::task::spawn_blocking(move || pipeline.predict(&record));

    let joined = match state.config.predict_timeout_ms {
        Some(ms) => tokio::time::timeout(Duration::from_millis(ms), task)
            .await
            .map_err(|_| {
                warn!(timeout_ms = ms, "Prediction timed out");
                ApiError::Timeout(ms)
            })?,
        None => task.await,
    };

    let prediction = joined
        .map_err(|e| ApiError::Internal(format!("prediction task failed: {e}")))?
        .map_err(|e| {
            warn!(kind = e.kind(), error = %e, "Prediction failed");
            ApiError::from_pipeline(e, state.config.expose_error_details)
        })?;

    let prediction_id = PredictionId::new();
    info!(
        prediction_id = %prediction_id,
        baseline = prediction.baseline,
        residual = prediction.residual,
        final_amount = prediction.final_amount,
        "Prediction served"
    );

    Ok(Json(PredictResponse::success(prediction_id.to_string(), prediction)))
}
