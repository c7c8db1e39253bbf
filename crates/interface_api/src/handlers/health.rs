//! Health check handlers

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Readiness details of the loaded model bundle
#[derive(Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub version: String,
    pub features: usize,
    pub train_columns: usize,
    pub encoding_version: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check (reports the loaded models)
///
/// The server only starts once the bundle has loaded, so a running
/// instance is always ready.
pub async fn readiness_check(State(state): State<AppState>) -> Json<ReadinessResponse> {
    let bundle = state.pipeline.bundle();
    Json(ReadinessResponse {
        status: "ready".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features: bundle.metadata().features.len(),
        train_columns: bundle.schema().len(),
        encoding_version: bundle.metadata().encoding.version.clone(),
    })
}
