//! HTTP API Layer
//!
//! This crate serves claim amount predictions over HTTP using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: prediction and health endpoints
//! - **Middleware**: request audit logging
//! - **DTOs**: request validation and response bodies
//! - **Error Handling**: consistent JSON error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::create_router;
//!
//! let pipeline = ClaimFeaturePipeline::new(ModelBundle::load(&config.model_dir)?);
//! let app = create_router(pipeline, config);
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};

use domain_inference::ClaimFeaturePipeline;

use crate::config::ApiConfig;
use crate::middleware::audit_middleware;
use crate::handlers::{health, predict};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<ClaimFeaturePipeline>,
    pub config: ApiConfig,
}

/// Creates the main API router
///
/// # Arguments
///
/// * `pipeline` - Prediction pipeline over the loaded model bundle
/// * `config` - API configuration
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(pipeline: ClaimFeaturePipeline, config: ApiConfig) -> Router {
    let state = AppState {
        pipeline: Arc::new(pipeline),
        config,
    };

    // Public routes
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Prediction routes
    let predict_routes = Router::new()
        .route("/predict", post(predict::predict))
        .route("/predict/", post(predict::predict))
        .layer(axum_middleware::from_fn(audit_middleware));

    // Combine all routes
    Router::new()
        .merge(health_routes)
        .merge(predict_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
