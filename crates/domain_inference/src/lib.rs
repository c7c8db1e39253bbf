//! Claim Amount Inference
//!
//! Predicts a claim amount as a time-series baseline for the claim date plus
//! a residual correction computed from the claim's attributes.
//!
//! # Architecture
//!
//! - **Encoding**: versioned category-to-ordinal table, fixed at training time
//! - **Features**: calendar, interaction and drop-first one-hot columns
//! - **Schema**: trained-column list and the `align` reindexing step
//! - **Models**: forecaster, scaler and regressor traits with reference implementations
//! - **Artifacts**: the immutable `ModelBundle` loaded at startup
//! - **Pipeline**: `ClaimFeaturePipeline`, tying the steps together
//!
//! # Example
//!
//! ```rust,ignore
//! use domain_inference::{ClaimFeaturePipeline, ModelBundle};
//!
//! let pipeline = ClaimFeaturePipeline::new(ModelBundle::load("./models")?);
//! let prediction = pipeline.predict(&record)?;
//! println!("{}", prediction.final_amount);
//! ```

pub mod artifacts;
pub mod encoding;
pub mod error;
pub mod features;
pub mod models;
pub mod pipeline;
pub mod schema;

pub use artifacts::{ModelBundle, ModelMetadata};
pub use encoding::{CategoryEncoding, UnseenCategoryPolicy};
pub use error::{ArtifactError, ForecastError, InferenceError, PipelineError};
pub use features::{FeatureFrame, FeatureValue, RawFeatures};
pub use models::{Forecast, Forecaster, Regressor, Scaler};
pub use pipeline::{ClaimFeaturePipeline, PredictionResult};
pub use schema::{TrainedSchema, align};
