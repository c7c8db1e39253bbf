//! Trained model artifacts
//!
//! A [`ModelBundle`] is built once at startup and handed to the pipeline.
//! Nothing in it changes afterwards; clones share the same models.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::encoding::{CategoryEncoding, UnseenCategoryPolicy};
use crate::error::{ArtifactError, PipelineError};
use crate::models::{AdditiveForecaster, Forecaster, LinearRegressor, Regressor, Scaler, StandardScaler};
use crate::schema::TrainedSchema;

pub const FORECASTER_FILE: &str = "forecaster.json";
pub const RESIDUAL_MODEL_FILE: &str = "residual_model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const METADATA_FILE: &str = "metadata.json";

/// Training-time metadata persisted next to the models
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Source columns selected before one-hot expansion, in order
    pub features: Vec<String>,
    /// Columns of the residual model's input, in order
    pub train_columns: Vec<String>,
    #[serde(default)]
    pub encoding: CategoryEncoding,
    #[serde(default)]
    pub unseen_categories: UnseenCategoryPolicy,
}

/// Read-only set of models and metadata shared by all predictions
#[derive(Clone)]
pub struct ModelBundle {
    forecaster: Arc<dyn Forecaster>,
    regressor: Arc<dyn Regressor>,
    scaler: Arc<dyn Scaler>,
    metadata: Arc<ModelMetadata>,
    schema: TrainedSchema,
}

impl ModelBundle {
    /// Assembles a bundle, checking the metadata against the models
    ///
    /// # Errors
    ///
    /// `SchemaMismatch` if the feature or trained-column list is empty or
    /// repeats a column, or if the scaler or residual model was fitted on a
    /// different number of columns than the trained-column list holds.
    pub fn new(
        forecaster: Arc<dyn Forecaster>,
        regressor: Arc<dyn Regressor>,
        scaler: Arc<dyn Scaler>,
        metadata: ModelMetadata,
    ) -> Result<Self, PipelineError> {
        if metadata.features.is_empty() {
            return Err(PipelineError::schema("feature column list is empty"));
        }
        let schema = TrainedSchema::new(metadata.train_columns.clone())?;

        if scaler.n_features() != schema.len() {
            return Err(PipelineError::schema(format!(
                "scaler was fitted on {} columns, trained-column list has {}",
                scaler.n_features(),
                schema.len()
            )));
        }
        if regressor.n_features() != schema.len() {
            return Err(PipelineError::schema(format!(
                "residual model was fitted on {} columns, trained-column list has {}",
                regressor.n_features(),
                schema.len()
            )));
        }

        Ok(Self {
            forecaster,
            regressor,
            scaler,
            metadata: Arc::new(metadata),
            schema,
        })
    }

    /// Loads the JSON artifacts in `dir`
    ///
    /// Expects `forecaster.json`, `residual_model.json`, `scaler.json` and
    /// `metadata.json`.
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        info!(dir = %dir.display(), "Loading model artifacts");

        let forecaster: AdditiveForecaster = read_json(&dir.join(FORECASTER_FILE))?;
        forecaster
            .validate()
            .map_err(|e| ArtifactError::Invalid(PipelineError::from(e)))?;
        let regressor: LinearRegressor = read_json(&dir.join(RESIDUAL_MODEL_FILE))?;
        let scaler: StandardScaler = read_json(&dir.join(SCALER_FILE))?;
        let metadata: ModelMetadata = read_json(&dir.join(METADATA_FILE))?;

        let bundle = Self::new(
            Arc::new(forecaster),
            Arc::new(regressor),
            Arc::new(scaler),
            metadata,
        )?;

        info!(
            features = bundle.metadata.features.len(),
            train_columns = bundle.schema.len(),
            encoding = %bundle.metadata.encoding.version,
            "Model artifacts loaded"
        );
        Ok(bundle)
    }

    pub fn forecaster(&self) -> &dyn Forecaster {
        self.forecaster.as_ref()
    }

    pub fn regressor(&self) -> &dyn Regressor {
        self.regressor.as_ref()
    }

    pub fn scaler(&self) -> &dyn Scaler {
        self.scaler.as_ref()
    }

    pub fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    pub fn schema(&self) -> &TrainedSchema {
        &self.schema
    }
}

impl std::fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelBundle")
            .field("features", &self.metadata.features.len())
            .field("train_columns", &self.schema.len())
            .field("encoding", &self.metadata.encoding.version)
            .finish_non_exhaustive()
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let contents = fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
