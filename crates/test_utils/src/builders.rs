//! Test Data Builders
//!
//! Builds model bundles from the fixture models, letting a test replace only
//! the piece it is about.

use std::sync::Arc;

use domain_inference::{
    Forecaster, ModelBundle, ModelMetadata, PipelineError, Regressor, Scaler, UnseenCategoryPolicy,
};

use crate::fixtures::ModelFixtures;

/// Builder for model bundles
pub struct TestBundleBuilder {
    forecaster: Arc<dyn Forecaster>,
    regressor: Arc<dyn Regressor>,
    scaler: Arc<dyn Scaler>,
    metadata: ModelMetadata,
}

impl Default for TestBundleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestBundleBuilder {
    /// Creates a builder holding the fixture models and metadata
    pub fn new() -> Self {
        Self {
            forecaster: Arc::new(ModelFixtures::forecaster()),
            regressor: Arc::new(ModelFixtures::regressor()),
            scaler: Arc::new(ModelFixtures::scaler()),
            metadata: ModelFixtures::metadata(),
        }
    }

    pub fn forecaster(mut self, forecaster: impl Forecaster + 'static) -> Self {
        self.forecaster = Arc::new(forecaster);
        self
    }

    pub fn regressor(mut self, regressor: impl Regressor + 'static) -> Self {
        self.regressor = Arc::new(regressor);
        self
    }

    /// Shares an existing regressor, e.g. to inspect it afterwards
    pub fn shared_regressor(mut self, regressor: Arc<dyn Regressor>) -> Self {
        self.regressor = regressor;
        self
    }

    pub fn scaler(mut self, scaler: impl Scaler + 'static) -> Self {
        self.scaler = Arc::new(scaler);
        self
    }

    pub fn metadata(mut self, metadata: ModelMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn features(mut self, features: Vec<String>) -> Self {
        self.metadata.features = features;
        self
    }

    pub fn train_columns(mut self, columns: Vec<String>) -> Self {
        self.metadata.train_columns = columns;
        self
    }

    pub fn unseen_categories(mut self, policy: UnseenCategoryPolicy) -> Self {
        self.metadata.unseen_categories = policy;
        self
    }

    pub fn try_build(self) -> Result<ModelBundle, PipelineError> {
        ModelBundle::new(self.forecaster, self.regressor, self.scaler, self.metadata)
    }

    pub fn build(self) -> ModelBundle {
        self.try_build().expect("test bundle is consistent")
    }
}
