//! API configuration

use serde::Deserialize;
use std::path::PathBuf;

use core_kernel::CoreError;

/// API configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Directory holding the model artifacts
    pub model_dir: PathBuf,
    /// Log level
    pub log_level: String,
    /// Return raw pipeline error messages to clients
    pub expose_error_details: bool,
    /// Deadline for one prediction, in milliseconds
    pub predict_timeout_ms: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            model_dir: PathBuf::from("./models"),
            log_level: "info".to_string(),
            expose_error_details: false,
            predict_timeout_ms: None,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from `API_`-prefixed environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Checks values the type system cannot
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.predict_timeout_ms == Some(0) {
            return Err(CoreError::configuration("predict_timeout_ms must be positive"));
        }
        if self.model_dir.as_os_str().is_empty() {
            return Err(CoreError::configuration("model_dir is empty"));
        }
        Ok(())
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.server_addr(), "0.0.0.0:8000");
        assert!(!config.expose_error_details);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = ApiConfig {
            predict_timeout_ms: Some(0),
            ..ApiConfig::default()
        };
        assert!(matches!(config.validate(), Err(CoreError::Configuration(_))));
    }
}
