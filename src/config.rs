//! Application configuration
//!
//! Settings are read once at startup from a YAML file, with environment
//! variables taking precedence over file values. The loaded config is
//! immutable for the process lifetime and passed explicitly to whatever
//! needs it.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration for the service
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host address the HTTP server binds to
    pub app_host: String,
    /// Port the HTTP server binds to
    pub app_port: u16,
    /// Path to the training dataset (CSV)
    pub data_path: String,
    /// Directory where trained model artifacts are written
    pub models_dir: String,
    /// Directory of static assets served under /static
    pub static_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_host: "127.0.0.1".to_string(),
            app_port: 8000,
            data_path: "data/churn.csv".to_string(),
            models_dir: "models".to_string(),
            static_dir: "static".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults when the
    /// file is absent, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&raw)?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("APP_HOST") {
            self.app_host = host;
        }
        if let Ok(port) = std::env::var("APP_PORT") {
            if let Ok(port) = port.parse() {
                self.app_port = port;
            }
        }
        if let Ok(path) = std::env::var("DATA_PATH") {
            self.data_path = path;
        }
        if let Ok(dir) = std::env::var("MODELS_DIR") {
            self.models_dir = dir;
        }
        if let Ok(dir) = std::env::var("STATIC_DIR") {
            self.static_dir = dir;
        }
    }

    /// Path of the persisted model artifact
    pub fn model_path(&self) -> PathBuf {
        Path::new(&self.models_dir).join("churn_model.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.app_host, "127.0.0.1");
        assert_eq!(config.app_port, 8000);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config: AppConfig = serde_yaml::from_str("app_port: 9000\n").unwrap();
        assert_eq!(config.app_port, 9000);
        assert_eq!(config.app_host, "127.0.0.1");
        assert_eq!(config.models_dir, "models");
    }

    #[test]
    fn test_model_path_joins_models_dir() {
        let config = AppConfig {
            models_dir: "/tmp/churncast-models".to_string(),
            ..AppConfig::default()
        };
        assert_eq!(
            config.model_path(),
            PathBuf::from("/tmp/churncast-models/churn_model.json")
        );
    }
}
