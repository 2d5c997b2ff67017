//! Persisted model artifact

use crate::error::Result;
use crate::model::{LogisticRegression, ModelMetrics};
use crate::preprocessing::ChurnPreprocessor;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Everything needed to serve predictions: the fitted preprocessor, the
/// fitted model, and the evaluation metadata from the run that produced them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub preprocessor: ChurnPreprocessor,
    pub model: LogisticRegression,
    pub feature_names: Vec<String>,
    pub metrics: ModelMetrics,
    pub trained_at: chrono::DateTime<chrono::Utc>,
}

impl ModelArtifact {
    /// Write the artifact as pretty JSON
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load an artifact from a file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let artifact = serde_json::from_str(&json)?;
        Ok(artifact)
    }
}
