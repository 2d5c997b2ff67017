//! Prediction pipeline

use super::ModelArtifact;
use crate::config::AppConfig;
use crate::error::{ChurnError, Result};
use crate::model::ModelMetrics;
use polars::prelude::DataFrame;
use tracing::debug;

/// Inference over the persisted model artifact.
///
/// Constructed per request; the artifact is re-read from disk each time, and
/// a retrain is visible to the next prediction.
#[derive(Debug)]
pub struct ChurnPredictor {
    artifact: ModelArtifact,
}

impl ChurnPredictor {
    pub fn new(config: &AppConfig) -> Result<Self> {
        let path = config.model_path();
        if !path.exists() {
            return Err(ChurnError::Prediction(
                "no trained model found, run training first".to_string(),
            ));
        }
        let artifact = ModelArtifact::load(&path)?;
        debug!(model_path = %path.display(), trained_at = %artifact.trained_at, "Loaded model artifact");
        Ok(Self { artifact })
    }

    /// Predict the churn label for a single-row frame
    pub fn predict(&self, df: &DataFrame) -> Result<i64> {
        let labels = self.predict_batch(df)?;
        labels
            .first()
            .copied()
            .ok_or_else(|| ChurnError::Prediction("empty input".to_string()))
    }

    /// Predict churn labels for every row of a frame
    pub fn predict_batch(&self, df: &DataFrame) -> Result<Vec<i64>> {
        let features = self.artifact.preprocessor.transform(df)?;
        let labels = self.artifact.model.predict(&features)?;
        Ok(labels.iter().map(|v| *v as i64).collect())
    }

    /// Evaluation metrics of the run that produced the loaded model
    pub fn metrics(&self) -> &ModelMetrics {
        &self.artifact.metrics
    }
}
