//! Training pipeline

use super::ModelArtifact;
use crate::config::AppConfig;
use crate::error::{ChurnError, Result};
use crate::model::{LogisticRegression, ModelMetrics};
use crate::preprocessing::ChurnPreprocessor;
use crate::schema::{FORM_FIELDS, TARGET_COLUMN};
use ndarray::Array1;
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::fs::File;
use std::path::Path;
use std::time::Instant;
use tracing::info;

const TEST_FRACTION: f64 = 0.2;
const SPLIT_SEED: u64 = 42;
const MIN_TRAINING_ROWS: usize = 10;

/// End-to-end training: load the configured CSV, split, preprocess, fit,
/// evaluate on the held-out split, and persist the artifact.
pub struct TrainPipeline {
    config: AppConfig,
}

impl TrainPipeline {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the full pipeline once, synchronously. Returns the held-out
    /// evaluation metrics of the model that was persisted.
    pub fn run_pipeline(&self) -> Result<ModelMetrics> {
        info!(data_path = %self.config.data_path, "Starting training pipeline");
        let start = Instant::now();

        let raw = self.load_dataset()?;
        let df = select_schema_columns(&raw)?;
        let mask = df
            .column(TARGET_COLUMN)?
            .as_materialized_series()
            .is_not_null();
        let df = df.filter(&mask)?;
        if df.height() < MIN_TRAINING_ROWS {
            return Err(ChurnError::Training(format!(
                "not enough rows to train: {} (minimum {MIN_TRAINING_ROWS})",
                df.height()
            )));
        }

        let (train_df, test_df) = train_test_split(&df, TEST_FRACTION, SPLIT_SEED)?;
        info!(
            train_rows = train_df.height(),
            test_rows = test_df.height(),
            "Split dataset"
        );

        let mut preprocessor = ChurnPreprocessor::new();
        let x_train = preprocessor.fit_transform(&train_df)?;
        let y_train = target_vector(&train_df)?;
        let x_test = preprocessor.transform(&test_df)?;
        let y_test = target_vector(&test_df)?;

        let mut model = LogisticRegression::new();
        model.fit(&x_train, &y_train)?;

        let y_pred = model.predict(&x_test)?;
        let mut metrics = ModelMetrics::compute_classification(&y_test, &y_pred);
        metrics.training_time_secs = start.elapsed().as_secs_f64();
        metrics.n_features = x_train.ncols();
        metrics.n_samples = x_train.nrows();

        std::fs::create_dir_all(&self.config.models_dir)?;
        let artifact = ModelArtifact {
            feature_names: preprocessor.feature_names(),
            preprocessor,
            model,
            metrics: metrics.clone(),
            trained_at: chrono::Utc::now(),
        };
        let model_path = self.config.model_path();
        artifact.save(&model_path)?;

        info!(
            model_path = %model_path.display(),
            accuracy = metrics.accuracy.unwrap_or(0.0),
            elapsed_secs = metrics.training_time_secs,
            "Training pipeline completed"
        );

        Ok(metrics)
    }

    fn load_dataset(&self) -> Result<DataFrame> {
        let path = Path::new(&self.config.data_path);
        if !path.exists() {
            return Err(ChurnError::Training(format!(
                "training data not found at {}",
                path.display()
            )));
        }

        let file = File::open(path)?;
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(100))
            .into_reader_with_file_handle(file)
            .finish()?;
        Ok(df)
    }
}

/// Narrow the dataset to the 18 feature columns plus the target, erroring
/// with the full list of whatever is missing.
fn select_schema_columns(df: &DataFrame) -> Result<DataFrame> {
    let available: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();

    let mut missing = Vec::new();
    for name in FORM_FIELDS.iter().chain(std::iter::once(&TARGET_COLUMN)) {
        if !available.contains(name) {
            missing.push(*name);
        }
    }
    if !missing.is_empty() {
        return Err(ChurnError::Data(format!(
            "dataset missing columns: {}",
            missing.join(", ")
        )));
    }

    let needed: Vec<&str> = FORM_FIELDS
        .iter()
        .chain(std::iter::once(&TARGET_COLUMN))
        .copied()
        .collect();
    df.select(needed).map_err(Into::into)
}

/// Shuffled train/test split with a fixed seed
pub fn train_test_split(
    df: &DataFrame,
    test_fraction: f64,
    seed: u64,
) -> Result<(DataFrame, DataFrame)> {
    let n_rows = df.height();
    if n_rows < 2 {
        return Err(ChurnError::Data(
            "need at least two rows to split".to_string(),
        ));
    }

    let mut indices: Vec<u32> = (0..n_rows as u32).collect();
    indices.shuffle(&mut StdRng::seed_from_u64(seed));

    let n_test = ((n_rows as f64 * test_fraction).round() as usize).clamp(1, n_rows - 1);
    let test_idx = IdxCa::from_vec("idx".into(), indices[..n_test].to_vec());
    let train_idx = IdxCa::from_vec("idx".into(), indices[n_test..].to_vec());

    Ok((df.take(&train_idx)?, df.take(&test_idx)?))
}

fn target_vector(df: &DataFrame) -> Result<Array1<f64>> {
    let series = df
        .column(TARGET_COLUMN)
        .map_err(|_| ChurnError::Data(format!("dataset missing column {TARGET_COLUMN}")))?
        .as_materialized_series()
        .cast(&DataType::Float64)
        .map_err(|e| ChurnError::Data(format!("target column is not numeric: {e}")))?;
    let ca = series.f64().map_err(|e| ChurnError::Data(e.to_string()))?;
    let values: Vec<f64> = ca.into_iter().map(|v| v.unwrap_or(0.0)).collect();
    Ok(Array1::from(values))
}
