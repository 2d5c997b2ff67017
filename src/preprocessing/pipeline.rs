//! Combined preprocessing pipeline for the churn schema

use super::{Encoder, Scaler, ScalerType};
use crate::error::{ChurnError, Result};
use crate::schema::{CATEGORICAL_FIELDS, NUMERIC_FIELDS};
use ndarray::Array2;
use polars::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fitted preprocessing state for the churn feature schema.
///
/// Numeric columns are cast to Float64, nulls imputed with the training
/// median, then standard-scaled. Categorical columns are label encoded.
/// `transform` produces the feature matrix with a stable column order:
/// the 13 numeric columns followed by the 5 categorical columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChurnPreprocessor {
    numeric_columns: Vec<String>,
    categorical_columns: Vec<String>,
    scaler: Scaler,
    encoder: Encoder,
    // column name -> training median used for null imputation
    numeric_fill: HashMap<String, f64>,
    is_fitted: bool,
}

impl Default for ChurnPreprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl ChurnPreprocessor {
    pub fn new() -> Self {
        Self {
            numeric_columns: NUMERIC_FIELDS.iter().map(|s| s.to_string()).collect(),
            categorical_columns: CATEGORICAL_FIELDS.iter().map(|s| s.to_string()).collect(),
            scaler: Scaler::new(ScalerType::Standard),
            encoder: Encoder::new(),
            numeric_fill: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Fit imputation, scaling, and encoding state on a training frame.
    pub fn fit(&mut self, df: &DataFrame) -> Result<&mut Self> {
        self.numeric_fill.clear();
        let numeric_names = self.numeric_columns.clone();
        for name in &numeric_names {
            let series = Self::numeric_series(df, name)?;
            let median = series
                .f64()
                .map_err(|e| ChurnError::Data(e.to_string()))?
                .median()
                .unwrap_or(0.0);
            self.numeric_fill.insert(name.clone(), median);
        }

        let imputed = self.impute_numeric(df)?;
        let numeric_refs: Vec<&str> = self.numeric_columns.iter().map(String::as_str).collect();
        self.scaler.fit(&imputed, &numeric_refs)?;

        let categorical_refs: Vec<&str> =
            self.categorical_columns.iter().map(String::as_str).collect();
        self.encoder.fit(df, &categorical_refs)?;

        self.is_fitted = true;
        Ok(self)
    }

    /// Transform a frame into the model's feature matrix.
    ///
    /// Works identically for the full training frame and a single-row
    /// inference frame; every schema column must be present.
    pub fn transform(&self, df: &DataFrame) -> Result<Array2<f64>> {
        if !self.is_fitted {
            return Err(ChurnError::ModelNotFitted);
        }

        let imputed = self.impute_numeric(df)?;
        let scaled = self.scaler.transform(&imputed)?;
        let processed = self.encoder.transform(&scaled)?;

        let names = self.feature_names();
        let columns: Vec<Vec<f64>> = names
            .par_iter()
            .map(|name| {
                let column = processed
                    .column(name)
                    .map_err(|_| ChurnError::FeatureNotFound(name.clone()))?;
                let ca = column
                    .as_materialized_series()
                    .f64()
                    .map_err(|e| ChurnError::Data(e.to_string()))?;
                Ok(ca.into_iter().map(|v| v.unwrap_or(0.0)).collect())
            })
            .collect::<Result<Vec<_>>>()?;

        let n_rows = processed.height();
        let mut matrix = Array2::zeros((n_rows, names.len()));
        for (j, column) in columns.iter().enumerate() {
            for (i, value) in column.iter().enumerate() {
                matrix[[i, j]] = *value;
            }
        }

        Ok(matrix)
    }

    pub fn fit_transform(&mut self, df: &DataFrame) -> Result<Array2<f64>> {
        self.fit(df)?;
        self.transform(df)
    }

    /// Feature matrix column names, in output order
    pub fn feature_names(&self) -> Vec<String> {
        self.numeric_columns
            .iter()
            .chain(self.categorical_columns.iter())
            .cloned()
            .collect()
    }

    /// Cast every numeric column to Float64 and fill nulls with the training
    /// median (the column's own median during fit).
    fn impute_numeric(&self, df: &DataFrame) -> Result<DataFrame> {
        let mut result = df.clone();
        for name in &self.numeric_columns {
            let series = Self::numeric_series(df, name)?;
            let fill = self.numeric_fill.get(name).copied().unwrap_or(0.0);
            let ca = series
                .f64()
                .map_err(|e| ChurnError::Data(e.to_string()))?;
            let filled: Float64Chunked = ca
                .into_iter()
                .map(|opt| Some(opt.unwrap_or(fill)))
                .collect();
            result = result
                .with_column(filled.with_name(series.name().clone()).into_series())
                .map_err(|e| ChurnError::Data(e.to_string()))?
                .clone();
        }
        Ok(result)
    }

    fn numeric_series(df: &DataFrame, name: &str) -> Result<Series> {
        let column = df
            .column(name)
            .map_err(|_| ChurnError::FeatureNotFound(name.to_string()))?;
        column
            .as_materialized_series()
            .cast(&DataType::Float64)
            .map_err(|e| ChurnError::Data(format!("column {name} is not numeric: {e}")))
    }
}
