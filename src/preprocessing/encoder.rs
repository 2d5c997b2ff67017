//! Categorical label encoding

use crate::error::{ChurnError, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label encoder for categorical string columns.
///
/// Categories are mapped to indices in first-seen order at fit time. Values
/// not seen during fitting (including nulls) map to a sentinel index one past
/// the known categories, so inference on novel values degrades instead of
/// erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encoder {
    // column name -> (category -> index)
    mappings: HashMap<String, HashMap<String, usize>>,
    is_fitted: bool,
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            mappings: HashMap::new(),
            is_fitted: false,
        }
    }

    /// Learn category mappings for the given columns. Columns must be strings.
    pub fn fit(&mut self, df: &DataFrame, columns: &[&str]) -> Result<&mut Self> {
        for col_name in columns {
            let column = df
                .column(col_name)
                .map_err(|_| ChurnError::FeatureNotFound(col_name.to_string()))?;
            let mapping = Self::build_mapping(column.as_materialized_series())?;
            self.mappings.insert(col_name.to_string(), mapping);
        }

        self.is_fitted = true;
        Ok(self)
    }

    /// Replace every fitted column present in the frame with its encoded
    /// Float64 counterpart.
    pub fn transform(&self, df: &DataFrame) -> Result<DataFrame> {
        if !self.is_fitted {
            return Err(ChurnError::ModelNotFitted);
        }

        let replacements: Vec<Series> = self
            .mappings
            .iter()
            .filter_map(|(col_name, mapping)| {
                df.column(col_name).ok().map(|column| {
                    Self::encode_series(column.as_materialized_series(), mapping)
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut result = df.clone();
        for encoded in replacements {
            result = result
                .with_column(encoded)
                .map_err(|e| ChurnError::Data(e.to_string()))?
                .clone();
        }

        Ok(result)
    }

    pub fn fit_transform(&mut self, df: &DataFrame, columns: &[&str]) -> Result<DataFrame> {
        self.fit(df, columns)?;
        self.transform(df)
    }

    /// Number of categories seen for a column at fit time
    pub fn cardinality(&self, column: &str) -> Option<usize> {
        self.mappings.get(column).map(HashMap::len)
    }

    fn build_mapping(series: &Series) -> Result<HashMap<String, usize>> {
        let ca = series
            .str()
            .map_err(|e| ChurnError::Data(e.to_string()))?;

        let mut mapping = HashMap::new();
        let mut idx = 0usize;
        for val in ca.into_iter().flatten() {
            if !mapping.contains_key(val) {
                mapping.insert(val.to_string(), idx);
                idx += 1;
            }
        }

        Ok(mapping)
    }

    fn encode_series(series: &Series, mapping: &HashMap<String, usize>) -> Result<Series> {
        let ca = series
            .str()
            .map_err(|e| ChurnError::Data(e.to_string()))?;

        // Unknowns and nulls land one index past the known categories
        let sentinel = mapping.len();
        let encoded: Float64Chunked = ca
            .into_iter()
            .map(|opt| {
                let idx = opt
                    .and_then(|v| mapping.get(v).copied())
                    .unwrap_or(sentinel);
                Some(idx as f64)
            })
            .collect();

        Ok(encoded.with_name(series.name().clone()).into_series())
    }
}
