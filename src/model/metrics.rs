//! Model evaluation metrics

use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Classification metrics computed on a held-out split
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: Option<f64>,
    /// Precision on the positive (churn) class
    pub precision: Option<f64>,
    /// Recall on the positive (churn) class
    pub recall: Option<f64>,
    pub f1_score: Option<f64>,
    /// Training time in seconds
    pub training_time_secs: f64,
    pub n_features: usize,
    pub n_samples: usize,
}

impl ModelMetrics {
    /// Compute classification metrics from 0/1 label vectors
    pub fn compute_classification(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Self {
        let mut metrics = Self {
            n_samples: y_true.len(),
            ..Self::default()
        };
        if y_true.is_empty() {
            return metrics;
        }

        let mut tp = 0usize;
        let mut fp = 0usize;
        let mut fn_ = 0usize;
        let mut correct = 0usize;

        for (truth, pred) in y_true.iter().zip(y_pred.iter()) {
            let truth = *truth >= 0.5;
            let pred = *pred >= 0.5;
            if truth == pred {
                correct += 1;
            }
            match (truth, pred) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => fn_ += 1,
                (false, false) => {}
            }
        }

        let accuracy = correct as f64 / y_true.len() as f64;
        let precision = if tp + fp > 0 {
            tp as f64 / (tp + fp) as f64
        } else {
            0.0
        };
        let recall = if tp + fn_ > 0 {
            tp as f64 / (tp + fn_) as f64
        } else {
            0.0
        };
        let f1 = if precision + recall > 0.0 {
            2.0 * precision * recall / (precision + recall)
        } else {
            0.0
        };

        metrics.accuracy = Some(accuracy);
        metrics.precision = Some(precision);
        metrics.recall = Some(recall);
        metrics.f1_score = Some(f1);
        metrics
    }
}
