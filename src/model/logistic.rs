//! Logistic regression classifier

use crate::error::{ChurnError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Binary logistic regression fitted with batch gradient descent and L2
/// regularization. Labels are 0.0 / 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegression {
    weights: Option<Array1<f64>>,
    bias: Option<f64>,
    /// L2 regularization strength
    alpha: f64,
    /// Gradient descent step size
    learning_rate: f64,
    max_iter: usize,
    /// Convergence tolerance on the gradient norm
    tol: f64,
    is_fitted: bool,
}

impl Default for LogisticRegression {
    fn default() -> Self {
        Self::new()
    }
}

impl LogisticRegression {
    pub fn new() -> Self {
        Self {
            weights: None,
            bias: None,
            alpha: 0.01,
            learning_rate: 0.1,
            max_iter: 2000,
            tol: 1e-6,
            is_fitted: false,
        }
    }

    /// Set regularization strength
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Set maximum iterations
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set learning rate
    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    fn sigmoid(z: &Array1<f64>) -> Array1<f64> {
        z.mapv(|v| 1.0 / (1.0 + (-v).exp()))
    }

    /// Fit the model. `y` must hold 0/1 labels of the same length as `x` rows.
    pub fn fit(&mut self, x: &Array2<f64>, y: &Array1<f64>) -> Result<&mut Self> {
        let n_samples = x.nrows();
        let n_features = x.ncols();

        if n_samples == 0 {
            return Err(ChurnError::Training("empty training set".to_string()));
        }
        if n_samples != y.len() {
            return Err(ChurnError::Shape {
                expected: format!("y length = {n_samples}"),
                actual: format!("y length = {}", y.len()),
            });
        }

        let mut weights = Array1::zeros(n_features);
        let mut bias = 0.0;

        for _ in 0..self.max_iter {
            let linear = x.dot(&weights) + bias;
            let predictions = Self::sigmoid(&linear);

            let errors = &predictions - y;
            let dw = (x.t().dot(&errors) / n_samples as f64) + (self.alpha * &weights);
            let db = errors.mean().unwrap_or(0.0);

            let grad_norm = (dw.mapv(|v| v * v).sum() + db * db).sqrt();
            if grad_norm < self.tol {
                break;
            }

            weights = weights - self.learning_rate * dw;
            bias -= self.learning_rate * db;
        }

        self.weights = Some(weights);
        self.bias = Some(bias);
        self.is_fitted = true;

        Ok(self)
    }

    /// Predicted probability of the positive class per row
    pub fn predict_proba(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let weights = self
            .weights
            .as_ref()
            .filter(|_| self.is_fitted)
            .ok_or(ChurnError::ModelNotFitted)?;

        if x.ncols() != weights.len() {
            return Err(ChurnError::Shape {
                expected: format!("{} features", weights.len()),
                actual: format!("{} features", x.ncols()),
            });
        }

        let linear = x.dot(weights) + self.bias.unwrap_or(0.0);
        Ok(Self::sigmoid(&linear))
    }

    /// Predicted 0/1 labels at threshold 0.5
    pub fn predict(&self, x: &Array2<f64>) -> Result<Array1<f64>> {
        let probabilities = self.predict_proba(x)?;
        Ok(probabilities.mapv(|p| if p >= 0.5 { 1.0 } else { 0.0 }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_fit_separable_data() {
        // One feature, threshold at 0: negatives below, positives above
        let x = array![[-2.0], [-1.5], [-1.0], [-0.5], [0.5], [1.0], [1.5], [2.0]];
        let y = array![0.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0];

        let mut model = LogisticRegression::new().with_max_iter(5000);
        model.fit(&x, &y).unwrap();

        let predictions = model.predict(&x).unwrap();
        assert_eq!(predictions, y);
    }

    #[test]
    fn test_predict_before_fit_fails() {
        let model = LogisticRegression::new();
        let x = array![[1.0]];
        assert!(matches!(
            model.predict(&x),
            Err(ChurnError::ModelNotFitted)
        ));
    }

    #[test]
    fn test_feature_count_mismatch_fails() {
        let x = array![[0.0, 1.0], [1.0, 0.0]];
        let y = array![0.0, 1.0];
        let mut model = LogisticRegression::new();
        model.fit(&x, &y).unwrap();

        let bad = array![[1.0]];
        assert!(matches!(model.predict(&bad), Err(ChurnError::Shape { .. })));
    }

    #[test]
    fn test_label_length_mismatch_fails() {
        let x = array![[1.0], [2.0]];
        let y = array![0.0];
        let mut model = LogisticRegression::new();
        assert!(matches!(model.fit(&x, &y), Err(ChurnError::Shape { .. })));
    }

    #[test]
    fn test_serde_round_trip() {
        let x = array![[-1.0], [1.0]];
        let y = array![0.0, 1.0];
        let mut model = LogisticRegression::new();
        model.fit(&x, &y).unwrap();

        let json = serde_json::to_string(&model).unwrap();
        let restored: LogisticRegression = serde_json::from_str(&json).unwrap();

        let probe = array![[0.7]];
        assert_eq!(
            model.predict_proba(&probe).unwrap(),
            restored.predict_proba(&probe).unwrap()
        );
    }
}
