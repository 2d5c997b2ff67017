//! Error types for ChurnCast

use thiserror::Error;

/// Result type alias for ChurnCast operations
pub type Result<T> = std::result::Result<T, ChurnError>;

/// Main error type for the ChurnCast service
#[derive(Error, Debug)]
pub enum ChurnError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Training error: {0}")]
    Training(String),

    #[error("Prediction error: {0}")]
    Prediction(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Model not fitted")]
    ModelNotFitted,

    #[error("Feature not found: {0}")]
    FeatureNotFound(String),

    #[error("Invalid shape: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },
}

impl From<polars::error::PolarsError> for ChurnError {
    fn from(err: polars::error::PolarsError) -> Self {
        ChurnError::Data(err.to_string())
    }
}

impl From<serde_json::Error> for ChurnError {
    fn from(err: serde_json::Error) -> Self {
        ChurnError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for ChurnError {
    fn from(err: serde_yaml::Error) -> Self {
        ChurnError::Config(err.to_string())
    }
}

impl From<ndarray::ShapeError> for ChurnError {
    fn from(err: ndarray::ShapeError) -> Self {
        ChurnError::Shape {
            expected: "valid shape".to_string(),
            actual: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ChurnError::Validation("missing field Tenure".to_string());
        assert_eq!(err.to_string(), "Validation error: missing field Tenure");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ChurnError = io_err.into();
        assert!(matches!(err, ChurnError::Io(_)));
    }

    #[test]
    fn test_training_error_text_is_preserved() {
        let err = ChurnError::Training("dataset missing column Churn".to_string());
        assert!(err.to_string().contains("dataset missing column Churn"));
    }
}
