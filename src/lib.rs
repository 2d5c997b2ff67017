//! ChurnCast - customer churn prediction service
//!
//! A small web application over a complete train/predict cycle:
//!
//! - [`schema`] - the 18-field form contract and typed churn record
//! - [`preprocessing`] - scaling, label encoding, feature-matrix assembly
//! - [`model`] - logistic regression and evaluation metrics
//! - [`pipeline`] - the training and prediction pipelines and their artifact
//! - [`server`] - the axum web front end (home / train / predict)
//! - [`cli`] - serve, train, and predict from the terminal
//! - [`config`] - YAML configuration with environment overrides

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod preprocessing;
pub mod schema;
pub mod server;

pub use error::{ChurnError, Result};
