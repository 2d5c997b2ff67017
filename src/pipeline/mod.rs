//! Training and prediction pipelines
//!
//! [`TrainPipeline`] runs the full train cycle (load, split, preprocess, fit,
//! evaluate, persist) and [`ChurnPredictor`] reloads the persisted artifact
//! for inference. Each is constructed per invocation; the only shared state
//! between them is the artifact file on disk.

mod artifact;
mod prediction;
mod training;

pub use artifact::ModelArtifact;
pub use prediction::ChurnPredictor;
pub use training::{train_test_split, TrainPipeline};
