//! Feature preprocessing
//!
//! Scaling for numeric columns, label encoding for categorical columns, and
//! the [`ChurnPreprocessor`] that combines both into the feature matrix the
//! model consumes. All fitted state is serializable so it can travel inside
//! the persisted model artifact.

mod encoder;
mod pipeline;
mod scaler;

pub use encoder::Encoder;
pub use pipeline::ChurnPreprocessor;
pub use scaler::{Scaler, ScalerType};
