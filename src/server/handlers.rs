//! HTTP request handlers
//!
//! All three routes resolve to the same template and always return 200;
//! validation, training, and prediction failures are formatted into the
//! context message instead of an error status.

use super::templates::render_index;
use super::AppState;
use crate::error::Result;
use crate::pipeline::{ChurnPredictor, TrainPipeline};
use crate::schema::{ChurnRecord, RawForm};
use axum::extract::State;
use axum::response::Html;
use axum::Form;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

/// GET / : render the home page
pub async fn home() -> Html<String> {
    Html(render_index("Rendering"))
}

/// GET /train : run the training pipeline synchronously.
///
/// Executes on the blocking pool; the request waits for completion. Two
/// overlapping train requests race on the artifact file, last writer wins.
pub async fn train_model(State(state): State<Arc<AppState>>) -> Html<String> {
    let pipeline = TrainPipeline::new(state.config.clone());
    let outcome = tokio::task::spawn_blocking(move || pipeline.run_pipeline()).await;

    let message = match outcome {
        Ok(Ok(metrics)) => {
            info!(accuracy = metrics.accuracy.unwrap_or(0.0), "Training succeeded");
            format!(
                "Model training completed successfully! Held-out accuracy: {:.3}",
                metrics.accuracy.unwrap_or(0.0)
            )
        }
        Ok(Err(e)) => {
            error!(detail = %e, "Training failed");
            format!("Training failed: {e}")
        }
        Err(e) => {
            error!(detail = %e, "Training task panicked");
            format!("Training failed: {e}")
        }
    };

    Html(render_index(&message))
}

/// POST / : validate the submitted form and predict
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Form(form): Form<HashMap<String, String>>,
) -> Html<String> {
    let message = match run_prediction(&state, form) {
        Ok(label) => format!("Prediction: {label}"),
        Err(e) => {
            error!(detail = %e, "Prediction failed");
            format!("Error during prediction: {e}")
        }
    };

    Html(render_index(&message))
}

fn run_prediction(state: &AppState, form: HashMap<String, String>) -> Result<i64> {
    let record = ChurnRecord::from_form(&RawForm::new(form))?;
    let frame = record.to_dataframe()?;
    let predictor = ChurnPredictor::new(&state.config)?;
    predictor.predict(&frame)
}
