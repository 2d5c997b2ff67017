//! Route definitions

use super::{handlers, AppState};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    let static_dir = state.config.static_dir.clone();

    let mut app = Router::new()
        .route("/", get(handlers::home).post(handlers::predict))
        .route("/train", get(handlers::train_model))
        .with_state(state);

    // Serve static assets when the directory exists
    let static_path = std::path::Path::new(&static_dir);
    if static_path.exists() {
        app = app.nest_service("/static", ServeDir::new(static_path));
    }

    // Allow-all CORS, matching a machine-local demo deployment
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
