pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/analyzeJobFit", post(handlers::handle_analyze_job_fit))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
