pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Skills API
        .route("/api/v1/skills/extract", post(handlers::handle_extract_skills))
        .route("/api/v1/skills/compare", post(handlers::handle_compare_skills))
        // Matching API
        .route("/api/v1/match/jobs", post(handlers::handle_rank_jobs))
        .route("/api/v1/cv/embedding", post(handlers::handle_index_cv))
        .with_state(state)
}
