use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::embedding_client;
use crate::state::AppState;

/// GET /health
/// Returns service version and which semantic scorer is active.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobmatch",
        "semantic_mode": state.semantic_mode(),
        "embedding_model": embedding_client::MODEL,
        "vector_store": state.vector_store.is_some(),
    }))
}
