//! Axum route handlers for the matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::comparison::{compare_skills, SkillComparison};
use crate::matching::extraction::extract_skills_from_description;
use crate::matching::ranking::{rank_jobs, RankRequest, RankingOutcome};
use crate::state::AppState;
use crate::vector_store::cv_namespace;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractSkillsRequest {
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ExtractSkillsResponse {
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareSkillsRequest {
    #[serde(default)]
    pub candidate_skills: Vec<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct IndexCvRequest {
    pub user_id: Uuid,
    pub cv_id: String,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct IndexCvResponse {
    pub namespace: String,
    pub cv_id: String,
    pub dimensions: usize,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills/extract
pub async fn handle_extract_skills(
    Json(request): Json<ExtractSkillsRequest>,
) -> Json<ExtractSkillsResponse> {
    Json(ExtractSkillsResponse {
        skills: extract_skills_from_description(request.description.as_deref()),
    })
}

/// POST /api/v1/skills/compare
pub async fn handle_compare_skills(
    Json(request): Json<CompareSkillsRequest>,
) -> Json<SkillComparison> {
    Json(compare_skills(
        &request.candidate_skills,
        &request.required_skills,
    ))
}

/// POST /api/v1/match/jobs
///
/// Ranks the supplied jobs for a candidate. Degrades to mock or keyword-only
/// scoring when the embedding provider or vector store is unavailable.
pub async fn handle_rank_jobs(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankingOutcome>, AppError> {
    if let Some(weight) = request.semantic_weight {
        if !(0.0..=1.0).contains(&weight) {
            return Err(AppError::Validation(format!(
                "semantic_weight must be within [0, 1], got {weight}"
            )));
        }
    }

    let outcome = rank_jobs(&request, state.config.semantic_weight, state.providers()).await;
    Ok(Json(outcome))
}

/// POST /api/v1/cv/embedding
///
/// Embeds CV text and stores it under the user's namespace so later
/// rankings can use it.
pub async fn handle_index_cv(
    State(state): State<AppState>,
    Json(request): Json<IndexCvRequest>,
) -> Result<Json<IndexCvResponse>, AppError> {
    if request.cv_id.trim().is_empty() {
        return Err(AppError::Validation("cv_id cannot be empty".to_string()));
    }
    if request.text.trim().is_empty() {
        return Err(AppError::Validation("text cannot be empty".to_string()));
    }

    let (Some(embedder), Some(store)) = (&state.embedder, &state.vector_store) else {
        return Err(AppError::ServiceUnavailable(
            "CV indexing requires both an embedding provider and a vector store".to_string(),
        ));
    };

    let embedding = embedder.generate_embedding(&request.text).await?;
    let dimensions = embedding.len();
    let namespace = cv_namespace(request.user_id);
    store.upsert(&namespace, &request.cv_id, embedding).await?;

    info!("Indexed cv {} ({dimensions} dims) in {namespace}", request.cv_id);

    Ok(Json(IndexCvResponse {
        namespace,
        cv_id: request.cv_id,
        dimensions,
    }))
}
