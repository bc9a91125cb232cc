//! Job ranking: skill comparison per job, a semantic signal from the best
//! available source, blended into one final score.
//!
//! Semantic source preference:
//! 1. stored CV embedding (needs provider, store, user_id and cv_id)
//! 2. embedded search query (needs provider and a query)
//! 3. keyword-overlap mock on the query
//! 4. none: keyword score only
//!
//! Any failure along the way falls through to the next source.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::embedding_client::EmbeddingProvider;
use crate::matching::comparison::{compare_skills, SkillComparison};
use crate::matching::extraction::extract_skills_from_description;
use crate::matching::gap_analysis::GapAnalysis;
use crate::matching::semantic::{
    compute_semantic_scores, embed_search_query, get_cv_embedding, mock_semantic_scores,
    SemanticScore,
};
use crate::matching::similarity::blend_scores;
use crate::models::job::JobPosting;
use crate::vector_store::VectorStore;

#[derive(Debug, Clone, Deserialize)]
pub struct RankRequest {
    #[serde(default)]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub cv_id: Option<String>,
    #[serde(default)]
    pub candidate_skills: Vec<String>,
    #[serde(default)]
    pub query: Option<String>,
    pub jobs: Vec<JobPosting>,
    /// Overrides the configured blend weight. Must be within [0, 1].
    #[serde(default)]
    pub semantic_weight: Option<f64>,
}

/// Where the semantic half of the final score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SemanticSource {
    CvEmbedding,
    QueryEmbedding,
    Mock,
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedJob {
    pub job_id: String,
    pub title: Option<String>,
    pub keyword_score: u32,   // 0 – 100
    pub semantic_score: f64,  // 0.0 – 1.0
    pub final_score: f64,     // 0.0 – 100.0 for weights in [0, 1]
    pub skills: SkillComparison,
    pub gap_analysis: GapAnalysis,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingOutcome {
    pub results: Vec<RankedJob>,
    pub semantic_source: SemanticSource,
    pub semantic_weight: f64,
}

/// External collaborators available to the ranking pipeline.
#[derive(Clone, Copy)]
pub struct MatchProviders<'a> {
    pub embedder: Option<&'a dyn EmbeddingProvider>,
    pub vector_store: Option<&'a dyn VectorStore>,
    pub concurrency: usize,
}

/// Skills a job requires: its gap analysis, then its explicit list, then
/// whatever the description prefilter finds.
pub fn required_skills_for(job: &JobPosting) -> Vec<String> {
    if let Some(gap) = &job.gap_analysis {
        if !gap.required_skills.is_empty() {
            return gap.required_skills.clone();
        }
    }
    if !job.required_skills.is_empty() {
        return job.required_skills.clone();
    }
    extract_skills_from_description(job.description.as_deref())
}

pub async fn rank_jobs(
    request: &RankRequest,
    default_weight: f64,
    providers: MatchProviders<'_>,
) -> RankingOutcome {
    let (semantic_source, semantic_scores) = score_semantics(request, providers).await;

    let semantic_weight = match semantic_source {
        SemanticSource::None => 0.0,
        _ => request.semantic_weight.unwrap_or(default_weight),
    };

    let mut results: Vec<RankedJob> = request
        .jobs
        .iter()
        .enumerate()
        .map(|(i, job)| {
            let required = required_skills_for(job);
            let skills = compare_skills(&request.candidate_skills, &required);
            let semantic_score = semantic_scores.get(i).map(|s| s.score).unwrap_or(0.0);
            let final_score = blend_scores(
                skills.match_percentage as f64,
                semantic_score * 100.0,
                semantic_weight,
            );
            let nice_to_have = job
                .gap_analysis
                .as_ref()
                .map(|g| g.nice_to_have_skills.clone())
                .unwrap_or_default();

            RankedJob {
                job_id: job.id.clone(),
                title: job.title.clone(),
                keyword_score: skills.match_percentage,
                semantic_score,
                final_score,
                gap_analysis: GapAnalysis::from_comparison(&required, &skills, nice_to_have),
                skills,
            }
        })
        .collect();

    // Stable: equal scores keep input order.
    results.sort_by(|a, b| b.final_score.total_cmp(&a.final_score));

    info!(
        "Ranked {} jobs (semantic source: {:?}, weight: {})",
        results.len(),
        semantic_source,
        semantic_weight
    );

    RankingOutcome {
        results,
        semantic_source,
        semantic_weight,
    }
}

async fn score_semantics(
    request: &RankRequest,
    providers: MatchProviders<'_>,
) -> (SemanticSource, Vec<SemanticScore>) {
    let query = request
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty());

    if let Some(embedder) = providers.embedder {
        if let (Some(user_id), Some(cv_id)) = (request.user_id, request.cv_id.as_deref()) {
            if let Some(cv_embedding) =
                get_cv_embedding(providers.vector_store, user_id, cv_id).await
            {
                let scores = compute_semantic_scores(
                    embedder,
                    &cv_embedding,
                    &request.jobs,
                    providers.concurrency,
                )
                .await;
                return (SemanticSource::CvEmbedding, scores);
            }
        }

        if let Some(query) = query {
            if let Some(query_embedding) = embed_search_query(embedder, query).await {
                let scores = compute_semantic_scores(
                    embedder,
                    &query_embedding,
                    &request.jobs,
                    providers.concurrency,
                )
                .await;
                return (SemanticSource::QueryEmbedding, scores);
            }
        }
    }

    match query {
        Some(query) => {
            debug!("Falling back to mock semantic scores");
            (SemanticSource::Mock, mock_semantic_scores(&request.jobs, query))
        }
        None => (SemanticSource::None, Vec::new()),
    }
}
