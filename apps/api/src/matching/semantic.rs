//! Semantic scoring: embedding-backed cosine similarity, plus a keyword-overlap
//! mock used when no embedding provider is available.
//!
//! Nothing here returns an error: provider and store failures are logged and
//! degrade to `None` or a 0.0 score for the affected job only.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::embedding_client::EmbeddingProvider;
use crate::matching::similarity::cosine_similarity;
use crate::models::job::JobPosting;
use crate::vector_store::{cv_namespace, VectorStore};

/// Semantic similarity of one job, in [0, 1] for non-degenerate input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SemanticScore {
    pub id: String,
    pub score: f64,
}

// ────────────────────────────────────────────────────────────────────────────
// Mock scorer
// ────────────────────────────────────────────────────────────────────────────

/// Lowercased whitespace-separated words longer than two characters.
fn word_set(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() > 2)
        .collect()
}

/// Share of the query's words that also appear in each job description.
pub fn mock_semantic_scores(jobs: &[JobPosting], query: &str) -> Vec<SemanticScore> {
    let query_words = word_set(query);

    jobs.iter()
        .map(|job| {
            let score = match job.description_text() {
                Some(description) if !query_words.is_empty() => {
                    let description_words = word_set(description);
                    let overlap = query_words.intersection(&description_words).count();
                    overlap as f64 / query_words.len() as f64
                }
                _ => 0.0,
            };
            SemanticScore {
                id: job.id.clone(),
                score,
            }
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Embedding-backed scorer
// ────────────────────────────────────────────────────────────────────────────

/// Embeds a search query. `None` means semantic scoring is unavailable.
/// A blank query returns `None` without calling the provider.
pub async fn embed_search_query(provider: &dyn EmbeddingProvider, query: &str) -> Option<Vec<f32>> {
    if query.trim().is_empty() {
        return None;
    }
    match provider.generate_embedding(query).await {
        Ok(embedding) => Some(embedding),
        Err(e) => {
            warn!("Search query embedding failed: {e}");
            None
        }
    }
}

/// Fetches the stored embedding of a CV from the user's namespace.
/// A missing store, a store error and an absent vector all yield `None`.
pub async fn get_cv_embedding(
    store: Option<&dyn VectorStore>,
    user_id: Uuid,
    cv_id: &str,
) -> Option<Vec<f32>> {
    let Some(store) = store else {
        debug!("Vector store not configured; skipping CV embedding lookup");
        return None;
    };

    match store.fetch(&cv_namespace(user_id), cv_id).await {
        Ok(Some(values)) if !values.is_empty() => Some(values),
        Ok(_) => {
            debug!("No stored embedding for cv {cv_id}");
            None
        }
        Err(e) => {
            warn!("CV embedding lookup failed for cv {cv_id}: {e}");
            None
        }
    }
}

/// Scores every job against `cv_embedding`, one result per job in input order.
///
/// Empty descriptions score 0.0 without a provider call. Up to `concurrency`
/// embedding requests are in flight at once.
pub async fn compute_semantic_scores(
    provider: &dyn EmbeddingProvider,
    cv_embedding: &[f32],
    jobs: &[JobPosting],
    concurrency: usize,
) -> Vec<SemanticScore> {
    // Futures are built up front so the stream does not hold a closure over
    // borrowed jobs; that keeps the handler future `Send`.
    let pending: Vec<_> = jobs
        .iter()
        .map(|job| score_job(provider, cv_embedding, job))
        .collect();

    stream::iter(pending)
        .buffered(concurrency.max(1))
        .collect()
        .await
}

async fn score_job(
    provider: &dyn EmbeddingProvider,
    cv_embedding: &[f32],
    job: &JobPosting,
) -> SemanticScore {
    let score = match job.description_text() {
        None => 0.0,
        Some(description) => match provider.generate_embedding(description).await {
            Ok(job_embedding) => cosine_similarity(cv_embedding, &job_embedding),
            Err(e) => {
                warn!("Embedding failed for job {}: {e}", job.id);
                0.0
            }
        },
    };
    SemanticScore {
        id: job.id.clone(),
        score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::test_support::{job, FakeProvider, FakeStore};
    use futures::future::{BoxFuture, FutureExt};
    use std::sync::atomic::Ordering;

    #[test]
    fn test_mock_empty_query_scores_zero() {
        let jobs = vec![job("j1", Some("rust engineer")), job("j2", Some("python dev"))];
        let scores = mock_semantic_scores(&jobs, "");
        assert_eq!(scores.len(), 2);
        assert!(scores.iter().all(|s| s.score == 0.0));
    }

    #[test]
    fn test_mock_empty_description_scores_zero() {
        let scores = mock_semantic_scores(&[job("j1", Some(""))], "react");
        assert_eq!(
            scores,
            vec![SemanticScore {
                id: "j1".to_string(),
                score: 0.0
            }]
        );
    }

    #[test]
    fn test_mock_overlap_fraction() {
        let jobs = vec![
            job("j1", Some("Senior Rust engineer for distributed systems")),
            job("j2", Some("Marketing manager")),
            job("j3", None),
        ];
        // Query words longer than two chars: rust, distributed, kubernetes, job.
        let scores = mock_semantic_scores(&jobs, "Rust distributed Kubernetes at my job");
        let ids: Vec<&str> = scores.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["j1", "j2", "j3"]);
        assert!((scores[0].score - 0.5).abs() < 1e-9);
        assert_eq!(scores[1].score, 0.0);
        assert_eq!(scores[2].score, 0.0);
    }

    #[test]
    fn test_mock_short_words_are_ignored() {
        let scores = mock_semantic_scores(&[job("j1", Some("go to it"))], "go to it");
        assert_eq!(scores[0].score, 0.0);
    }

    #[tokio::test]
    async fn test_embed_search_query_success_and_failure() {
        let provider = FakeProvider::new(&[("rust jobs", vec![1.0, 0.0])]);
        assert_eq!(
            embed_search_query(&provider, "rust jobs").await,
            Some(vec![1.0, 0.0])
        );
        assert_eq!(embed_search_query(&provider, "boom").await, None);
        assert_eq!(embed_search_query(&provider, "   ").await, None);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_get_cv_embedding_paths() {
        let user = Uuid::new_v4();
        let store = FakeStore::default();
        store
            .upsert(&cv_namespace(user), "cv-1", vec![0.5, 0.5])
            .await
            .unwrap();

        assert_eq!(
            get_cv_embedding(Some(&store), user, "cv-1").await,
            Some(vec![0.5, 0.5])
        );
        assert_eq!(get_cv_embedding(Some(&store), user, "cv-2").await, None);
        // Same cv id under another user's namespace is not visible.
        assert_eq!(
            get_cv_embedding(Some(&store), Uuid::new_v4(), "cv-1").await,
            None
        );
        assert_eq!(get_cv_embedding(None, user, "cv-1").await, None);

        let failing = FakeStore::failing();
        assert_eq!(get_cv_embedding(Some(&failing), user, "cv-1").await, None);
    }

    #[tokio::test]
    async fn test_compute_semantic_scores_isolates_failures_and_keeps_order() {
        let provider = FakeProvider::new(&[
            ("rust backend", vec![1.0, 0.0]),
            ("design work", vec![0.0, 1.0]),
            ("half and half", vec![1.0, 1.0]),
        ]);
        let jobs = vec![
            job("a", Some("rust backend")),
            job("b", Some("boom")),
            job("c", Some("")),
            job("d", Some("design work")),
            job("e", Some("half and half")),
            job("f", None),
        ];

        let scores = compute_semantic_scores(&provider, &[1.0, 0.0], &jobs, 3).await;

        let ids: Vec<&str> = scores.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c", "d", "e", "f"]);
        assert!((scores[0].score - 1.0).abs() < 1e-9);
        assert_eq!(scores[1].score, 0.0);
        assert_eq!(scores[2].score, 0.0);
        assert!(scores[3].score.abs() < 1e-9);
        assert!((scores[4].score - std::f64::consts::FRAC_1_SQRT_2).abs() < 1e-6);
        assert_eq!(scores[5].score, 0.0);
        // Empty and absent descriptions never reach the provider.
        assert_eq!(provider.calls.load(Ordering::SeqCst), 4);
    }

    fn boxed_scores<'a>(
        provider: &'a dyn EmbeddingProvider,
        cv_embedding: &'a [f32],
        jobs: &'a [JobPosting],
    ) -> BoxFuture<'a, Vec<SemanticScore>> {
        compute_semantic_scores(provider, cv_embedding, jobs, 2).boxed()
    }

    #[tokio::test]
    async fn test_compute_semantic_scores_future_is_send_for_any_borrow() {
        let provider = FakeProvider::new(&[
            ("rust backend", vec![1.0, 0.0]),
            ("design work", vec![0.0, 1.0]),
        ]);
        let jobs = vec![
            job("a", Some("rust backend")),
            job("b", Some("boom")),
            job("c", Some("design work")),
        ];

        let scores = boxed_scores(&provider, &[1.0, 0.0], &jobs).await;

        let ids: Vec<&str> = scores.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!((scores[0].score - 1.0).abs() < 1e-9);
        assert_eq!(scores[1].score, 0.0);
        assert!(scores[2].score.abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_embed_search_query_blank_skips_provider() {
        let provider = FakeProvider::new(&[]);
        assert_eq!(embed_search_query(&provider, "").await, None);
        assert_eq!(embed_search_query(&provider, " \t\n").await, None);
        assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_compute_semantic_scores_zero_concurrency_still_runs() {
        let provider = FakeProvider::new(&[("rust backend", vec![1.0, 0.0])]);
        let jobs = vec![job("a", Some("rust backend"))];
        let scores = compute_semantic_scores(&provider, &[1.0, 0.0], &jobs, 0).await;
        assert_eq!(scores.len(), 1);
        assert!((scores[0].score - 1.0).abs() < 1e-9);
    }
}
