use std::sync::Arc;

use crate::config::Config;
use crate::embedding_client::EmbeddingProvider;
use crate::matching::ranking::MatchProviders;
use crate::vector_store::VectorStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// None when OPENAI_API_KEY is unset; ranking falls back to mock scores.
    pub embedder: Option<Arc<dyn EmbeddingProvider>>,
    /// None when Pinecone is not configured; stored CV embeddings are skipped.
    pub vector_store: Option<Arc<dyn VectorStore>>,
}

impl AppState {
    pub fn providers(&self) -> MatchProviders<'_> {
        MatchProviders {
            embedder: self.embedder.as_deref(),
            vector_store: self.vector_store.as_deref(),
            concurrency: self.config.embedding_concurrency,
        }
    }

    /// Label reported by /health.
    pub fn semantic_mode(&self) -> &'static str {
        if self.embedder.is_some() {
            "embedding"
        } else {
            "mock"
        }
    }
}
