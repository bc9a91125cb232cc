mod config;
mod embedding_client;
mod errors;
mod matching;
mod models;
mod routes;
mod state;
mod vector_store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::embedding_client::{EmbeddingProvider, OpenAiEmbeddingClient};
use crate::routes::build_router;
use crate::state::AppState;
use crate::vector_store::{PineconeClient, VectorStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values, not on missing providers)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch v{}", env!("CARGO_PKG_VERSION"));

    let embedder = build_embedder(&config)?;
    let vector_store = build_vector_store(&config)?;
    info!(
        "Semantic scoring: embedder={}, vector_store={}, default weight={}",
        embedder.is_some(),
        vector_store.is_some(),
        config.semantic_weight
    );

    let state = AppState {
        config: config.clone(),
        embedder,
        vector_store,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_embedder(config: &Config) -> Result<Option<Arc<dyn EmbeddingProvider>>> {
    let Some(api_key) = config.openai_api_key.clone() else {
        warn!("OPENAI_API_KEY not set; semantic scores fall back to keyword overlap");
        return Ok(None);
    };
    let client = OpenAiEmbeddingClient::new(api_key, config.openai_base_url.clone())?;
    info!("Embedding client initialized (model: {})", embedding_client::MODEL);
    Ok(Some(Arc::new(client)))
}

fn build_vector_store(config: &Config) -> Result<Option<Arc<dyn VectorStore>>> {
    match (&config.pinecone_api_key, &config.pinecone_index_host) {
        (Some(api_key), Some(host)) => {
            let client = PineconeClient::new(api_key.clone(), host.clone())?;
            info!("Vector store client initialized");
            Ok(Some(Arc::new(client)))
        }
        (None, None) => {
            warn!("Pinecone not configured; stored CV embeddings are unavailable");
            Ok(None)
        }
        _ => {
            warn!("Pinecone needs both PINECONE_API_KEY and PINECONE_INDEX_HOST; vector store disabled");
            Ok(None)
        }
    }
}
