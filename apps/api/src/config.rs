use anyhow::{ensure, Context, Result};

use crate::embedding_client;

/// Application configuration loaded from environment variables.
///
/// Provider credentials are optional: without them the service runs with
/// keyword and mock semantic scoring only.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub pinecone_api_key: Option<String>,
    pub pinecone_index_host: Option<String>,
    /// Default blend weight of the semantic score, in [0, 1].
    pub semantic_weight: f64,
    /// Max in-flight embedding requests per ranking call.
    pub embedding_concurrency: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let semantic_weight = parse_or(&optional, "SEMANTIC_WEIGHT", 0.3_f64)?;
        ensure!(
            (0.0..=1.0).contains(&semantic_weight),
            "SEMANTIC_WEIGHT must be within [0, 1], got {semantic_weight}"
        );

        Ok(Config {
            openai_api_key: optional("OPENAI_API_KEY"),
            openai_base_url: optional("OPENAI_BASE_URL")
                .unwrap_or_else(|| embedding_client::DEFAULT_BASE_URL.to_string()),
            pinecone_api_key: optional("PINECONE_API_KEY"),
            pinecone_index_host: optional("PINECONE_INDEX_HOST"),
            semantic_weight,
            embedding_concurrency: parse_or(&optional, "EMBEDDING_CONCURRENCY", 4_usize)?.max(1),
            port: parse_or(&optional, "PORT", 8080_u16)?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_or<T>(optional: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        None => Ok(default),
    }
}
