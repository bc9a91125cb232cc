//! Vector store: namespaced vector fetch/upsert over the Pinecone data-plane API.
//!
//! CV embeddings live in one namespace per user, keyed by CV id.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

const API_VERSION: &str = "2024-07";

#[derive(Debug, Error)]
pub enum VectorStoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Returns `Ok(None)` when no vector is stored under `id`.
    async fn fetch(&self, namespace: &str, id: &str) -> Result<Option<Vec<f32>>, VectorStoreError>;

    async fn upsert(&self, namespace: &str, id: &str, values: Vec<f32>) -> Result<(), VectorStoreError>;
}

/// Namespace holding every vector owned by a user.
pub fn cv_namespace(user_id: Uuid) -> String {
    format!("user-{user_id}")
}

#[derive(Debug, Deserialize)]
struct FetchResponse {
    #[serde(default)]
    vectors: HashMap<String, StoredVector>,
}

#[derive(Debug, Deserialize)]
struct StoredVector {
    #[serde(default)]
    values: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct UpsertRequest<'a> {
    vectors: Vec<UpsertVector<'a>>,
    namespace: &'a str,
}

#[derive(Debug, Serialize)]
struct UpsertVector<'a> {
    id: &'a str,
    values: Vec<f32>,
}

#[derive(Clone)]
pub struct PineconeClient {
    client: Client,
    api_key: String,
    index_host: String,
}

impl PineconeClient {
    pub fn new(api_key: String, index_host: String) -> Result<Self, VectorStoreError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(15))
                .build()?,
            api_key,
            index_host: normalize_host(&index_host),
        })
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, VectorStoreError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(VectorStoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl VectorStore for PineconeClient {
    async fn fetch(&self, namespace: &str, id: &str) -> Result<Option<Vec<f32>>, VectorStoreError> {
        let response = self
            .client
            .get(format!("{}/vectors/fetch", self.index_host))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .query(&[("ids", id), ("namespace", namespace)])
            .send()
            .await?;

        let body: FetchResponse = Self::check(response).await?.json().await?;
        debug!("Fetched {} vector(s) from namespace {namespace}", body.vectors.len());
        Ok(take_vector(body, id))
    }

    async fn upsert(&self, namespace: &str, id: &str, values: Vec<f32>) -> Result<(), VectorStoreError> {
        let request = UpsertRequest {
            vectors: vec![UpsertVector { id, values }],
            namespace,
        };

        let response = self
            .client
            .post(format!("{}/vectors/upsert", self.index_host))
            .header("Api-Key", &self.api_key)
            .header("X-Pinecone-API-Version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        Self::check(response).await?;
        debug!("Upserted vector {id} into namespace {namespace}");
        Ok(())
    }
}

/// Index hosts are often configured without a scheme.
fn normalize_host(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("https://{host}")
    }
}

/// An absent or empty vector both mean "nothing stored".
fn take_vector(mut body: FetchResponse, id: &str) -> Option<Vec<f32>> {
    body.vectors
        .remove(id)
        .map(|v| v.values)
        .filter(|values| !values.is_empty())
}
