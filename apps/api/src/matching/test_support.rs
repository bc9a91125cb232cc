//! In-memory embedding provider and vector store for tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::embedding_client::{EmbeddingError, EmbeddingProvider};
use crate::models::job::JobPosting;
use crate::vector_store::{VectorStore, VectorStoreError};

pub fn job(id: &str, description: Option<&str>) -> JobPosting {
    JobPosting {
        id: id.to_string(),
        description: description.map(str::to_string),
        ..Default::default()
    }
}

/// Maps known texts to fixed vectors; anything containing "boom" fails,
/// unknown texts return `EmptyData`.
pub struct FakeProvider {
    vectors: HashMap<String, Vec<f32>>,
    pub calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(pairs: &[(&str, Vec<f32>)]) -> Self {
        Self {
            vectors: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl EmbeddingProvider for FakeProvider {
    async fn generate_embedding(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Vary latency so completion order differs from input order.
        tokio::time::sleep(Duration::from_millis(20 / (text.len() as u64 % 5 + 1))).await;
        if text.contains("boom") {
            return Err(EmbeddingError::Api {
                status: 500,
                message: "boom".to_string(),
            });
        }
        self.vectors
            .get(text)
            .cloned()
            .ok_or(EmbeddingError::EmptyData)
    }
}

#[derive(Default)]
pub struct FakeStore {
    stored: Mutex<HashMap<(String, String), Vec<f32>>>,
    fail: bool,
}

impl FakeStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn get(&self, namespace: &str, id: &str) -> Option<Vec<f32>> {
        self.stored
            .lock()
            .unwrap()
            .get(&(namespace.to_string(), id.to_string()))
            .cloned()
    }
}

#[async_trait]
impl VectorStore for FakeStore {
    async fn fetch(&self, namespace: &str, id: &str) -> Result<Option<Vec<f32>>, VectorStoreError> {
        if self.fail {
            return Err(VectorStoreError::Api {
                status: 401,
                message: "unauthorized".to_string(),
            });
        }
        Ok(self.get(namespace, id))
    }

    async fn upsert(&self, namespace: &str, id: &str, values: Vec<f32>) -> Result<(), VectorStoreError> {
        if self.fail {
            return Err(VectorStoreError::Api {
                status: 401,
                message: "unauthorized".to_string(),
            });
        }
        self.stored
            .lock()
            .unwrap()
            .insert((namespace.to_string(), id.to_string()), values);
        Ok(())
    }
}
