use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::{ports::VectorStore, DomainError, Embedding, RetrievedPassage};

/// In-process cosine-similarity store. Stands in for the hosted index in
/// tests and local runs without a Qdrant instance.
pub struct InMemoryVectorStore {
    passages: RwLock<Vec<(String, Embedding)>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self {
            passages: RwLock::new(Vec::new()),
        }
    }

    pub fn insert(
        &self,
        text: impl Into<String>,
        embedding: Embedding,
    ) -> Result<(), DomainError> {
        let mut store = self
            .passages
            .write()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        store.push((text.into(), embedding));
        Ok(())
    }
}

impl Default for InMemoryVectorStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievedPassage>, DomainError> {
        let store = self
            .passages
            .read()
            .map_err(|e| DomainError::internal(e.to_string()))?;

        let mut results: Vec<RetrievedPassage> = store
            .iter()
            .map(|(text, embedding)| {
                RetrievedPassage::new(text.clone(), query.cosine_similarity(embedding))
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(results.into_iter().take(top_k).collect())
    }
}
