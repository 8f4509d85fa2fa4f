use async_trait::async_trait;
use qdrant_client::qdrant::{
    CreateCollectionBuilder, Distance, SearchPointsBuilder, VectorParamsBuilder,
};
use qdrant_client::Qdrant;
use tracing::warn;

use crate::domain::{ports::VectorStore, DomainError, Embedding, RetrievedPassage};

/// Query adapter over the slide-deck collection. Passage text lives in the
/// point payload under a `text` field; points are indexed out of band.
pub struct QdrantVectorStore {
    client: Qdrant,
    collection: String,
}

impl QdrantVectorStore {
    pub async fn new(
        url: &str,
        api_key: Option<&str>,
        collection: &str,
        dimension: usize,
    ) -> Result<Self, DomainError> {
        let mut builder = Qdrant::from_url(url);
        if let Some(key) = api_key {
            builder = builder.api_key(key);
        }
        let client = builder
            .build()
            .map_err(|e| DomainError::external(e.to_string()))?;

        let store = Self {
            client,
            collection: collection.to_string(),
        };

        store.ensure_collection(dimension).await?;

        Ok(store)
    }

    async fn ensure_collection(&self, dimension: usize) -> Result<(), DomainError> {
        let collections = self
            .client
            .list_collections()
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        let exists = collections
            .collections
            .iter()
            .any(|c| c.name == self.collection);

        if !exists {
            warn!(
                collection = %self.collection,
                "Knowledge-base collection missing, creating empty collection"
            );
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(&self.collection).vectors_config(
                        VectorParamsBuilder::new(dimension as u64, Distance::Cosine),
                    ),
                )
                .await
                .map_err(|e| DomainError::external(e.to_string()))?;
        }

        Ok(())
    }
}

#[async_trait]
impl VectorStore for QdrantVectorStore {
    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievedPassage>, DomainError> {
        let results = self
            .client
            .search_points(
                SearchPointsBuilder::new(&self.collection, query.as_slice().to_vec(), top_k as u64)
                    .with_payload(true),
            )
            .await
            .map_err(|e| DomainError::external(e.to_string()))?;

        // A point whose payload lacks a text field still counts as a match,
        // with its text treated as empty.
        let passages = results
            .result
            .into_iter()
            .map(|point| {
                let text = point
                    .payload
                    .get("text")
                    .and_then(|v| v.as_str())
                    .cloned()
                    .unwrap_or_default();

                RetrievedPassage::new(text, point.score)
            })
            .collect();

        Ok(passages)
    }
}
