use std::sync::Arc;
use tracing::{debug, instrument};

use crate::domain::{
    ports::{EmbeddingService, VectorStore},
    DomainError, RetrievedPassage,
};

/// Embeds a question and fetches its nearest slide-deck passages.
pub struct RetrievalService {
    embedding: Arc<dyn EmbeddingService>,
    vector_store: Arc<dyn VectorStore>,
}

impl RetrievalService {
    /// Passages fetched per question. Fixed; not configurable at call time.
    pub const TOP_K: usize = 5;

    pub fn new(embedding: Arc<dyn EmbeddingService>, vector_store: Arc<dyn VectorStore>) -> Self {
        Self {
            embedding,
            vector_store,
        }
    }

    /// Embedding failure is fatal to the turn; there is no retrieval fallback.
    #[instrument(skip(self, question))]
    pub async fn retrieve(&self, question: &str) -> Result<Vec<RetrievedPassage>, DomainError> {
        let embedding = self.embedding.embed(question).await?;
        let passages = self.vector_store.search(&embedding, Self::TOP_K).await?;

        for (i, passage) in passages.iter().enumerate() {
            debug!(rank = i + 1, score = passage.score, text = %passage.text, "Retrieved passage");
        }

        Ok(passages)
    }
}
