use crate::domain::{errors::DomainError, Embedding, RetrievedPassage};
use async_trait::async_trait;

/// Similarity search over the fixed slide-deck index. The knowledge base is
/// indexed out of band; this port is query-only.
#[async_trait]
pub trait VectorStore: Send + Sync {
    async fn search(
        &self,
        query: &Embedding,
        top_k: usize,
    ) -> Result<Vec<RetrievedPassage>, DomainError>;
}
