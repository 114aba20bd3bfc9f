use crate::domain::entities::vector_entry::ScoredEntry;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::entry_kind::EntryKind;
use crate::domain::values::similarity::{rank_top_k, QueryVector};
use std::sync::Arc;

pub struct MatchUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl MatchUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Embed free text and return the closest entries, optionally of one kind only.
    pub async fn execute(
        &self,
        query: &str,
        kind: Option<EntryKind>,
        top_k: usize,
    ) -> Result<Vec<ScoredEntry>, DomainError> {
        let vectors = self
            .embedder
            .embed(&[query.to_string()], InputType::Query)
            .await?;
        let Some(query_vec) = vectors.into_iter().next().filter(|v| !v.is_empty()) else {
            return Err(DomainError::Embedding(
                "Embedding provider returned no vector".into(),
            ));
        };
        if query_vec.len() != self.store.dimension() {
            return Err(DomainError::DimensionMismatch {
                expected: self.store.dimension(),
                actual: query_vec.len(),
            });
        }

        match kind {
            None => self.store.search(&query_vec, top_k),
            Some(kind) => {
                let q = QueryVector::new(&query_vec);
                let scored: Vec<_> = self
                    .store
                    .list(Some(kind.as_str()))?
                    .into_iter()
                    .map(|e| (q.similarity(&e.embedding), e.metadata))
                    .collect();
                Ok(rank_top_k(scored, top_k)
                    .into_iter()
                    .map(|(score, metadata)| ScoredEntry { score, metadata })
                    .collect())
            }
        }
    }
}
