use crate::domain::entities::vector_entry::EntryMetadata;
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::{EmbeddingProvider, InputType};
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::entry_kind::EntryKind;
use std::sync::Arc;

pub struct IngestUseCase {
    embedder: Arc<dyn EmbeddingProvider>,
    store: Arc<dyn VectorStore>,
}

impl IngestUseCase {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Embed `text` and upsert it under `id` (a fresh UUID when none is given).
    pub async fn execute(
        &self,
        kind: EntryKind,
        id: Option<String>,
        text: String,
    ) -> Result<EntryMetadata, DomainError> {
        if text.trim().is_empty() {
            return Err(DomainError::InvalidInput("text must not be empty".into()));
        }
        let id = id.unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let metadata = EntryMetadata::new(id, text, kind.as_str())?;

        let vectors = self
            .embedder
            .embed(&[metadata.text.clone()], InputType::Document)
            .await?;
        let embedding = match vectors.into_iter().next() {
            Some(v) if !v.is_empty() => v,
            _ => {
                return Err(DomainError::Embedding(
                    "Embedding provider returned no vector".into(),
                ))
            }
        };

        self.store.add(&embedding, &metadata)?;
        tracing::info!(id = %metadata.id, kind = %kind, "ingested entry");
        Ok(metadata)
    }
}
