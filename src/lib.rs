pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

use crate::application::ingest::IngestUseCase;
use crate::application::matching::MatchUseCase;
use crate::application::select_candidates::{SelectCandidatesUseCase, SelectionReport};
use crate::application::stats::{StatsUseCase, StoreStats};
use crate::config::{Config, EmbedderKind};
use crate::domain::entities::vector_entry::{EntryMetadata, ScoredEntry, VectorEntry};
use crate::domain::error::DomainError;
use crate::domain::ports::embedding_port::EmbeddingProvider;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::entry_kind::EntryKind;
use crate::infrastructure::embeddings::hashing::HashingProvider;
use crate::infrastructure::embeddings::noop::NoopProvider;
use crate::infrastructure::embeddings::openai::OpenAiProvider;
use crate::infrastructure::sqlite::vector_store::SqliteVectorStore;
use std::sync::Arc;

/// Handle to one vector store plus the use cases built on it. Construct once
/// at startup and share (it is `Send + Sync`).
pub struct ResuMatch {
    store: Arc<SqliteVectorStore>,
    ingest_uc: IngestUseCase,
    match_uc: MatchUseCase,
    select_uc: SelectCandidatesUseCase,
    stats_uc: StatsUseCase,
}

impl ResuMatch {
    pub fn open(config: &Config) -> Result<Self, DomainError> {
        let embedder: Arc<dyn EmbeddingProvider> = match config.embedder {
            EmbedderKind::Hashing => Arc::new(HashingProvider::new(config.dim)),
            EmbedderKind::OpenAi => Arc::new(OpenAiProvider::new(
                config.api_key.clone(),
                config.model.clone(),
                config.base_url.clone(),
                config.embedding_dim,
            )),
            EmbedderKind::Noop => Arc::new(NoopProvider),
        };

        Self::with_providers(&config.db, config.dim, embedder)
    }

    pub fn with_providers(
        db_path: &str,
        dim: usize,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Result<Self, DomainError> {
        let provider_dim = embedder.dimension();
        if provider_dim > 0 && provider_dim != dim {
            return Err(DomainError::InvalidInput(format!(
                "Embedding provider produces {provider_dim}-dimensional vectors but the store is configured for {dim}"
            )));
        }

        let store = Arc::new(SqliteVectorStore::open(db_path, dim)?);
        let dyn_store: Arc<dyn VectorStore> = store.clone();
        tracing::debug!(db = %db_path, dim, "opened vector store");

        Ok(Self {
            ingest_uc: IngestUseCase::new(embedder.clone(), dyn_store.clone()),
            match_uc: MatchUseCase::new(embedder, dyn_store.clone()),
            select_uc: SelectCandidatesUseCase::new(dyn_store.clone()),
            stats_uc: StatsUseCase::new(dyn_store),
            store,
        })
    }

    pub fn store(&self) -> Arc<dyn VectorStore> {
        self.store.clone()
    }

    // Delegating methods
    pub fn add(&self, embedding: &[f32], metadata: &EntryMetadata) -> Result<(), DomainError> {
        self.store.add(embedding, metadata)
    }

    pub fn update(&self, id: &str, embedding: &[f32], metadata: &EntryMetadata) -> Result<(), DomainError> {
        self.store.update(id, embedding, metadata)
    }

    pub fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        self.store.delete_by_id(id)
    }

    pub fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<ScoredEntry>, DomainError> {
        self.store.search(query, top_k)
    }

    pub fn get(&self, id: &str) -> Result<Option<VectorEntry>, DomainError> {
        self.store.get(id)
    }

    pub fn list(&self, entry_type: Option<&str>) -> Result<Vec<VectorEntry>, DomainError> {
        self.store.list(entry_type)
    }

    pub async fn ingest(
        &self,
        kind: EntryKind,
        id: Option<String>,
        text: String,
    ) -> Result<EntryMetadata, DomainError> {
        self.ingest_uc.execute(kind, id, text).await
    }

    pub async fn match_text(
        &self,
        query: &str,
        kind: Option<EntryKind>,
        top_k: usize,
    ) -> Result<Vec<ScoredEntry>, DomainError> {
        self.match_uc.execute(query, kind, top_k).await
    }

    pub fn select_candidates(
        &self,
        job_id: &str,
        max_candidates: usize,
        threshold: f64,
    ) -> Result<SelectionReport, DomainError> {
        self.select_uc.execute(job_id, max_candidates, threshold)
    }

    pub fn select_all_candidates(
        &self,
        max_candidates: usize,
        threshold: f64,
    ) -> Result<Vec<SelectionReport>, DomainError> {
        self.select_uc.execute_all(max_candidates, threshold)
    }

    pub fn stats(&self) -> Result<StoreStats, DomainError> {
        self.stats_uc.stats()
    }

    pub fn skipped_rows(&self) -> u64 {
        self.store.skipped_rows()
    }
}
