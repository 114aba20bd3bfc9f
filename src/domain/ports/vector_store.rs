use crate::domain::entities::vector_entry::{EntryMetadata, ScoredEntry, VectorEntry};
use crate::domain::error::DomainError;

pub const DEFAULT_TOP_K: usize = 5;

/// Durable id → (embedding, metadata) index with top-k cosine search.
///
/// Implementations must make every mutation atomic and durable before
/// returning. The current backend scans every row on `search`; an approximate
/// index can sit behind this same trait.
pub trait VectorStore: Send + Sync {
    /// Embedding width every stored vector must have.
    fn dimension(&self) -> usize;

    /// Insert, or fully replace the entry with the same id.
    fn add(&self, embedding: &[f32], metadata: &EntryMetadata) -> Result<(), DomainError>;

    /// Remove `id` and write the new entry in one step. A missing `id` is a plain insert.
    fn update(&self, id: &str, embedding: &[f32], metadata: &EntryMetadata) -> Result<(), DomainError>;

    /// Removing an unknown id is a no-op.
    fn delete_by_id(&self, id: &str) -> Result<(), DomainError>;

    /// Best `top_k` entries by cosine similarity, highest first.
    fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<ScoredEntry>, DomainError>;

    fn get(&self, id: &str) -> Result<Option<VectorEntry>, DomainError>;

    /// All readable entries, optionally restricted to one type tag.
    fn list(&self, entry_type: Option<&str>) -> Result<Vec<VectorEntry>, DomainError>;

    fn count(&self) -> Result<usize, DomainError>;
}
