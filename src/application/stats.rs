use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Debug, Clone, Default, Serialize)]
pub struct StoreStats {
    pub total_entries: usize,
    pub by_type: BTreeMap<String, usize>,
    pub dimension: usize,
}

pub struct StatsUseCase {
    store: Arc<dyn VectorStore>,
}

impl StatsUseCase {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// `by_type` counts readable entries only; `total_entries` counts every row.
    pub fn stats(&self) -> Result<StoreStats, DomainError> {
        let mut by_type = BTreeMap::new();
        for entry in self.store.list(None)? {
            *by_type.entry(entry.metadata.entry_type).or_default() += 1;
        }
        Ok(StoreStats {
            total_entries: self.store.count()?,
            by_type,
            dimension: self.store.dimension(),
        })
    }
}
