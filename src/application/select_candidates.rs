use crate::domain::entities::vector_entry::{ScoredEntry, VectorEntry};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::entry_kind::EntryKind;
use crate::domain::values::similarity::{rank_top_k, QueryVector};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_MAX_CANDIDATES: usize = 2;

#[derive(Debug, Clone, Serialize)]
pub struct SelectionReport {
    pub job_id: String,
    pub candidates: Vec<ScoredEntry>,
    pub selected_at: DateTime<Utc>,
}

pub struct SelectCandidatesUseCase {
    store: Arc<dyn VectorStore>,
}

impl SelectCandidatesUseCase {
    pub fn new(store: Arc<dyn VectorStore>) -> Self {
        Self { store }
    }

    /// Rank every stored resume against the job's embedding and keep the best
    /// `max_candidates` scoring at least `threshold`.
    pub fn execute(
        &self,
        job_id: &str,
        max_candidates: usize,
        threshold: f64,
    ) -> Result<SelectionReport, DomainError> {
        let job = self
            .store
            .get(job_id)?
            .ok_or_else(|| DomainError::NotFound(format!("job '{job_id}'")))?;
        if job.metadata.entry_type != EntryKind::Job.as_str() {
            return Err(DomainError::InvalidInput(format!(
                "Entry '{job_id}' is a '{}', not a job",
                job.metadata.entry_type
            )));
        }

        let resumes = self.store.list(Some(EntryKind::Resume.as_str()))?;
        Ok(Self::rank(&job, &resumes, max_candidates, threshold))
    }

    /// Run the selection for every stored job in one pass. Jobs with no
    /// resume above `threshold` still get an (empty) report.
    pub fn execute_all(
        &self,
        max_candidates: usize,
        threshold: f64,
    ) -> Result<Vec<SelectionReport>, DomainError> {
        let resumes = self.store.list(Some(EntryKind::Resume.as_str()))?;
        let reports: Vec<SelectionReport> = self
            .store
            .list(Some(EntryKind::Job.as_str()))?
            .iter()
            .map(|job| Self::rank(job, &resumes, max_candidates, threshold))
            .collect();
        tracing::info!(jobs = reports.len(), "selected candidates for all jobs");
        Ok(reports)
    }

    fn rank(
        job: &VectorEntry,
        resumes: &[VectorEntry],
        max_candidates: usize,
        threshold: f64,
    ) -> SelectionReport {
        let q = QueryVector::new(&job.embedding);
        let scored: Vec<_> = resumes
            .iter()
            .map(|resume| (q.similarity(&resume.embedding), resume.metadata.clone()))
            .filter(|(score, _)| *score >= threshold)
            .collect();
        let candidates: Vec<ScoredEntry> = rank_top_k(scored, max_candidates)
            .into_iter()
            .map(|(score, metadata)| ScoredEntry { score, metadata })
            .collect();

        tracing::info!(job_id = %job.metadata.id, selected = candidates.len(), "selected candidates");
        SelectionReport {
            job_id: job.metadata.id.clone(),
            candidates,
            selected_at: Utc::now(),
        }
    }
}
