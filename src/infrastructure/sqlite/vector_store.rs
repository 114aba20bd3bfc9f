use crate::domain::entities::vector_entry::{EntryMetadata, ScoredEntry, VectorEntry};
use crate::domain::error::DomainError;
use crate::domain::ports::vector_store::VectorStore;
use crate::domain::values::dimension::Dimension;
use crate::domain::values::similarity::{rank_top_k, QueryVector};
use crate::infrastructure::sqlite::migrations::run_migrations;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

const SELECT_COLS: &str = "id, text, type, embedding";

/// Row as read from disk, before the embedding JSON is decoded.
struct RawRow {
    id: String,
    text: Option<String>,
    entry_type: Option<String>,
    embedding: Option<String>,
}

pub struct SqliteVectorStore {
    conn: Mutex<Connection>,
    dim: Dimension,
    skipped_rows: AtomicU64,
}

impl SqliteVectorStore {
    /// Open (or create) the store at `path`. `":memory:"` gives a private in-memory store.
    pub fn open(path: &str, dim: usize) -> Result<Self, DomainError> {
        let conn = Connection::open(path)
            .map_err(|e| DomainError::Storage(format!("DB error: {e}")))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| DomainError::Storage(format!("WAL error: {e}")))?;
        conn.pragma_update(None, "synchronous", "FULL")
            .map_err(|e| DomainError::Storage(format!("Pragma error: {e}")))?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Self::new(conn, dim)
    }

    pub fn new(conn: Connection, dim: usize) -> Result<Self, DomainError> {
        let dim = Dimension::new(dim)?;
        run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
            dim,
            skipped_rows: AtomicU64::new(0),
        })
    }

    /// Number of stored rows skipped so far because their embedding was unreadable.
    pub fn skipped_rows(&self) -> u64 {
        self.skipped_rows.load(Ordering::Relaxed)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, DomainError> {
        self.conn
            .lock()
            .map_err(|e| DomainError::Storage(format!("Connection lock poisoned: {e}")))
    }

    fn validate(&self, embedding: &[f32], metadata: &EntryMetadata) -> Result<String, DomainError> {
        if metadata.id.trim().is_empty() {
            return Err(DomainError::InvalidInput("id must not be empty".into()));
        }
        self.dim.check(embedding)?;
        if embedding.iter().any(|x| !x.is_finite()) {
            return Err(DomainError::InvalidInput(format!(
                "Embedding for '{}' contains non-finite values",
                metadata.id
            )));
        }
        Ok(serde_json::to_string(embedding)?)
    }

    fn insert(conn: &Connection, metadata: &EntryMetadata, embedding_json: &str) -> Result<(), DomainError> {
        conn.execute(
            "INSERT OR REPLACE INTO vectors (id, text, type, embedding) VALUES (?1, ?2, ?3, ?4)",
            params![metadata.id, metadata.text, metadata.entry_type, embedding_json],
        )
        .map_err(|e| DomainError::Storage(format!("Failed to store vector: {e}")))?;
        Ok(())
    }

    fn read_row(row: &rusqlite::Row) -> Result<RawRow, rusqlite::Error> {
        Ok(RawRow {
            id: row.get(0)?,
            text: row.get(1)?,
            entry_type: row.get(2)?,
            embedding: row.get(3)?,
        })
    }

    fn decode(&self, raw: RawRow) -> Result<VectorEntry, DomainError> {
        let json = raw.embedding.ok_or_else(|| {
            DomainError::Serialization(format!("Entry '{}' has no embedding", raw.id))
        })?;
        let embedding: Vec<f32> = serde_json::from_str(&json).map_err(|e| {
            DomainError::Serialization(format!("Entry '{}' has unreadable embedding: {e}", raw.id))
        })?;
        self.dim.check(&embedding)?;
        Ok(VectorEntry {
            metadata: EntryMetadata {
                id: raw.id,
                text: raw.text.unwrap_or_default(),
                entry_type: raw.entry_type.unwrap_or_default(),
            },
            embedding,
        })
    }

    /// Decode rows, dropping (and counting) the ones that cannot be decoded.
    fn decode_all(&self, rows: Vec<RawRow>) -> Vec<VectorEntry> {
        rows.into_iter()
            .filter_map(|raw| {
                let id = raw.id.clone();
                match self.decode(raw) {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        self.skipped_rows.fetch_add(1, Ordering::Relaxed);
                        tracing::warn!(id = %id, error = %e, "skipping corrupt vector row");
                        None
                    }
                }
            })
            .collect()
    }

    fn fetch_rows(&self, entry_type: Option<&str>) -> Result<Vec<RawRow>, DomainError> {
        let conn = self.lock()?;
        let rows = match entry_type {
            Some(t) => {
                let mut stmt = conn.prepare(&format!("SELECT {SELECT_COLS} FROM vectors WHERE type = ?1"))?;
                let rows = stmt
                    .query_map(params![t], Self::read_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!("SELECT {SELECT_COLS} FROM vectors"))?;
                let rows = stmt
                    .query_map([], Self::read_row)?
                    .collect::<Result<Vec<_>, _>>()?;
                rows
            }
        };
        Ok(rows)
    }
}

impl VectorStore for SqliteVectorStore {
    fn dimension(&self) -> usize {
        self.dim.value()
    }

    fn add(&self, embedding: &[f32], metadata: &EntryMetadata) -> Result<(), DomainError> {
        let embedding_json = self.validate(embedding, metadata)?;
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        Self::insert(&tx, metadata, &embedding_json)?;
        tx.commit()?;
        tracing::debug!(id = %metadata.id, entry_type = %metadata.entry_type, "stored vector");
        Ok(())
    }

    fn update(&self, id: &str, embedding: &[f32], metadata: &EntryMetadata) -> Result<(), DomainError> {
        let embedding_json = self.validate(embedding, metadata)?;
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM vectors WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Storage(format!("Failed to delete vector: {e}")))?;
        Self::insert(&tx, metadata, &embedding_json)?;
        tx.commit()?;
        tracing::debug!(old_id = %id, id = %metadata.id, "updated vector");
        Ok(())
    }

    fn delete_by_id(&self, id: &str) -> Result<(), DomainError> {
        let conn = self.lock()?;
        let removed = conn
            .execute("DELETE FROM vectors WHERE id = ?1", params![id])
            .map_err(|e| DomainError::Storage(format!("Failed to delete vector: {e}")))?;
        tracing::debug!(id = %id, removed, "deleted vector");
        Ok(())
    }

    fn search(&self, query: &[f32], top_k: usize) -> Result<Vec<ScoredEntry>, DomainError> {
        self.dim.check(query)?;
        if top_k == 0 {
            return Ok(vec![]);
        }
        let rows = self.fetch_rows(None)?;
        let query = QueryVector::new(query);
        if query.is_degenerate() {
            tracing::warn!("search query has zero norm; every score will be 0.0");
        }

        let scored: Vec<(f64, EntryMetadata)> = self
            .decode_all(rows)
            .into_iter()
            .map(|entry| (query.similarity(&entry.embedding), entry.metadata))
            .collect();

        Ok(rank_top_k(scored, top_k)
            .into_iter()
            .map(|(score, metadata)| ScoredEntry { score, metadata })
            .collect())
    }

    fn get(&self, id: &str) -> Result<Option<VectorEntry>, DomainError> {
        let raw = {
            let conn = self.lock()?;
            conn.query_row(
                &format!("SELECT {SELECT_COLS} FROM vectors WHERE id = ?1"),
                params![id],
                Self::read_row,
            )
            .optional()?
        };
        raw.map(|r| self.decode(r)).transpose()
    }

    fn list(&self, entry_type: Option<&str>) -> Result<Vec<VectorEntry>, DomainError> {
        let rows = self.fetch_rows(entry_type)?;
        Ok(self.decode_all(rows))
    }

    fn count(&self) -> Result<usize, DomainError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM vectors", [], |r| r.get(0))?;
        Ok(count as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(id: &str) -> EntryMetadata {
        EntryMetadata::new(id, format!("text of {id}"), "resume").unwrap()
    }

    #[test]
    fn test_embedding_stored_as_json_text() {
        let store = SqliteVectorStore::open(":memory:", 3).unwrap();
        store.add(&[1.0, 0.5, 0.0], &meta("a")).unwrap();
        let conn = store.lock().unwrap();
        let stored: String = conn
            .query_row("SELECT embedding FROM vectors WHERE id = 'a'", [], |r| r.get(0))
            .unwrap();
        let parsed: Vec<f32> = serde_json::from_str(&stored).unwrap();
        assert_eq!(parsed, vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_corrupt_row_is_skipped_and_counted() {
        let store = SqliteVectorStore::open(":memory:", 2).unwrap();
        store.add(&[1.0, 0.0], &meta("good")).unwrap();
        {
            let conn = store.lock().unwrap();
            conn.execute(
                "INSERT INTO vectors (id, text, type, embedding) VALUES ('bad', 'x', 'resume', '[1.0, oops')",
                [],
            )
            .unwrap();
            conn.execute(
                "INSERT INTO vectors (id, text, type, embedding) VALUES ('short', 'x', 'resume', '[1.0]')",
                [],
            )
            .unwrap();
        }

        let results = store.search(&[1.0, 0.0], 5).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].metadata.id, "good");
        assert_eq!(store.skipped_rows(), 2);
        assert_eq!(store.count().unwrap(), 3);
    }

    #[test]
    fn test_get_corrupt_row_is_serialization_error() {
        let store = SqliteVectorStore::open(":memory:", 2).unwrap();
        {
            let conn = store.lock().unwrap();
            conn.execute(
                "INSERT INTO vectors (id, text, type, embedding) VALUES ('bad', 'x', 'job', 'not json')",
                [],
            )
            .unwrap();
        }
        assert!(matches!(store.get("bad"), Err(DomainError::Serialization(_))));
    }

    #[test]
    fn test_null_text_and_type_read_as_empty() {
        let store = SqliteVectorStore::open(":memory:", 2).unwrap();
        {
            let conn = store.lock().unwrap();
            conn.execute(
                "INSERT INTO vectors (id, embedding) VALUES ('legacy', '[0.0, 1.0]')",
                [],
            )
            .unwrap();
        }
        let entry = store.get("legacy").unwrap().unwrap();
        assert_eq!(entry.metadata.text, "");
        assert_eq!(entry.metadata.entry_type, "");
    }

    #[test]
    fn test_non_finite_embedding_rejected() {
        let store = SqliteVectorStore::open(":memory:", 2).unwrap();
        let err = store.add(&[f32::NAN, 1.0], &meta("nan")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(SqliteVectorStore::open(":memory:", 0).is_err());
    }
}
