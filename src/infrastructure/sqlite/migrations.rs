use crate::domain::error::DomainError;
use rusqlite::Connection;

pub fn run_migrations(conn: &Connection) -> Result<(), DomainError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS vectors (
            id TEXT PRIMARY KEY,
            text TEXT,
            type TEXT,
            embedding TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_vectors_type ON vectors(type);
        "
    ).map_err(|e| DomainError::Storage(format!("Migration failed: {e}")))
}
