use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};

/// Caller-assigned payload stored next to an embedding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryMetadata {
    pub id: String,
    pub text: String,
    #[serde(rename = "type")]
    pub entry_type: String,
}

impl EntryMetadata {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        entry_type: impl Into<String>,
    ) -> Result<Self, DomainError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(DomainError::InvalidInput("id must not be empty".into()));
        }
        Ok(Self {
            id,
            text: text.into(),
            entry_type: entry_type.into(),
        })
    }

    /// Build metadata from loosely-typed JSON, requiring string `id`, `text` and `type`.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, DomainError> {
        let field = |name: &str| -> Result<String, DomainError> {
            match value.get(name) {
                Some(serde_json::Value::String(s)) => Ok(s.clone()),
                Some(_) => Err(DomainError::InvalidInput(format!(
                    "Field '{name}' must be a string"
                ))),
                None => Err(DomainError::InvalidInput(format!(
                    "Missing required field: {name}"
                ))),
            }
        };
        Self::new(field("id")?, field("text")?, field("type")?)
    }
}

/// A full stored record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorEntry {
    #[serde(flatten)]
    pub metadata: EntryMetadata,
    pub embedding: Vec<f32>,
}

/// One search hit: cosine similarity plus the entry's metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredEntry {
    pub score: f64,
    pub metadata: EntryMetadata,
}
