use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Entry categories the matching pipeline writes. The store itself accepts any tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Resume,
    Job,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::Resume => "resume",
            EntryKind::Job => "job",
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntryKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "resume" => Ok(EntryKind::Resume),
            "job" => Ok(EntryKind::Job),
            _ => Err(format!("Unknown entry type: {s}. Use 'resume' or 'job'")),
        }
    }
}
