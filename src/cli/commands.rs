use crate::config::Config;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "resumatch", about = "Embedded vector store for resume and job matching")]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Insert or replace an entry
    Add {
        /// JSON with id, text, type and embedding (array of numbers)
        json: String,
    },
    /// Replace the entry stored under an id
    Update {
        /// Entry ID to replace
        id: String,
        /// JSON with id, text, type and embedding
        json: String,
    },
    /// Delete an entry (no-op if absent)
    Delete {
        id: String,
    },
    /// Show one stored entry
    Get {
        id: String,
    },
    /// Top-k cosine search with a raw embedding
    Search {
        /// Query embedding as a JSON array
        embedding: String,
        #[arg(long, default_value = "5")]
        top_k: usize,
    },
    /// List stored entries
    List {
        /// Only entries with this type tag
        #[arg(long = "type")]
        entry_type: Option<String>,
    },
    /// Embed text and store it as a resume or job
    Ingest {
        /// Entry type (resume, job)
        kind: String,
        text: String,
        /// Entry ID (random UUID when omitted)
        #[arg(long)]
        id: Option<String>,
    },
    /// Embed free text and find the closest entries
    Match {
        text: String,
        /// Only match entries of this type (resume, job)
        #[arg(long = "type")]
        kind: Option<String>,
        #[arg(long, default_value = "5")]
        top_k: usize,
    },
    /// Pick the best resumes for a stored job (every job when no ID is given)
    Select {
        job_id: Option<String>,
        #[arg(long, default_value = "2")]
        max: usize,
        /// Minimum similarity a resume must reach
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        threshold: f64,
    },
    /// Show store statistics
    Stats,
}
