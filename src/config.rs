use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmbedderKind {
    /// Offline feature-hashing embedder
    Hashing,
    /// OpenAI-compatible `/v1/embeddings` endpoint
    #[value(name = "openai")]
    OpenAi,
    /// No embeddings; text ingestion is unavailable
    Noop,
}

/// Process-wide settings, read from flags with environment fallbacks.
#[derive(Debug, Clone, Args)]
pub struct Config {
    /// SQLite database path (":memory:" for a throwaway store)
    #[arg(long, global = true, env = "RESUMATCH_DB", default_value = "./resumatch.db")]
    pub db: String,

    /// Embedding dimension of the store
    #[arg(long, global = true, env = "RESUMATCH_DIM", default_value_t = 384)]
    pub dim: usize,

    /// Embedding provider used by `ingest` and `match`
    #[arg(long, global = true, env = "RESUMATCH_EMBEDDER", value_enum, default_value_t = EmbedderKind::Hashing)]
    pub embedder: EmbedderKind,

    #[arg(long, global = true, env = "RESUMATCH_EMBEDDING_API_KEY", hide_env_values = true, default_value = "")]
    pub api_key: String,

    #[arg(long, global = true, env = "RESUMATCH_EMBEDDING_MODEL")]
    pub model: Option<String>,

    #[arg(long, global = true, env = "RESUMATCH_EMBEDDING_BASE_URL")]
    pub base_url: Option<String>,

    /// Vector width of the remote embedding model, when it is not a known OpenAI model
    #[arg(long, global = true, env = "RESUMATCH_EMBEDDING_DIM")]
    pub embedding_dim: Option<usize>,
}

impl Config {
    pub fn new(db: impl Into<String>, dim: usize) -> Self {
        Self {
            db: db.into(),
            dim,
            embedder: EmbedderKind::Hashing,
            api_key: String::new(),
            model: None,
            base_url: None,
            embedding_dim: None,
        }
    }
}
