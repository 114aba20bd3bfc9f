pub mod ingest;
pub mod matching;
pub mod select_candidates;
pub mod stats;
