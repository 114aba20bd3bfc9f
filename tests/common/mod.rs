//! Shared test helpers.
#![allow(dead_code)]

use resumatch::domain::entities::vector_entry::EntryMetadata;
use resumatch::infrastructure::embeddings::hashing::HashingProvider;
use resumatch::ResuMatch;
use std::sync::Arc;

pub const EPS: f64 = 1e-6;

pub fn setup(dim: usize) -> ResuMatch {
    ResuMatch::with_providers(":memory:", dim, Arc::new(HashingProvider::new(dim))).unwrap()
}

pub fn open_at(path: &str, dim: usize) -> ResuMatch {
    ResuMatch::with_providers(path, dim, Arc::new(HashingProvider::new(dim))).unwrap()
}

pub fn meta(id: &str, text: &str, entry_type: &str) -> EntryMetadata {
    EntryMetadata::new(id, text, entry_type).unwrap()
}
