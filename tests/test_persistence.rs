mod common;

use common::{meta, open_at, EPS};
use resumatch::domain::error::DomainError;
use resumatch::infrastructure::embeddings::hashing::HashingProvider;
use resumatch::infrastructure::embeddings::openai::OpenAiProvider;
use resumatch::ResuMatch;
use std::sync::Arc;
use std::thread;

#[test]
fn test_entries_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vectors.db");
    let path = path.to_str().unwrap();

    {
        let rm = open_at(path, 3);
        rm.add(&[1.0, 0.0, 0.0], &meta("a", "x", "resume")).unwrap();
        rm.add(&[0.0, 1.0, 0.0], &meta("b", "y", "job")).unwrap();
        rm.delete_by_id("b").unwrap();
    }

    let rm = open_at(path, 3);
    let results = rm.search(&[1.0, 0.0, 0.0], 5).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].metadata.id, "a");
    assert!((results[0].score - 1.0).abs() < EPS);
}

#[test]
fn test_repeated_open_does_not_duplicate() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vectors.db");
    let path = path.to_str().unwrap();

    let first = open_at(path, 2);
    first.add(&[0.5, 0.5], &meta("r1", "x", "resume")).unwrap();
    let second = open_at(path, 2);
    let third = open_at(path, 2);

    assert_eq!(second.stats().unwrap().total_entries, 1);
    assert_eq!(third.list(None).unwrap().len(), 1);
}

#[test]
fn test_write_visible_to_second_handle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vectors.db");
    let path = path.to_str().unwrap();

    let writer = open_at(path, 2);
    let reader = open_at(path, 2);
    writer.add(&[1.0, 0.0], &meta("r1", "x", "resume")).unwrap();
    writer.update("r1", &[0.0, 1.0], &meta("r1", "y", "resume")).unwrap();

    let entry = reader.get("r1").unwrap().unwrap();
    assert_eq!(entry.embedding, vec![0.0, 1.0]);
    assert_eq!(entry.metadata.text, "y");
}

#[test]
fn test_corrupt_row_does_not_break_search() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vectors.db");
    let path = path.to_str().unwrap();

    let rm = open_at(path, 2);
    rm.add(&[1.0, 0.0], &meta("good", "x", "resume")).unwrap();

    let conn = rusqlite::Connection::open(path).unwrap();
    conn.execute(
        "INSERT INTO vectors (id, text, type, embedding) VALUES ('bad', 'x', 'resume', '{\"oops\": 1}')",
        [],
    )
    .unwrap();
    drop(conn);

    let results = rm.search(&[1.0, 0.0], 5).unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].metadata.id, "good");
    assert_eq!(rm.skipped_rows(), 1);
    assert_eq!(rm.stats().unwrap().total_entries, 2);
}

#[test]
fn test_provider_dimension_must_match_store() {
    let result = ResuMatch::with_providers(":memory:", 3, Arc::new(HashingProvider::new(8)));
    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
}

#[test]
fn test_openai_compatible_model_of_other_width() {
    let provider = OpenAiProvider::new(
        String::new(),
        Some("all-minilm".into()),
        Some("http://localhost:8000".into()),
        None,
    );
    let rm = ResuMatch::with_providers(":memory:", 384, Arc::new(provider)).unwrap();
    assert_eq!(rm.stats().unwrap().dimension, 384);

    let provider = OpenAiProvider::new(
        String::new(),
        Some("all-minilm".into()),
        Some("http://localhost:8000".into()),
        Some(384),
    );
    assert!(ResuMatch::with_providers(":memory:", 384, Arc::new(provider)).is_ok());

    let provider = OpenAiProvider::new(String::new(), Some("all-minilm".into()), None, Some(768));
    let result = ResuMatch::with_providers(":memory:", 384, Arc::new(provider));
    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
}

#[test]
fn test_concurrent_writers_and_readers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vectors.db");
    let rm = Arc::new(open_at(path.to_str().unwrap(), 4));

    let mut handles = Vec::new();
    for t in 0..4 {
        let rm = rm.clone();
        handles.push(thread::spawn(move || {
            for i in 0..25 {
                let id = format!("t{t}-{i}");
                let v = [1.0, t as f32, i as f32, 0.5];
                rm.add(&v, &meta(&id, "resume text", "resume")).unwrap();
                rm.update(&id, &v, &meta(&id, "updated", "resume")).unwrap();
                let results = rm.search(&v, 3).unwrap();
                assert!(results.len() <= 3);
                assert!(results
                    .iter()
                    .all(|r| r.metadata.text == "resume text" || r.metadata.text == "updated"));
                assert_eq!(rm.get(&id).unwrap().unwrap().metadata.text, "updated");
            }
        }));
    }
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(rm.stats().unwrap().total_entries, 100);
    assert_eq!(rm.skipped_rows(), 0);
}
