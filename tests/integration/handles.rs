//! Handle validity and concurrent queries.

use std::sync::Arc;
use std::thread;

use crate::common::{oracle_locate, sample_corpus, sample_patterns};
use fmindex::{FmError, Index, IndexRegistry};
use tempfile::TempDir;

#[test]
fn test_registry_lifecycle() {
    let registry = IndexRegistry::new();
    let handle = registry.construct(&sample_corpus(), true).unwrap();
    assert_eq!(registry.len(), 1);

    let patterns = sample_patterns();
    assert_eq!(
        registry.locate(handle, &patterns).unwrap(),
        oracle_locate(&sample_corpus(), &patterns)
    );
    assert_eq!(registry.meta(handle).unwrap().string_count, sample_corpus().len());

    registry.release(handle).unwrap();
    assert!(registry.is_empty());
}

#[test]
fn test_released_handle_fails_every_operation() {
    let dir = TempDir::new().unwrap();
    let registry = IndexRegistry::new();
    let handle = registry.construct(&["abc"], true).unwrap();
    registry.release(handle).unwrap();

    assert!(matches!(registry.locate(handle, &["a"]), Err(FmError::InvalidHandle(_))));
    assert!(matches!(registry.meta(handle), Err(FmError::InvalidHandle(_))));
    assert!(matches!(
        registry.save(handle, dir.path().join("x.fmi")),
        Err(FmError::InvalidHandle(_))
    ));
    assert!(matches!(registry.release(handle), Err(FmError::InvalidHandle(_))));
}

#[test]
fn test_foreign_handle_rejected() {
    let ours = IndexRegistry::new();
    let theirs = IndexRegistry::new();
    let _ = ours.construct(&["abc"], true).unwrap();
    let foreign = theirs.construct(&["abc"], true).unwrap();
    assert!(matches!(ours.locate(foreign, &["a"]), Err(FmError::InvalidHandle(_))));
}

#[test]
fn test_registry_save_and_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("registry.fmi");
    let registry = IndexRegistry::new();

    let built = registry.construct(&["New York", "York"], false).unwrap();
    registry.save(built, &path).unwrap();
    let loaded = registry.load(&path).unwrap();

    assert_ne!(built, loaded);
    assert_eq!(
        registry.locate(loaded, &["york"]).unwrap(),
        registry.locate(built, &["york"]).unwrap()
    );
    assert!(!registry.meta(loaded).unwrap().case_sensitive);
}

#[test]
fn test_load_missing_file_inserts_nothing() {
    let dir = TempDir::new().unwrap();
    let registry = IndexRegistry::new();
    assert!(matches!(
        registry.load(dir.path().join("missing.fmi")),
        Err(FmError::Io { .. })
    ));
    assert!(registry.is_empty());
}

#[test]
fn test_concurrent_locate_on_shared_index() {
    let corpus = sample_corpus();
    let patterns = sample_patterns();
    let expected = oracle_locate(&corpus, &patterns);
    let index = Arc::new(Index::construct(&corpus, true).unwrap());

    let workers: Vec<_> = (0..8)
        .map(|_| {
            let index = Arc::clone(&index);
            let patterns = patterns.clone();
            thread::spawn(move || {
                (0..50)
                    .map(|_| index.locate(&patterns))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for worker in workers {
        for result in worker.join().unwrap() {
            assert_eq!(result, expected);
        }
    }
}

#[test]
fn test_concurrent_queries_and_release() {
    let registry = Arc::new(IndexRegistry::new());
    let handle = registry.construct(&["mississippi"], true).unwrap();

    thread::scope(|s| {
        for _ in 0..4 {
            let registry = Arc::clone(&registry);
            s.spawn(move || {
                for _ in 0..200 {
                    match registry.locate(handle, &["ss"]) {
                        Ok(records) => assert_eq!(records.len(), 2),
                        Err(e) => assert!(matches!(e, FmError::InvalidHandle(_))),
                    }
                }
            });
        }
        registry.release(handle).unwrap();
    });

    assert!(registry.locate(handle, &["ss"]).is_err());
}
