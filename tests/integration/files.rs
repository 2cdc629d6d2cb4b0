//! Persistence through real files.

use std::fs;

use crate::common::{sample_corpus, sample_patterns};
use fmindex::binary::{IndexFooter, VERSION};
use fmindex::{FmError, Index, IndexConfig};
use tempfile::TempDir;

fn saved_sample(dir: &TempDir, config: IndexConfig) -> (Index, std::path::PathBuf) {
    let index = Index::construct_with(&sample_corpus(), config).unwrap();
    let path = dir.path().join("sample.fmi");
    index.save(&path).unwrap();
    (index, path)
}

/// Rewrite the CRC so a tampered body gets past the checksum.
fn reseal(bytes: &mut Vec<u8>) {
    let body = bytes.len() - IndexFooter::SIZE;
    let crc = IndexFooter::compute_crc32(&bytes[..body]);
    bytes[body..body + 4].copy_from_slice(&crc.to_le_bytes());
}

#[test]
fn test_save_load_round_trip() {
    let dir = TempDir::new().unwrap();
    for config in [
        IndexConfig::default(),
        IndexConfig::default().with_sample_stride(1),
        IndexConfig::default().with_sample_stride(7).case_insensitive(),
    ] {
        let (index, path) = saved_sample(&dir, config);
        let loaded = Index::load(&path).unwrap();
        let patterns = sample_patterns();
        assert_eq!(loaded.locate(&patterns), index.locate(&patterns));
        assert_eq!(loaded.config(), index.config());
        assert_eq!(fs::metadata(&path).unwrap().len() as usize, index.meta().byte_size);
    }
}

#[test]
fn test_case_insensitive_flag_survives_save() {
    let dir = TempDir::new().unwrap();
    let (_, path) = saved_sample(&dir, IndexConfig::default().case_insensitive());
    let loaded = Index::load(&path).unwrap();
    assert!(!loaded.config().case_sensitive);
    assert_eq!(loaded.count("NEW YORK"), 2);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nope.fmi");
    match Index::load(&path) {
        Err(FmError::Io { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected Io error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_unwritable_path_is_io_error() {
    let dir = TempDir::new().unwrap();
    let index = Index::construct(&["x"], true).unwrap();
    let path = dir.path().join("missing-dir").join("x.fmi");
    assert!(matches!(index.save(&path), Err(FmError::Io { .. })));
}

#[test]
fn test_garbage_file_is_deserialization_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("garbage.fmi");
    fs::write(&path, b"this is not an index file at all, not even close").unwrap();
    assert!(matches!(Index::load(&path), Err(FmError::Deserialization(_))));

    fs::write(&path, b"").unwrap();
    assert!(matches!(Index::load(&path), Err(FmError::Deserialization(_))));
}

#[test]
fn test_truncated_file_rejected() {
    let dir = TempDir::new().unwrap();
    let (_, path) = saved_sample(&dir, IndexConfig::default());
    let bytes = fs::read(&path).unwrap();
    fs::write(&path, &bytes[..bytes.len() / 2]).unwrap();
    assert!(matches!(Index::load(&path), Err(FmError::Deserialization(_))));
}

#[test]
fn test_corrupted_byte_rejected() {
    let dir = TempDir::new().unwrap();
    let (_, path) = saved_sample(&dir, IndexConfig::default());
    let mut bytes = fs::read(&path).unwrap();
    let mid = bytes.len() / 2;
    bytes[mid] = bytes[mid].wrapping_add(1);
    fs::write(&path, &bytes).unwrap();
    let err = Index::load(&path).unwrap_err();
    assert!(err.to_string().contains("CRC32"), "{}", err);
}

#[test]
fn test_future_version_rejected() {
    let dir = TempDir::new().unwrap();
    let (_, path) = saved_sample(&dir, IndexConfig::default());
    let mut bytes = fs::read(&path).unwrap();
    bytes[4] = VERSION + 1;
    reseal(&mut bytes);
    fs::write(&path, &bytes).unwrap();
    let err = Index::load(&path).unwrap_err();
    assert!(matches!(err, FmError::Deserialization(_)));
    assert!(err.to_string().contains("version"), "{}", err);
}

#[test]
fn test_boundary_table_checked_after_crc() {
    let index = Index::construct(&["banana", "bandana"], true).unwrap();
    let mut bytes = index.to_bytes();
    // last boundary must equal the text length (13)
    let at = bytes.len() - IndexFooter::SIZE - 4;
    bytes[at..at + 4].copy_from_slice(&12u32.to_le_bytes());
    reseal(&mut bytes);
    let err = Index::from_bytes(&bytes).unwrap_err();
    assert!(matches!(err, FmError::Deserialization(_)));
}
