//! Documented query scenarios.

use crate::common::{oracle_locate, positions_of, sample_corpus, sample_patterns};
use fmindex::{to_table, DocPosition, FmError, Index, IndexConfig, MatchRecord};

fn rec(pattern_index: usize, document_index: usize, position: usize) -> MatchRecord {
    MatchRecord {
        pattern_index,
        document_index,
        position,
    }
}

// ============================================================================
// DOCUMENT MAPPING
// ============================================================================

#[test]
fn test_boundary_offsets() {
    let index = Index::construct(&["abc", "de"], true).unwrap();
    let docs = index.documents();
    assert_eq!(docs.boundaries(), &[3, 5]);

    let at = |offset| docs.document_at(offset).unwrap();
    assert_eq!(at(0), DocPosition { document: 0, offset: 0 });
    assert_eq!(at(3), DocPosition { document: 1, offset: 0 });
    assert_eq!(at(4), DocPosition { document: 1, offset: 1 });
    assert_eq!(docs.document_at(5), None);

    assert_eq!(index.locate(&["a", "d", "e"]), vec![rec(1, 1, 1), rec(2, 2, 1), rec(3, 2, 2)]);
}

#[test]
fn test_matches_never_straddle_strings() {
    let index = Index::construct(&["ab", "ba", "ab"], true).unwrap();
    // "abba" exists only in the concatenation
    assert!(index.locate(&["abba", "bb", "aa"]).is_empty());
    assert_eq!(index.count("ab"), 2);
}

#[test]
fn test_empty_strings_keep_numbering() {
    let index = Index::construct(&["", "x", "", "x"], true).unwrap();
    assert_eq!(index.locate(&["x"]), vec![rec(1, 2, 1), rec(1, 4, 1)]);
}

// ============================================================================
// OVERLAPS, CASE, EDGE CASES
// ============================================================================

#[test]
fn test_overlapping_matches() {
    let index = Index::construct(&["aaa"], true).unwrap();
    assert_eq!(index.locate(&["aa"]), vec![rec(1, 1, 1), rec(1, 1, 2)]);
}

#[test]
fn test_case_sensitivity() {
    let folded = Index::construct(&["New York"], false).unwrap();
    assert_eq!(folded.locate(&["new"]).len(), 1);

    let exact = Index::construct(&["New York"], true).unwrap();
    assert!(exact.locate(&["new"]).is_empty());
    assert_eq!(exact.locate(&["New"]).len(), 1);
}

#[test]
fn test_empty_corpus() {
    let index = Index::construct::<&str>(&[], true).unwrap();
    assert!(index.locate(&["a", "", "abc"]).is_empty());
    assert_eq!(index.meta().string_count, 0);
    assert_eq!(index.meta().text_len, 0);
}

#[test]
fn test_corpus_of_empty_strings() {
    let index = Index::construct(&["", "", ""], true).unwrap();
    assert!(index.locate(&["a"]).is_empty());
    assert_eq!(index.string_count(), 3);
}

#[test]
fn test_empty_pattern_matches_nothing() {
    let index = Index::construct(&["abc"], true).unwrap();
    assert!(index.locate(&[""]).is_empty());
    // but the raw interval covers every row
    assert_eq!(index.fm().backward_search(b"").len(), 4);
}

#[test]
fn test_positions_are_bytes() {
    let index = Index::construct(&["tōkyō tower"], true).unwrap();
    // "tōkyō " is 8 bytes
    assert_eq!(index.locate(&["tower"]), vec![rec(1, 1, 9)]);
    assert_eq!(index.count("ō"), 2);
}

#[test]
fn test_nul_in_corpus_rejected() {
    let err = Index::construct(&["fine", "not\0fine"], true).unwrap_err();
    assert!(matches!(err, FmError::Construction(_)));
    assert!(err.to_string().contains("string 2"), "{}", err);
}

#[test]
fn test_zero_stride_rejected() {
    let err = Index::construct_with(&["a"], IndexConfig::default().with_sample_stride(0)).unwrap_err();
    assert!(matches!(err, FmError::Construction(_)));
}

// ============================================================================
// AGAINST THE ORACLE
// ============================================================================

#[test]
fn test_sample_corpus_matches_oracle() {
    let corpus = sample_corpus();
    let patterns = sample_patterns();
    for stride in [1, 2, 5, 32, 1000] {
        let index = Index::construct_with(&corpus, IndexConfig::default().with_sample_stride(stride)).unwrap();
        assert_eq!(
            index.locate(&patterns),
            oracle_locate(&corpus, &patterns),
            "stride {}",
            stride
        );
    }
}

#[test]
fn test_pattern_order_is_input_order() {
    let corpus = sample_corpus();
    let index = Index::construct(&corpus, true).unwrap();
    let forward = index.locate(&["ss", "abra"]);
    let backward = index.locate(&["abra", "ss"]);
    assert_eq!(forward[0].pattern_index, 1);
    assert_eq!(backward[0].pattern_index, 1);
    assert_eq!(positions_of(&forward), positions_of(&backward));
}

#[test]
fn test_table_columns() {
    let index = Index::construct(&["abc", "bcd"], true).unwrap();
    let table = to_table(&index.locate(&["bc", "d"]));
    assert_eq!(table.pattern_index, vec![1, 1, 2]);
    assert_eq!(table.library_index, vec![1, 2, 2]);
    assert_eq!(table.position, vec![2, 1, 3]);
}
