//! Differential testing: index results against the brute-force oracle.

use crate::common::{oracle_locate, oracle_offsets, oracle_suffix_array, positions_of};
use fmindex::index::suffix_array_with_sentinel;
use fmindex::{concatenate, FmIndex, Index, IndexConfig};
use proptest::prelude::*;

// ============================================================================
// STRATEGIES
// ============================================================================

/// Corpus strings over a 3-letter alphabet, empty strings included.
fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[abc]{0,12}").unwrap(), 0..6)
}

/// Short patterns over the same alphabet, the empty pattern included.
fn patterns_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[abc]{0,4}").unwrap(), 1..6)
}

/// Mixed-case corpus for folding tests.
fn mixed_case_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[aAbB ]{0,10}").unwrap(), 1..5)
}

fn text_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=255, 0..200)
}

// ============================================================================
// LOCATE vs ORACLE
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Index::locate returns exactly the oracle's matches, in the same order.
    #[test]
    fn diff_locate(
        corpus in corpus_strategy(),
        patterns in patterns_strategy(),
        stride in 1u32..10,
    ) {
        let config = IndexConfig::default().with_sample_stride(stride);
        let index = Index::construct_with(&corpus, config).unwrap();
        prop_assert_eq!(index.locate(&patterns), oracle_locate(&corpus, &patterns));
    }

    /// The sampling stride changes the cost of locate, never its result.
    #[test]
    fn prop_stride_independence(
        corpus in corpus_strategy(),
        patterns in patterns_strategy(),
        a in 1u32..16,
        b in 1u32..16,
    ) {
        let x = Index::construct_with(&corpus, IndexConfig::default().with_sample_stride(a)).unwrap();
        let y = Index::construct_with(&corpus, IndexConfig::default().with_sample_stride(b)).unwrap();
        prop_assert_eq!(x.locate(&patterns), y.locate(&patterns));
    }

    /// Repeating a query gives the same answer.
    #[test]
    fn prop_locate_idempotent(corpus in corpus_strategy(), patterns in patterns_strategy()) {
        let index = Index::construct(&corpus, true).unwrap();
        let first = index.locate(&patterns);
        let second = index.locate(&patterns);
        prop_assert_eq!(positions_of(&first), positions_of(&second));
        prop_assert_eq!(first, second);
    }

    /// No duplicates within one pattern's matches.
    #[test]
    fn prop_no_duplicate_matches(corpus in corpus_strategy(), patterns in patterns_strategy()) {
        let index = Index::construct(&corpus, true).unwrap();
        let records = index.locate(&patterns);
        let mut deduped = records.clone();
        deduped.sort_unstable();
        deduped.dedup();
        prop_assert_eq!(deduped.len(), records.len());
    }

    /// A case-insensitive index answers like the oracle on folded input.
    #[test]
    fn diff_case_insensitive(corpus in mixed_case_strategy(), patterns in prop::collection::vec(
        prop::string::string_regex("[aAbB]{1,3}").unwrap(), 1..4)
    ) {
        let index = Index::construct(&corpus, false).unwrap();
        let folded_corpus: Vec<String> = corpus.iter().map(|s| s.to_lowercase()).collect();
        let folded_patterns: Vec<String> = patterns.iter().map(|s| s.to_lowercase()).collect();
        prop_assert_eq!(index.locate(&patterns), oracle_locate(&folded_corpus, &folded_patterns));
    }

    /// Per-pattern count agrees with locate.
    #[test]
    fn prop_count_matches_locate(corpus in corpus_strategy(), pattern in "[abc]{0,3}") {
        let index = Index::construct(&corpus, true).unwrap();
        prop_assert_eq!(index.count(&pattern), oracle_locate(&corpus, &[&pattern]).len());
    }
}

#[cfg(feature = "parallel")]
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_locate_par_equals_locate(corpus in corpus_strategy(), patterns in patterns_strategy()) {
        let index = Index::construct(&corpus, true).unwrap();
        prop_assert_eq!(index.locate_par(&patterns), index.locate(&patterns));
    }
}

// ============================================================================
// FM-INDEX PRIMITIVES vs ORACLE
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// SA-IS agrees with sorting suffixes.
    #[test]
    fn diff_suffix_array(text in text_strategy()) {
        prop_assert_eq!(suffix_array_with_sentinel(&text), oracle_suffix_array(&text));
    }

    /// Suffix array over a tiny alphabet, where SA-IS recursion kicks in.
    #[test]
    fn diff_suffix_array_repetitive(text in prop::collection::vec(prop::sample::select(vec![b'a', b'b']), 0..300)) {
        prop_assert_eq!(suffix_array_with_sentinel(&text), oracle_suffix_array(&text));
    }

    /// Raw interval length is the occurrence count over the whole
    /// concatenated text, straddles included.
    #[test]
    fn diff_backward_search_count(corpus in corpus_strategy(), pattern in "[abc]{1,4}") {
        let text = concatenate(&corpus).unwrap().text;
        let fm = FmIndex::build(&text, 4).unwrap();
        prop_assert_eq!(fm.count(pattern.as_bytes()), oracle_offsets(&text, pattern.as_bytes()).len());
    }

    /// LF-walking from the sentinel row spells the text backwards.
    #[test]
    fn prop_extract_text(text in text_strategy(), stride in 1u32..20) {
        let fm = FmIndex::build(&text, stride).unwrap();
        prop_assert_eq!(fm.extract_text(), text);
    }

    /// Every suffix-array row locates to its true text offset.
    #[test]
    fn diff_locate_row(text in text_strategy(), stride in 1u32..20) {
        let fm = FmIndex::build(&text, stride).unwrap();
        let sa = oracle_suffix_array(&text);
        for (row, &pos) in sa.iter().enumerate() {
            prop_assert_eq!(fm.locate_row(row), Some(pos));
        }
    }
}
