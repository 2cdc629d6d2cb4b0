//! Save/load laws for the binary format.

use crate::common::oracle_locate;
use fmindex::{FmError, Index, IndexConfig};
use proptest::prelude::*;

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-d]{0,16}").unwrap(), 0..8)
}

fn patterns_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::string::string_regex("[a-d]{1,3}").unwrap(), 1..5)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// locate(P, load(save(I))) == locate(P, I)
    #[test]
    fn prop_round_trip_preserves_locate(
        corpus in corpus_strategy(),
        patterns in patterns_strategy(),
        stride in 1u32..12,
        case_sensitive: bool,
    ) {
        let config = IndexConfig::default()
            .with_sample_stride(stride)
            .with_case_sensitive(case_sensitive);
        let index = Index::construct_with(&corpus, config).unwrap();
        let loaded = Index::from_bytes(&index.to_bytes()).unwrap();

        prop_assert_eq!(loaded.config(), index.config());
        prop_assert_eq!(loaded.meta(), index.meta());
        prop_assert_eq!(loaded.locate(&patterns), index.locate(&patterns));
        prop_assert_eq!(loaded.locate(&patterns), oracle_locate(&corpus, &patterns));
    }

    /// Re-encoding a decoded index reproduces the same bytes.
    #[test]
    fn prop_encoding_is_stable(corpus in corpus_strategy(), stride in 1u32..12) {
        let index = Index::construct_with(&corpus, IndexConfig::default().with_sample_stride(stride)).unwrap();
        let bytes = index.to_bytes();
        prop_assert_eq!(Index::from_bytes(&bytes).unwrap().to_bytes(), bytes);
    }

    /// Any single corrupted byte is rejected, never decoded into a
    /// different index.
    #[test]
    fn prop_single_byte_corruption_rejected(
        corpus in corpus_strategy(),
        position in any::<prop::sample::Index>(),
        flip in 1u8..=255,
    ) {
        let index = Index::construct(&corpus, true).unwrap();
        let mut bytes = index.to_bytes();
        let at = position.index(bytes.len());
        bytes[at] ^= flip;
        let result = Index::from_bytes(&bytes);
        prop_assert!(matches!(result, Err(FmError::Deserialization(_))));
    }

    /// Every strict prefix of a valid file is rejected.
    #[test]
    fn prop_truncation_rejected(corpus in corpus_strategy(), cut in any::<prop::sample::Index>()) {
        let bytes = Index::construct(&corpus, true).unwrap().to_bytes();
        let len = cut.index(bytes.len());
        prop_assert!(matches!(Index::from_bytes(&bytes[..len]), Err(FmError::Deserialization(_))));
    }
}
