//! Shared test utilities and oracles.
//!
//! The oracle is a plain linear scan over each corpus string. It shares no
//! code with the index, so when the two disagree the oracle is right.

#![allow(dead_code)]

use fmindex::MatchRecord;

// ============================================================================
// ORACLES
// ============================================================================

/// Every occurrence of every pattern by brute force, in the order
/// `Index::locate` promises: pattern, then document, then position.
pub fn oracle_locate<S: AsRef<str>, P: AsRef<str>>(corpus: &[S], patterns: &[P]) -> Vec<MatchRecord> {
    let mut out = Vec::new();
    for (p, pattern) in patterns.iter().enumerate() {
        let needle = pattern.as_ref().as_bytes();
        if needle.is_empty() || needle.contains(&0) {
            continue;
        }
        for (d, doc) in corpus.iter().enumerate() {
            for offset in oracle_offsets(doc.as_ref().as_bytes(), needle) {
                out.push(MatchRecord {
                    pattern_index: p + 1,
                    document_index: d + 1,
                    position: offset + 1,
                });
            }
        }
    }
    out
}

/// 0-based start offsets of `needle` in `haystack`, overlaps included.
pub fn oracle_offsets(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .map(|(i, _)| i)
        .collect()
}

/// Suffix array of `text + $` by sorting, sentinel row first.
pub fn oracle_suffix_array(text: &[u8]) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..text.len()).collect();
    positions.sort_by(|&i, &j| text[i..].cmp(&text[j..]));
    let mut sa = Vec::with_capacity(text.len() + 1);
    sa.push(text.len());
    sa.extend(positions);
    sa
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Small corpus with repeats, empty strings, overlaps and multi-byte text.
pub fn sample_corpus() -> Vec<String> {
    [
        "abracadabra",
        "",
        "mississippi",
        "banana bandana",
        "aaaa",
        "tōkyō tower",
        "New York, new york",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

pub fn sample_patterns() -> Vec<String> {
    ["a", "abra", "ss", "issi", "ana", "aa", "ō", "york", "New", "", "zzz", "ab"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Strip the pattern number so results can be compared as sets.
pub fn positions_of(records: &[MatchRecord]) -> Vec<(usize, usize)> {
    let mut v: Vec<_> = records
        .iter()
        .map(|r| (r.document_index, r.position))
        .collect();
    v.sort_unstable();
    v
}
