// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus concatenation and the offset → document mapping.
//!
//! The FM-index works over one flat byte string. Every corpus string is
//! appended in order with no separator, and the cumulative end offset of each
//! string is recorded:
//!
//! ```text
//! corpus      ["abc", "", "de"]
//! text        a b c d e
//! offset      0 1 2 3 4
//! boundaries  [3, 3, 5]
//! ```
//!
//! Mapping a global offset back is an `upper_bound` over the boundaries: the
//! first boundary strictly greater than the offset names the document. Empty
//! strings share their boundary with the previous document and are never
//! selected, which is correct because no offset lies inside them.
//!
//! # INVARIANTS
//!
//! 1. **BOUNDARIES_MONOTONE**: `boundaries` is non-decreasing
//! 2. **BOUNDARIES_TOTAL**: `boundaries.last() == text.len()` (or both are empty/zero)
//! 3. **NO_SENTINEL**: the text never contains [`SENTINEL`]

use std::ops::Range;

use crate::error::{FmError, Result};

/// Terminator appended to the text before suffix sorting. Reserved: corpus
/// strings may not contain it.
pub const SENTINEL: u8 = 0;

/// Longest concatenated text an index can hold. Offsets are stored as `u32`
/// and the sentinel takes one more slot.
pub const MAX_TEXT_LEN: usize = (u32::MAX - 1) as usize;

/// Most strings a corpus can hold. The file header counts them in a `u32`.
pub const MAX_STRINGS: usize = u32::MAX as usize;

/// Concatenated corpus text together with its document boundaries.
#[derive(Debug, Clone)]
pub struct ConcatenatedText {
    pub text: Vec<u8>,
    pub documents: DocumentMap,
}

/// Concatenate corpus strings into one buffer and record cumulative lengths.
///
/// Fails if a string contains the sentinel byte, the total length does not
/// fit the offset type, or there are more strings than the header can count.
pub fn concatenate<S: AsRef<[u8]>>(strings: &[S]) -> Result<ConcatenatedText> {
    concatenate_bounded(strings, MAX_TEXT_LEN, MAX_STRINGS)
}

fn concatenate_bounded<S: AsRef<[u8]>>(
    strings: &[S],
    max_text_len: usize,
    max_strings: usize,
) -> Result<ConcatenatedText> {
    if strings.len() > max_strings {
        return Err(FmError::construction(format!(
            "corpus has {} strings, the maximum is {}",
            strings.len(),
            max_strings
        )));
    }

    let mut total: usize = 0;
    let mut ends = Vec::with_capacity(strings.len());

    for (doc, s) in strings.iter().enumerate() {
        let bytes = s.as_ref();
        if let Some(pos) = bytes.iter().position(|&b| b == SENTINEL) {
            return Err(FmError::construction(format!(
                "string {} contains the reserved NUL byte at position {}",
                doc + 1,
                pos + 1
            )));
        }
        total = total.saturating_add(bytes.len());
        check_text_len(total, max_text_len)?;
        ends.push(total as u32);
    }

    let mut text = Vec::with_capacity(total);
    for s in strings {
        text.extend_from_slice(s.as_ref());
    }
    tracing::debug!(strings = strings.len(), text_len = total, "concatenated corpus");

    Ok(ConcatenatedText {
        text,
        documents: DocumentMap { ends },
    })
}

/// `ConstructionError` when a text of `len` bytes exceeds `max`.
pub(crate) fn check_text_len(len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(FmError::construction(format!(
            "text of {} bytes exceeds the maximum of {}",
            len, max
        )));
    }
    Ok(())
}

/// Position of an occurrence inside a single corpus string (0-based).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DocPosition {
    pub document: usize,
    pub offset: usize,
}

/// Boundary table: `ends[i]` is the cumulative length of strings `0..=i`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentMap {
    ends: Vec<u32>,
}

impl DocumentMap {
    /// Rebuild a map from persisted boundaries, checking they describe a text
    /// of exactly `text_len` bytes.
    pub(crate) fn from_boundaries(ends: Vec<u32>, text_len: usize) -> Result<Self> {
        if let Some(i) = ends.windows(2).position(|w| w[0] > w[1]) {
            return Err(FmError::corrupt(format!(
                "boundary table decreases at entry {} ({} > {})",
                i + 1,
                ends[i],
                ends[i + 1]
            )));
        }
        let last = ends.last().map_or(0, |&e| e as usize);
        if last != text_len {
            return Err(FmError::corrupt(format!(
                "boundary table covers {} bytes but text has {}",
                last, text_len
            )));
        }
        Ok(Self { ends })
    }

    /// Number of corpus strings.
    pub fn len(&self) -> usize {
        self.ends.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ends.is_empty()
    }

    /// Cumulative end offsets, one per string.
    pub fn boundaries(&self) -> &[u32] {
        &self.ends
    }

    /// Total length of the concatenated text.
    pub fn text_len(&self) -> usize {
        self.ends.last().map_or(0, |&e| e as usize)
    }

    /// Byte range a document occupies in the concatenated text.
    pub fn document_range(&self, document: usize) -> Option<Range<usize>> {
        let end = *self.ends.get(document)? as usize;
        let start = if document == 0 {
            0
        } else {
            self.ends[document - 1] as usize
        };
        Some(start..end)
    }

    /// Map a global text offset to `(document, local offset)`.
    ///
    /// Returns `None` when the offset is at or past the end of the text.
    pub fn document_at(&self, offset: usize) -> Option<DocPosition> {
        // upper_bound: first boundary strictly greater than offset
        let document = self.ends.partition_point(|&end| end as usize <= offset);
        if document == self.ends.len() {
            return None;
        }
        let start = if document == 0 {
            0
        } else {
            self.ends[document - 1] as usize
        };
        Some(DocPosition {
            document,
            offset: offset - start,
        })
    }

    /// Map an occurrence of `len` bytes starting at `offset`, rejecting
    /// occurrences that run past the end of their document.
    pub fn resolve(&self, offset: usize, len: usize) -> Option<DocPosition> {
        let pos = self.document_at(offset)?;
        let end = self.ends[pos.document] as usize;
        (offset + len <= end).then_some(pos)
    }
}
