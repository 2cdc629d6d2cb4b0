// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The FM-index: backward search and locate over `text + $`.
//!
//! # LF-mapping
//!
//! Row `i` of the sorted suffixes is preceded in the text by `BWT[i]`. The
//! row of that one-longer suffix is
//!
//! ```text
//! LF(i) = C[BWT[i]] + rank(BWT[i], i)
//! ```
//!
//! Backward search applies the same formula to both ends of an interval, one
//! pattern symbol at a time from the last to the first. Locate applies it to
//! a single row until it lands on a sampled row.
//!
//! # INVARIANTS
//!
//! 1. **ROWS**: the rank index, C-array and samples all describe
//!    `text_len + 1` rows
//! 2. **SENTINEL_ROW**: row 0 is the sentinel suffix (`SA[0] == text_len`)
//! 3. **REACHABLE**: every row reaches a sampled row in `< stride` LF steps

use std::ops::Range;

use super::bwt::{bwt_from_suffix_array, CArray};
use super::sais::suffix_array_with_sentinel;
use super::sampling::SampledSuffixArray;
use super::wavelet::WaveletMatrix;
use crate::corpus::{check_text_len, MAX_TEXT_LEN, SENTINEL};
use crate::error::{FmError, Result};

#[derive(Debug, Clone)]
pub struct FmIndex {
    bwt: WaveletMatrix,
    c_array: CArray,
    samples: SampledSuffixArray,
    text_len: usize,
}

impl FmIndex {
    /// Build the index of `text` keeping one suffix-array sample per
    /// `sample_stride` text offsets.
    pub fn build(text: &[u8], sample_stride: u32) -> Result<Self> {
        if sample_stride == 0 {
            return Err(FmError::construction("sample stride must be at least 1"));
        }
        check_text_len(text.len(), MAX_TEXT_LEN)?;
        if let Some(pos) = text.iter().position(|&b| b == SENTINEL) {
            return Err(FmError::construction(format!(
                "text contains the reserved NUL byte at offset {}",
                pos
            )));
        }

        let sa = suffix_array_with_sentinel(text);
        let bwt = bwt_from_suffix_array(text, &sa);
        let c_array = CArray::from_text(text);
        let samples = SampledSuffixArray::from_suffix_array(&sa, sample_stride);
        drop(sa);
        let rank_index = WaveletMatrix::new(&bwt);

        tracing::debug!(
            text_len = text.len(),
            alphabet = rank_index.alphabet().len(),
            samples = samples.len(),
            "built FM-index"
        );

        Ok(Self {
            bwt: rank_index,
            c_array,
            samples,
            text_len: text.len(),
        })
    }

    /// Assemble an index from decoded parts, checking they agree with each
    /// other.
    pub(crate) fn from_parts(
        bwt: WaveletMatrix,
        c_array: CArray,
        samples: SampledSuffixArray,
        text_len: usize,
    ) -> Result<Self> {
        let rows = text_len + 1;
        if bwt.len() != rows || c_array.total() != rows {
            return Err(FmError::corrupt(format!(
                "rank index has {} rows, C-array {}, text needs {}",
                bwt.len(),
                c_array.total(),
                rows
            )));
        }
        for c in 0..=255u8 {
            if bwt.count(c) != c_array.frequency(c) {
                return Err(FmError::corrupt(format!(
                    "symbol {:#04x} occurs {} times in the rank index but {} in the C-array",
                    c,
                    bwt.count(c),
                    c_array.frequency(c)
                )));
            }
        }
        let index = Self {
            bwt,
            c_array,
            samples,
            text_len,
        };
        index.verify_lf_cycle()?;
        Ok(index)
    }

    /// Walk LF once around the text from the sentinel row.
    ///
    /// A consistent index visits every row exactly once before returning to
    /// row 0, and every sampled row on the way stores the text offset the
    /// walk is at. O(n log σ), the same as [`Self::extract_text`].
    fn verify_lf_cycle(&self) -> Result<()> {
        let mut row = 0usize;
        let mut offset = self.text_len;
        loop {
            if let Some(stored) = self.samples.get(row) {
                if stored != offset {
                    return Err(FmError::corrupt(format!(
                        "row {} stores text offset {} but LF reaches it at offset {}",
                        row, stored, offset
                    )));
                }
            }
            let next = self
                .lf(row)
                .ok_or_else(|| FmError::corrupt(format!("LF is undefined at row {}", row)))?;
            if offset == 0 {
                if next != 0 {
                    return Err(FmError::corrupt(
                        "LF walk does not close at the sentinel row",
                    ));
                }
                return Ok(());
            }
            if next == 0 {
                return Err(FmError::corrupt(format!(
                    "LF walk returns to the sentinel row after {} of {} rows",
                    self.text_len - offset + 1,
                    self.rows()
                )));
            }
            row = next;
            offset -= 1;
        }
    }

    /// Length of the indexed text, without the sentinel.
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    /// Number of suffix-array rows (`text_len + 1`).
    pub fn rows(&self) -> usize {
        self.text_len + 1
    }

    pub fn sample_stride(&self) -> u32 {
        self.samples.stride()
    }

    pub(crate) fn rank_index(&self) -> &WaveletMatrix {
        &self.bwt
    }

    pub(crate) fn c_array(&self) -> &CArray {
        &self.c_array
    }

    pub(crate) fn samples(&self) -> &SampledSuffixArray {
        &self.samples
    }

    /// Suffix-array interval of all suffixes starting with `pattern`.
    ///
    /// An empty pattern yields every row, sentinel included. An absent
    /// pattern yields an empty range.
    pub fn backward_search(&self, pattern: &[u8]) -> Range<usize> {
        let mut lo = 0;
        let mut hi = self.rows();
        for &c in pattern.iter().rev() {
            let base = self.c_array.get(c);
            let new_lo = base + self.bwt.rank(c, lo);
            let new_hi = base + self.bwt.rank(c, hi);
            if new_lo >= new_hi {
                return 0..0;
            }
            lo = new_lo;
            hi = new_hi;
        }
        lo..hi
    }

    /// Raw occurrence count in the concatenated text (interval length).
    pub fn count(&self, pattern: &[u8]) -> usize {
        self.backward_search(pattern).len()
    }

    /// One LF step: the row of the suffix starting one position earlier.
    #[inline]
    pub fn lf(&self, row: usize) -> Option<usize> {
        let (c, rank) = self.bwt.access_rank(row)?;
        Some(self.c_array.get(c) + rank)
    }

    /// Text offset where the suffix at `row` starts.
    ///
    /// `None` only if `row` is out of range or the structure is inconsistent.
    pub fn locate_row(&self, row: usize) -> Option<usize> {
        let mut current = row;
        let mut steps = 0usize;
        loop {
            if let Some(offset) = self.samples.get(current) {
                return Some((offset + steps) % self.rows());
            }
            if steps >= self.samples.stride() as usize {
                tracing::warn!(row, steps, "locate walk did not reach a sampled row");
                return None;
            }
            current = self.lf(current)?;
            steps += 1;
        }
    }

    /// Text offsets of every occurrence of `pattern`, in suffix order.
    ///
    /// Occurrences that would overlap the sentinel are dropped, so a pattern
    /// containing the sentinel byte never matches. The empty pattern matches
    /// nothing here.
    pub fn locate(&self, pattern: &[u8]) -> Vec<usize> {
        if pattern.is_empty() {
            return Vec::new();
        }
        let text_len = self.text_len;
        self.backward_search(pattern)
            .filter_map(|row| self.locate_row(row))
            .filter(|&offset| offset + pattern.len() <= text_len)
            .collect()
    }

    /// Reconstruct the original text by walking LF from the sentinel row.
    pub fn extract_text(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.text_len);
        let mut row = 0;
        for _ in 0..self.text_len {
            match self.bwt.access_rank(row) {
                Some((c, rank)) => {
                    out.push(c);
                    row = self.c_array.get(c) + rank;
                }
                None => break,
            }
        }
        out.reverse();
        out
    }

    pub fn size_bytes(&self) -> usize {
        self.bwt.size_bytes() + self.c_array.as_slice().len() * 8 + self.samples.size_bytes()
    }
}
