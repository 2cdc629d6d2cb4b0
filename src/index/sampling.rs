// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sampled suffix array.
//!
//! Policy: sample by text offset. Row `i` keeps `SA[i]` iff
//! `SA[i] % stride == 0`. One LF step moves from text offset `p` to `p - 1`,
//! so any row reaches a sampled one in fewer than `stride` steps; offset 0 is
//! always sampled, which also covers the wrap from offset 0 to the sentinel.
//!
//! Which rows are sampled is a bit vector over all rows; the values live in a
//! dense array indexed by `rank1(row)`.

use super::bitvec::{BitVecBuilder, RankBitVec};
use crate::error::{FmError, Result};

#[derive(Debug, Clone)]
pub struct SampledSuffixArray {
    stride: u32,
    marks: RankBitVec,
    values: Vec<u32>,
}

/// Samples a text of `rows` positions (text + sentinel) must hold.
fn expected_samples(rows: usize, stride: u32) -> usize {
    if rows == 0 {
        0
    } else {
        (rows - 1) / stride as usize + 1
    }
}

impl SampledSuffixArray {
    /// Keep every suffix-array value divisible by `stride`. `stride` must be
    /// at least 1.
    pub fn from_suffix_array(sa: &[usize], stride: u32) -> Self {
        debug_assert!(stride > 0);
        let step = stride as usize;
        let mut marks = BitVecBuilder::with_capacity(sa.len());
        let mut values = Vec::with_capacity(expected_samples(sa.len(), stride));
        for &pos in sa {
            let keep = pos % step == 0;
            marks.push(keep);
            if keep {
                values.push(pos as u32);
            }
        }
        Self {
            stride,
            marks: marks.finish(),
            values,
        }
    }

    /// Rebuild from persisted `(row, offset)` pairs.
    ///
    /// Rows must be strictly increasing and below `rows`; offsets must be the
    /// distinct multiples of `stride` in `[0, rows)`, every one of them
    /// present, otherwise locate could walk forever.
    pub(crate) fn from_pairs(stride: u32, rows: usize, pairs: &[(u32, u32)]) -> Result<Self> {
        if stride == 0 {
            return Err(FmError::corrupt("sample stride is 0"));
        }
        let expected = expected_samples(rows, stride);
        if pairs.len() != expected {
            return Err(FmError::corrupt(format!(
                "{} suffix-array samples for {} rows at stride {}, expected {}",
                pairs.len(),
                rows,
                stride,
                expected
            )));
        }

        let mut seen = vec![false; expected];
        let mut marks = BitVecBuilder::with_capacity(rows);
        let mut next_row = 0usize;
        let mut values = Vec::with_capacity(expected);

        for (i, &(row, offset)) in pairs.iter().enumerate() {
            let row = row as usize;
            if row < next_row || row >= rows {
                return Err(FmError::corrupt(format!(
                    "sample {} has row {} out of order or out of range",
                    i, row
                )));
            }
            if offset % stride != 0 || offset as usize >= rows {
                return Err(FmError::corrupt(format!(
                    "sample {} has invalid text offset {}",
                    i, offset
                )));
            }
            let slot = (offset / stride) as usize;
            if std::mem::replace(&mut seen[slot], true) {
                return Err(FmError::corrupt(format!(
                    "text offset {} is sampled twice",
                    offset
                )));
            }
            for _ in next_row..row {
                marks.push(false);
            }
            marks.push(true);
            next_row = row + 1;
            values.push(offset);
        }
        for _ in next_row..rows {
            marks.push(false);
        }

        Ok(Self {
            stride,
            marks: marks.finish(),
            values,
        })
    }

    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Stored text offset for `row`, if that row is sampled.
    #[inline]
    pub fn get(&self, row: usize) -> Option<usize> {
        if row < self.marks.len() && self.marks.get(row) {
            Some(self.values[self.marks.rank1(row)] as usize)
        } else {
            None
        }
    }

    /// `(row, offset)` pairs in row order.
    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..self.marks.len())
            .filter(|&row| self.marks.get(row))
            .zip(self.values.iter())
            .map(|(row, &offset)| (row as u32, offset))
    }

    pub fn size_bytes(&self) -> usize {
        self.marks.size_bytes() + self.values.len() * std::mem::size_of::<u32>()
    }
}
