// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Burrows–Wheeler transform and the C-array.
//!
//! ```text
//! text + $   b a n a n a $
//! SA         6 5 3 1 0 4 2
//! BWT        a n n b $ a a     BWT[i] = text[(SA[i] - 1) mod (n + 1)]
//! C          $:0 a:1 b:4 n:5   symbols strictly smaller, over text + $
//! ```

use crate::corpus::SENTINEL;
use crate::error::{FmError, Result};

/// BWT of `text + $` given its suffix array (with the sentinel row).
pub fn bwt_from_suffix_array(text: &[u8], sa: &[usize]) -> Vec<u8> {
    debug_assert_eq!(sa.len(), text.len() + 1);
    sa.iter()
        .map(|&pos| if pos == 0 { SENTINEL } else { text[pos - 1] })
        .collect()
}

/// Cumulative symbol counts over `text + $`.
///
/// `C[c]` is the number of symbols strictly less than `c`; `C[256]` is the
/// total length including the sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CArray {
    counts: Box<[u64; 257]>,
}

impl CArray {
    pub fn from_text(text: &[u8]) -> Self {
        let mut freq = [0u64; 256];
        for &b in text {
            freq[b as usize] += 1;
        }
        freq[SENTINEL as usize] += 1;

        let mut counts = Box::new([0u64; 257]);
        let mut acc = 0u64;
        for c in 0..256 {
            counts[c] = acc;
            acc += freq[c];
        }
        counts[256] = acc;
        Self { counts }
    }

    /// Rebuild from persisted values, checking shape against the text length:
    /// starts at 0, never decreases, one sentinel, ends at `text_len + 1`.
    pub(crate) fn from_raw(values: &[u64], text_len: usize) -> Result<Self> {
        if values.len() != 257 {
            return Err(FmError::corrupt(format!(
                "C-array has {} entries, expected 257",
                values.len()
            )));
        }
        if values[0] != 0 {
            return Err(FmError::corrupt("C-array does not start at 0"));
        }
        if let Some(i) = values.windows(2).position(|w| w[0] > w[1]) {
            return Err(FmError::corrupt(format!(
                "C-array is not monotonic at symbol {}",
                i + 1
            )));
        }
        if values[256] != text_len as u64 + 1 {
            return Err(FmError::corrupt(format!(
                "C-array total {} does not match text length {} + 1",
                values[256], text_len
            )));
        }
        if values[SENTINEL as usize + 1] - values[SENTINEL as usize] != 1 {
            return Err(FmError::corrupt("C-array must count exactly one sentinel"));
        }
        let mut counts = Box::new([0u64; 257]);
        counts.copy_from_slice(values);
        Ok(Self { counts })
    }

    /// Symbols strictly smaller than `c`.
    #[inline]
    pub fn get(&self, c: u8) -> usize {
        self.counts[c as usize] as usize
    }

    /// Occurrences of `c` in `text + $`.
    #[inline]
    pub fn frequency(&self, c: u8) -> usize {
        (self.counts[c as usize + 1] - self.counts[c as usize]) as usize
    }

    /// Length of `text + $`.
    pub fn total(&self) -> usize {
        self.counts[256] as usize
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.counts[..]
    }
}
