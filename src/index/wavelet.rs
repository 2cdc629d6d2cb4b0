// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Wavelet matrix over a byte alphabet: the rank index of the FM-index.
//!
//! Symbols are first remapped to dense codes `[0, σ)` (σ = distinct bytes in
//! the sequence), so the matrix has `⌈log2 σ⌉` levels instead of eight. Each
//! level is one bit vector holding one bit of every code, most significant
//! bit first. Between levels the sequence is stably partitioned, zeros
//! before ones:
//!
//! ```text
//! BWT   a n n b $ a a     codes: $=0 a=1 b=2 n=3
//! L0    0 1 1 1 0 0 0     (bit 1 of each code)
//! L1    1 0 1 1 1 1 0     after partition: a $ a a n n b
//! ```
//!
//! - `access(i)`: BWT symbol at row i, O(log σ)
//! - `rank(c, i)`: occurrences of c in `[0, i)`, O(log σ)
//! - `access_rank(i)`: both at once, one walk. This is the LF step.
//!
//! The BWT itself is not stored anywhere else: `access` reconstructs it.

use super::bitvec::{BitVecBuilder, RankBitVec};
use crate::error::{FmError, Result};

/// Marker for bytes that do not occur in the sequence.
const ABSENT: u16 = u16::MAX;

#[derive(Debug, Clone)]
pub struct WaveletMatrix {
    levels: Vec<RankBitVec>,
    /// Zeros at each level (start of the ones partition below it)
    zeros: Vec<usize>,
    len: usize,
    /// Sorted distinct symbols; a symbol's code is its index here
    alphabet: Vec<u8>,
    codes: [u16; 256],
}

/// Levels needed to encode `sigma` distinct codes. A single-symbol alphabet
/// still gets one (all-zero) level so rank stays uniform.
fn height_for(sigma: usize) -> usize {
    match sigma {
        0 => 0,
        1 => 1,
        s => (usize::BITS - (s - 1).leading_zeros()) as usize,
    }
}

fn code_table(alphabet: &[u8]) -> [u16; 256] {
    let mut codes = [ABSENT; 256];
    for (code, &sym) in alphabet.iter().enumerate() {
        codes[sym as usize] = code as u16;
    }
    codes
}

impl WaveletMatrix {
    pub fn new(sequence: &[u8]) -> Self {
        let mut present = [false; 256];
        for &b in sequence {
            present[b as usize] = true;
        }
        let alphabet: Vec<u8> = (0..=255u8).filter(|&b| present[b as usize]).collect();
        let codes = code_table(&alphabet);
        let height = height_for(alphabet.len());

        let mut current: Vec<u16> = sequence.iter().map(|&b| codes[b as usize]).collect();
        let mut levels = Vec::with_capacity(height);
        let mut zeros = Vec::with_capacity(height);

        for level in 0..height {
            let shift = height - 1 - level;
            let mut bits = BitVecBuilder::with_capacity(current.len());
            let mut left = Vec::with_capacity(current.len());
            let mut right = Vec::new();
            for &code in &current {
                let bit = (code >> shift) & 1 == 1;
                bits.push(bit);
                if bit {
                    right.push(code);
                } else {
                    left.push(code);
                }
            }
            let bv = bits.finish();
            zeros.push(bv.count_zeros());
            levels.push(bv);
            left.extend(right);
            current = left;
        }

        Self {
            levels,
            zeros,
            len: sequence.len(),
            alphabet,
            codes,
        }
    }

    /// Rebuild from persisted parts: sorted alphabet, sequence length and one
    /// bit vector per level.
    pub(crate) fn from_parts(alphabet: Vec<u8>, len: usize, levels: Vec<RankBitVec>) -> Result<Self> {
        if alphabet.windows(2).any(|w| w[0] >= w[1]) {
            return Err(FmError::corrupt("rank index alphabet is not strictly increasing"));
        }
        let height = height_for(alphabet.len());
        if levels.len() != height {
            return Err(FmError::corrupt(format!(
                "rank index has {} levels, alphabet of {} needs {}",
                levels.len(),
                alphabet.len(),
                height
            )));
        }
        if alphabet.is_empty() && len != 0 {
            return Err(FmError::corrupt("rank index has symbols but no alphabet"));
        }
        if let Some(bad) = levels.iter().position(|l| l.len() != len) {
            return Err(FmError::corrupt(format!(
                "rank index level {} has {} bits, expected {}",
                bad,
                levels[bad].len(),
                len
            )));
        }
        let zeros = levels.iter().map(RankBitVec::count_zeros).collect();
        let codes = code_table(&alphabet);
        Ok(Self {
            levels,
            zeros,
            len,
            alphabet,
            codes,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn alphabet(&self) -> &[u8] {
        &self.alphabet
    }

    pub(crate) fn levels(&self) -> &[RankBitVec] {
        &self.levels
    }

    /// Symbol at position `i`, or `None` past the end.
    pub fn access(&self, i: usize) -> Option<u8> {
        self.access_rank(i).map(|(symbol, _)| symbol)
    }

    /// Symbol at position `i` and its rank among equal symbols in `[0, i)`.
    ///
    /// Follows the same path `rank(symbol, i)` would, discovering the bits
    /// of the symbol on the way down.
    pub fn access_rank(&self, i: usize) -> Option<(u8, usize)> {
        if i >= self.len {
            return None;
        }
        let mut pos = i;
        let mut start = 0usize;
        let mut code = 0usize;
        for (level, bv) in self.levels.iter().enumerate() {
            let bit = bv.get(pos);
            code = (code << 1) | usize::from(bit);
            if bit {
                pos = self.zeros[level] + bv.rank1(pos);
                start = self.zeros[level] + bv.rank1(start);
            } else {
                pos = bv.rank0(pos);
                start = bv.rank0(start);
            }
        }
        let symbol = *self.alphabet.get(code)?;
        Some((symbol, pos - start))
    }

    /// Occurrences of `symbol` in `[0, i)`. `i` is clamped to `len`.
    pub fn rank(&self, symbol: u8, i: usize) -> usize {
        let code = self.codes[symbol as usize];
        if code == ABSENT || i == 0 {
            return 0;
        }
        let height = self.levels.len();
        let mut pos = i.min(self.len);
        let mut start = 0usize;
        for (level, bv) in self.levels.iter().enumerate() {
            if (code >> (height - 1 - level)) & 1 == 1 {
                pos = self.zeros[level] + bv.rank1(pos);
                start = self.zeros[level] + bv.rank1(start);
            } else {
                pos = bv.rank0(pos);
                start = bv.rank0(start);
            }
        }
        pos - start
    }

    /// Total occurrences of `symbol`.
    pub fn count(&self, symbol: u8) -> usize {
        self.rank(symbol, self.len)
    }

    pub fn size_bytes(&self) -> usize {
        self.levels.iter().map(RankBitVec::size_bytes).sum::<usize>()
            + self.alphabet.len()
            + std::mem::size_of::<[u16; 256]>()
    }
}
