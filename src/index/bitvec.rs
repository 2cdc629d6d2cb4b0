// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Plain bit vector with constant-time rank.
//!
//! Bits are packed into `u64` words. Every block of eight words (512 bits)
//! stores the number of ones before it, so `rank1(i)` is one block lookup plus
//! at most eight popcounts. Overhead is 64 bits per 512, 12.5%.

use crate::error::{FmError, Result};

const WORD_BITS: usize = 64;
const WORDS_PER_BLOCK: usize = 8;

/// Incremental builder for [`RankBitVec`].
#[derive(Debug, Default)]
pub struct BitVecBuilder {
    words: Vec<u64>,
    len: usize,
}

impl BitVecBuilder {
    pub fn with_capacity(bits: usize) -> Self {
        Self {
            words: Vec::with_capacity(bits.div_ceil(WORD_BITS)),
            len: 0,
        }
    }

    pub fn push(&mut self, bit: bool) {
        let offset = self.len % WORD_BITS;
        if offset == 0 {
            self.words.push(0);
        }
        if bit {
            if let Some(last) = self.words.last_mut() {
                *last |= 1u64 << offset;
            }
        }
        self.len += 1;
    }

    pub fn finish(self) -> RankBitVec {
        RankBitVec::from_words_unchecked(self.words, self.len)
    }
}

/// Immutable bit vector answering `rank` in O(1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankBitVec {
    words: Vec<u64>,
    len: usize,
    /// Ones before each 512-bit block
    blocks: Vec<u64>,
    ones: usize,
}

impl RankBitVec {
    fn from_words_unchecked(words: Vec<u64>, len: usize) -> Self {
        let mut blocks = Vec::with_capacity(words.len().div_ceil(WORDS_PER_BLOCK));
        let mut running = 0u64;
        for chunk in words.chunks(WORDS_PER_BLOCK) {
            blocks.push(running);
            running += chunk.iter().map(|w| u64::from(w.count_ones())).sum::<u64>();
        }
        Self {
            words,
            len,
            blocks,
            ones: running as usize,
        }
    }

    /// Rebuild from raw words. Rejects a word count that does not match `len`
    /// and set bits beyond `len`.
    pub(crate) fn from_words(words: Vec<u64>, len: usize) -> Result<Self> {
        let expected = len.div_ceil(WORD_BITS);
        if words.len() != expected {
            return Err(FmError::corrupt(format!(
                "bit vector of {} bits needs {} words, found {}",
                len,
                expected,
                words.len()
            )));
        }
        let tail = len % WORD_BITS;
        if tail != 0 {
            if let Some(&last) = words.last() {
                if last >> tail != 0 {
                    return Err(FmError::corrupt("bit vector has bits set past its end"));
                }
            }
        }
        Ok(Self::from_words_unchecked(words, len))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub fn count_ones(&self) -> usize {
        self.ones
    }

    pub fn count_zeros(&self) -> usize {
        self.len - self.count_ones()
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        debug_assert!(i < self.len, "bit {} out of bounds (len={})", i, self.len);
        (self.words[i / WORD_BITS] >> (i % WORD_BITS)) & 1 == 1
    }

    /// Number of ones in `[0, i)`. `i` is clamped to `len`.
    #[inline]
    pub fn rank1(&self, i: usize) -> usize {
        let i = i.min(self.len);
        let word = i / WORD_BITS;
        let block = word / WORDS_PER_BLOCK;
        let mut rank = match self.blocks.get(block) {
            Some(&r) => r as usize,
            None => return self.ones,
        };
        for w in &self.words[block * WORDS_PER_BLOCK..word] {
            rank += w.count_ones() as usize;
        }
        let bit = i % WORD_BITS;
        if bit != 0 {
            rank += (self.words[word] & ((1u64 << bit) - 1)).count_ones() as usize;
        }
        rank
    }

    /// Number of zeros in `[0, i)`. `i` is clamped to `len`.
    #[inline]
    pub fn rank0(&self, i: usize) -> usize {
        i.min(self.len) - self.rank1(i)
    }

    /// Heap bytes used by the vector and its rank directory.
    pub fn size_bytes(&self) -> usize {
        (self.words.len() + self.blocks.len()) * std::mem::size_of::<u64>()
    }
}

impl FromIterator<bool> for RankBitVec {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut builder = BitVecBuilder::with_capacity(iter.size_hint().0);
        for bit in iter {
            builder.push(bit);
        }
        builder.finish()
    }
}
