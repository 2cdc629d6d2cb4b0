// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Configuration, metadata and result records.
//!
//! Everything that crosses the public boundary is 1-based: pattern numbers,
//! document numbers and positions all count from 1. Inside the crate offsets
//! are 0-based byte offsets (see [`crate::corpus::DocPosition`]); the
//! conversion happens exactly once, when a [`MatchRecord`] is created.

use serde::{Deserialize, Serialize};

use crate::corpus::DocPosition;
use crate::error::{FmError, Result};

/// Default suffix-array sampling stride.
pub const DEFAULT_SAMPLE_STRIDE: u32 = 32;

// =============================================================================
// CONFIG
// =============================================================================

/// How to build an index.
///
/// ```
/// use fmindex::IndexConfig;
///
/// let config = IndexConfig::default().with_sample_stride(8).case_insensitive();
/// assert_eq!(config.sample_stride, 8);
/// assert!(!config.case_sensitive);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Keep one suffix-array value per `sample_stride` text offsets. Smaller
    /// is faster to locate and larger on disk. Must be at least 1.
    pub sample_stride: u32,
    /// When false, corpus and queries both go through the case folder.
    pub case_sensitive: bool,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            sample_stride: DEFAULT_SAMPLE_STRIDE,
            case_sensitive: true,
        }
    }
}

impl IndexConfig {
    pub fn with_sample_stride(mut self, stride: u32) -> Self {
        self.sample_stride = stride;
        self
    }

    pub fn case_insensitive(mut self) -> Self {
        self.case_sensitive = false;
        self
    }

    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.sample_stride == 0 {
            return Err(FmError::construction("sample stride must be at least 1"));
        }
        Ok(())
    }
}

// =============================================================================
// METADATA
// =============================================================================

/// What an index holds, without querying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexMeta {
    /// Number of corpus strings.
    pub string_count: usize,
    /// Bytes of concatenated (and possibly folded) text.
    pub text_len: usize,
    /// Size of the encoded index in bytes.
    pub byte_size: usize,
    pub sample_stride: u32,
    pub case_sensitive: bool,
}

// =============================================================================
// RESULTS
// =============================================================================

/// One occurrence of one pattern. All fields are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Which query pattern matched, in input order.
    pub pattern_index: usize,
    /// Which corpus string it matched in.
    pub document_index: usize,
    /// Byte position of the match inside that string.
    pub position: usize,
}

impl MatchRecord {
    /// Convert a 0-based pattern number and document position.
    pub(crate) fn from_zero_based(pattern: usize, pos: DocPosition) -> Self {
        Self {
            pattern_index: pattern + 1,
            document_index: pos.document + 1,
            position: pos.offset + 1,
        }
    }
}
