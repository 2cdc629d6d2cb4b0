// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Exact substring search over a fixed corpus with an FM-index.
//!
//! Give it N strings; it concatenates them, builds a suffix array, keeps only
//! the Burrows–Wheeler transform (as a wavelet matrix) plus a sparse sample
//! of the suffix array, and throws the rest away. Queries run backward search
//! over the BWT, then walk LF-mapping to recover text offsets, then map each
//! offset to (string, position). The corpus itself is never decompressed.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────────────────────┐     ┌─────────────┐
//! │  corpus.rs  │────▶│  index/                      │────▶│  engine.rs  │
//! │ (concat,    │     │  sais → bwt → wavelet        │     │  (Index)    │
//! │ DocumentMap)│     │  sampling → fm (search/LF)   │     │             │
//! └─────────────┘     └──────────────────────────────┘     └─────────────┘
//!        ▲                          │                            │
//!        │                          ▼                            ▼
//! ┌─────────────┐     ┌──────────────────────────────┐     ┌─────────────┐
//! │   fold.rs   │     │  binary/                     │     │ registry.rs │
//! │ (CaseFolder)│     │  header, encoding, encode/   │     │ (handles)   │
//! │             │     │  decode with CRC32 footer    │     │             │
//! └─────────────┘     └──────────────────────────────┘     └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use fmindex::{to_table, Index};
//!
//! let index = Index::construct(&["abc", "de"], true).unwrap();
//! let matches = index.locate(&["d", "e"]);
//! let table = to_table(&matches);
//! assert_eq!(table.library_index, vec![2, 2]);
//! assert_eq!(table.position, vec![1, 2]);
//! ```

// Module declarations
pub mod binary;
pub mod corpus;
mod engine;
mod error;
pub mod fold;
pub mod index;
mod registry;
mod table;
mod types;

// Re-exports for public API
pub use corpus::{
    concatenate, ConcatenatedText, DocPosition, DocumentMap, MAX_STRINGS, MAX_TEXT_LEN, SENTINEL,
};
pub use engine::Index;
pub use error::{FmError, Result};
pub use fold::{fold_case, AsciiFolder, CaseFolder, UnicodeFolder};
pub use index::FmIndex;
pub use registry::{IndexHandle, IndexRegistry};
pub use table::{to_table, MatchTable};
pub use types::{IndexConfig, IndexMeta, MatchRecord, DEFAULT_SAMPLE_STRIDE};
