// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A corpus index: FM-index plus document boundaries plus the settings it
//! was built with.
//!
//! ```text
//! corpus ──fold?──► concatenate ──► FmIndex::build
//!                        │
//!                        └──► DocumentMap
//!
//! pattern ──fold?──► backward_search ──► locate_row ──► DocumentMap::resolve
//! ```
//!
//! An [`Index`] is immutable once built. Every query takes `&self`, so one
//! index can serve any number of threads at once (wrap it in an `Arc`).

use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::binary::{self, FormatFlags};
use crate::corpus::{concatenate, DocPosition, DocumentMap, SENTINEL};
use crate::error::{FmError, Result};
use crate::fold::{fold_case, CaseFolder, UnicodeFolder};
use crate::index::FmIndex;
use crate::types::{IndexConfig, IndexMeta, MatchRecord};

#[derive(Debug, Clone)]
pub struct Index {
    fm: FmIndex,
    documents: DocumentMap,
    config: IndexConfig,
    folder: Arc<dyn CaseFolder>,
}

impl Index {
    /// Build with default settings, optionally case-insensitive.
    ///
    /// ```
    /// use fmindex::Index;
    ///
    /// let index = Index::construct(&["New York", "new jersey"], false).unwrap();
    /// assert_eq!(index.locate(&["NEW"]).len(), 2);
    /// ```
    pub fn construct<S: AsRef<str>>(corpus: &[S], case_sensitive: bool) -> Result<Self> {
        Self::construct_with(
            corpus,
            IndexConfig::default().with_case_sensitive(case_sensitive),
        )
    }

    pub fn construct_with<S: AsRef<str>>(corpus: &[S], config: IndexConfig) -> Result<Self> {
        Self::construct_with_folder(corpus, config, Arc::new(UnicodeFolder))
    }

    /// Build with a custom case folder. The folder is only consulted when
    /// `config.case_sensitive` is false.
    pub fn construct_with_folder<S: AsRef<str>>(
        corpus: &[S],
        config: IndexConfig,
        folder: Arc<dyn CaseFolder>,
    ) -> Result<Self> {
        config.validate()?;
        let start = Instant::now();

        let concatenated = if config.case_sensitive {
            let bytes: Vec<&[u8]> = corpus.iter().map(|s| s.as_ref().as_bytes()).collect();
            concatenate(&bytes)?
        } else {
            concatenate(&fold_case(corpus, folder.as_ref()))?
        };
        let fm = FmIndex::build(&concatenated.text, config.sample_stride)?;

        tracing::debug!(
            strings = corpus.len(),
            text_len = fm.text_len(),
            case_sensitive = config.case_sensitive,
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "constructed index"
        );

        Ok(Self {
            fm,
            documents: concatenated.documents,
            config,
            folder,
        })
    }

    /// Replace the query folder, e.g. after [`Index::load`] of an index that
    /// was built with a custom one.
    pub fn with_folder(mut self, folder: Arc<dyn CaseFolder>) -> Self {
        self.folder = folder;
        self
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    pub fn documents(&self) -> &DocumentMap {
        &self.documents
    }

    pub fn fm(&self) -> &FmIndex {
        &self.fm
    }

    /// Number of corpus strings.
    pub fn string_count(&self) -> usize {
        self.documents.len()
    }

    pub fn meta(&self) -> IndexMeta {
        IndexMeta {
            string_count: self.documents.len(),
            text_len: self.fm.text_len(),
            byte_size: binary::encoded_len(&self.fm, &self.documents),
            sample_stride: self.config.sample_stride,
            case_sensitive: self.config.case_sensitive,
        }
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    fn prepare<'a>(&self, pattern: &'a str) -> Cow<'a, str> {
        if self.config.case_sensitive {
            Cow::Borrowed(pattern)
        } else {
            Cow::Owned(self.folder.fold(pattern))
        }
    }

    /// Every in-document occurrence of one pattern, sorted by document then
    /// position, 0-based.
    ///
    /// Empty patterns and patterns containing NUL have no occurrences.
    pub fn positions(&self, pattern: &str) -> Vec<DocPosition> {
        let pattern = self.prepare(pattern);
        let bytes = pattern.as_bytes();
        if bytes.is_empty() || bytes.contains(&SENTINEL) {
            return Vec::new();
        }
        let mut hits: Vec<DocPosition> = self
            .fm
            .locate(bytes)
            .into_iter()
            .filter_map(|offset| self.documents.resolve(offset, bytes.len()))
            .collect();
        hits.sort_unstable();
        hits
    }

    /// Number of in-document occurrences of one pattern.
    pub fn count(&self, pattern: &str) -> usize {
        self.positions(pattern).len()
    }

    fn records_for(&self, pattern_index: usize, pattern: &str) -> Vec<MatchRecord> {
        self.positions(pattern)
            .into_iter()
            .map(|pos| MatchRecord::from_zero_based(pattern_index, pos))
            .collect()
    }

    /// Locate every pattern. Records are grouped by pattern in input order,
    /// then sorted by document and position.
    pub fn locate<S: AsRef<str>>(&self, patterns: &[S]) -> Vec<MatchRecord> {
        patterns
            .iter()
            .enumerate()
            .flat_map(|(i, p)| self.records_for(i, p.as_ref()))
            .collect()
    }

    /// [`Index::locate`] with one rayon task per pattern. Same output.
    #[cfg(feature = "parallel")]
    pub fn locate_par<S: AsRef<str> + Sync>(&self, patterns: &[S]) -> Vec<MatchRecord> {
        let groups: Vec<Vec<MatchRecord>> = patterns
            .par_iter()
            .enumerate()
            .map(|(i, p)| self.records_for(i, p.as_ref()))
            .collect();
        groups.into_iter().flatten().collect()
    }

    // =========================================================================
    // PERSISTENCE
    // =========================================================================

    pub fn to_bytes(&self) -> Vec<u8> {
        let flags = FormatFlags::new().with_case_folded(!self.config.case_sensitive);
        binary::encode(&self.fm, &self.documents, flags)
    }

    /// Decode an index. The default folder is used for queries if the index
    /// is case-insensitive.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let decoded = binary::decode(bytes)?;
        let config = IndexConfig {
            sample_stride: decoded.header.sample_stride,
            case_sensitive: !decoded.header.flags.case_folded(),
        };
        Ok(Self {
            fm: decoded.fm,
            documents: decoded.documents,
            config,
            folder: Arc::new(UnicodeFolder),
        })
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = self.to_bytes();
        fs::write(path, &bytes).map_err(|e| FmError::io(path, e))?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "saved index");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| FmError::io(path, e))?;
        let index = Self::from_bytes(&bytes)?;
        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            strings = index.string_count(),
            "loaded index"
        );
        Ok(index)
    }
}
