// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Opaque handles to shared indexes.
//!
//! A handle is two numbers: the id of the registry that issued it and a slot
//! in that registry. Every operation looks the slot up under a read lock and
//! clones out an `Arc<Index>`, so:
//!
//! - a released handle fails with [`FmError::InvalidHandle`] instead of
//!   touching freed memory
//! - a handle from another registry fails the same way, even if the slot
//!   number happens to exist here
//! - a query that already holds its `Arc` finishes normally even if the
//!   handle is released concurrently
//!
//! Slots are never reused, so a stale handle cannot alias a newer index.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::engine::Index;
use crate::error::{FmError, Result};
use crate::types::{IndexConfig, IndexMeta, MatchRecord};

static NEXT_REGISTRY_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque reference to an index held by an [`IndexRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexHandle {
    registry: u64,
    slot: u64,
}

#[derive(Debug)]
pub struct IndexRegistry {
    id: u64,
    next_slot: AtomicU64,
    indexes: RwLock<HashMap<u64, Arc<Index>>>,
}

impl Default for IndexRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IndexRegistry {
    pub fn new() -> Self {
        Self {
            id: NEXT_REGISTRY_ID.fetch_add(1, Ordering::Relaxed),
            next_slot: AtomicU64::new(1),
            indexes: RwLock::new(HashMap::new()),
        }
    }

    /// Take ownership of a built index and hand out a handle to it.
    pub fn insert(&self, index: Index) -> IndexHandle {
        let slot = self.next_slot.fetch_add(1, Ordering::Relaxed);
        self.indexes.write().insert(slot, Arc::new(index));
        IndexHandle {
            registry: self.id,
            slot,
        }
    }

    /// The index behind `handle`, shared.
    pub fn get(&self, handle: IndexHandle) -> Result<Arc<Index>> {
        if handle.registry != self.id {
            return Err(FmError::invalid_handle(format!(
                "handle belongs to registry {}, not {}",
                handle.registry, self.id
            )));
        }
        self.indexes
            .read()
            .get(&handle.slot)
            .cloned()
            .ok_or_else(|| {
                FmError::invalid_handle(format!("index {} has been released", handle.slot))
            })
    }

    pub fn construct<S: AsRef<str>>(&self, corpus: &[S], case_sensitive: bool) -> Result<IndexHandle> {
        Ok(self.insert(Index::construct(corpus, case_sensitive)?))
    }

    pub fn construct_with<S: AsRef<str>>(
        &self,
        corpus: &[S],
        config: IndexConfig,
    ) -> Result<IndexHandle> {
        Ok(self.insert(Index::construct_with(corpus, config)?))
    }

    pub fn locate<S: AsRef<str>>(&self, handle: IndexHandle, patterns: &[S]) -> Result<Vec<MatchRecord>> {
        Ok(self.get(handle)?.locate(patterns))
    }

    pub fn meta(&self, handle: IndexHandle) -> Result<IndexMeta> {
        Ok(self.get(handle)?.meta())
    }

    pub fn save(&self, handle: IndexHandle, path: impl AsRef<Path>) -> Result<()> {
        self.get(handle)?.save(path)
    }

    pub fn load(&self, path: impl AsRef<Path>) -> Result<IndexHandle> {
        Ok(self.insert(Index::load(path)?))
    }

    /// Drop the registry's reference. Later calls with `handle` fail;
    /// releasing twice fails too.
    pub fn release(&self, handle: IndexHandle) -> Result<()> {
        self.get(handle)?;
        self.indexes
            .write()
            .remove(&handle.slot)
            .map(|_| ())
            .ok_or_else(|| {
                FmError::invalid_handle(format!("index {} has been released", handle.slot))
            })
    }

    /// Number of live indexes.
    pub fn len(&self) -> usize {
        self.indexes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.read().is_empty()
    }
}
