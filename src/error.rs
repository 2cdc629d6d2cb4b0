// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error type shared by every public operation.
//!
//! Four kinds, and callers can tell them apart: a corpus that cannot be
//! indexed, a handle that no longer points at anything, a filesystem failure,
//! and bytes that do not decode into a valid index. "Pattern not found" is
//! not an error. It is an empty result.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced while building, querying, persisting or loading an index.
#[derive(Debug, Error)]
pub enum FmError {
    /// The corpus or configuration cannot be turned into an index
    /// (reserved sentinel byte in the input, text too long, stride of zero).
    #[error("construction failed: {0}")]
    Construction(String),

    /// The handle was released, or was issued by a different registry.
    #[error("invalid index handle: {0}")]
    InvalidHandle(String),

    /// Reading or writing an index file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Persisted bytes are truncated, corrupt or from another format version.
    #[error("invalid index data: {0}")]
    Deserialization(String),
}

impl FmError {
    pub(crate) fn construction(msg: impl Into<String>) -> Self {
        Self::Construction(msg.into())
    }

    pub(crate) fn corrupt(msg: impl Into<String>) -> Self {
        Self::Deserialization(msg.into())
    }

    pub(crate) fn invalid_handle(msg: impl Into<String>) -> Self {
        Self::InvalidHandle(msg.into())
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, FmError>;
