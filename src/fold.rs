// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Case folding for case-insensitive indexes.
//!
//! The index never looks inside a folder: it hands the corpus to
//! [`fold_case`] before concatenation and every query pattern to the same
//! folder before search. Anything implementing [`CaseFolder`] can be plugged
//! in through [`crate::Index::with_folder`].
//!
//! Folding may change byte lengths ("İ" lowercases to two code points), so
//! match positions on a case-insensitive index are byte positions in the
//! *folded* string.

use std::fmt;

#[cfg(feature = "unicode-normalization")]
use unicode_normalization::UnicodeNormalization;

/// Maps a string to its case-insensitive form. Must be deterministic.
pub trait CaseFolder: Send + Sync + fmt::Debug {
    fn fold(&self, value: &str) -> String;
}

/// Default folder.
///
/// # Algorithm (with unicode-normalization feature)
///
/// 1. NFC normalize, so "e" + U+0301 and "é" fold to the same bytes
/// 2. Lowercase
///
/// # Algorithm (without unicode-normalization)
///
/// 1. Lowercase only (assumes input is already NFC or ASCII)
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeFolder;

impl CaseFolder for UnicodeFolder {
    #[cfg(feature = "unicode-normalization")]
    fn fold(&self, value: &str) -> String {
        value.nfc().collect::<String>().to_lowercase()
    }

    #[cfg(not(feature = "unicode-normalization"))]
    fn fold(&self, value: &str) -> String {
        value.to_lowercase()
    }
}

/// ASCII-only lowercasing. Leaves every non-ASCII byte alone, so positions
/// in the folded corpus equal positions in the original.
#[derive(Debug, Default, Clone, Copy)]
pub struct AsciiFolder;

impl CaseFolder for AsciiFolder {
    fn fold(&self, value: &str) -> String {
        value.to_ascii_lowercase()
    }
}

/// Apply `folder` to every string, preserving order.
pub fn fold_case<S: AsRef<str>>(strings: &[S], folder: &dyn CaseFolder) -> Vec<String> {
    strings.iter().map(|s| folder.fold(s.as_ref())).collect()
}
