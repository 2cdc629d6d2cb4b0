// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Columnar view of locate results.
//!
//! Three equal-length columns, one row per match, values 1-based exactly as
//! in [`MatchRecord`]. Serializes to JSON as an object of arrays and prints as
//! tab-separated text with a header line.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::types::MatchRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTable {
    pub pattern_index: Vec<usize>,
    pub library_index: Vec<usize>,
    pub position: Vec<usize>,
}

/// Transpose match records into columns, keeping their order.
pub fn to_table(matches: &[MatchRecord]) -> MatchTable {
    let mut table = MatchTable {
        pattern_index: Vec::with_capacity(matches.len()),
        library_index: Vec::with_capacity(matches.len()),
        position: Vec::with_capacity(matches.len()),
    };
    for m in matches {
        table.pattern_index.push(m.pattern_index);
        table.library_index.push(m.document_index);
        table.position.push(m.position);
    }
    table
}

impl MatchTable {
    pub fn len(&self) -> usize {
        self.position.len()
    }

    pub fn is_empty(&self) -> bool {
        self.position.is_empty()
    }

    /// Rows back as records.
    pub fn rows(&self) -> impl Iterator<Item = MatchRecord> + '_ {
        self.pattern_index
            .iter()
            .zip(&self.library_index)
            .zip(&self.position)
            .map(|((&pattern_index, &document_index), &position)| MatchRecord {
                pattern_index,
                document_index,
                position,
            })
    }

    pub fn write_tsv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "pattern_index\tlibrary_index\tposition")?;
        for row in self.rows() {
            writeln!(
                out,
                "{}\t{}\t{}",
                row.pattern_index, row.document_index, row.position
            )?;
        }
        Ok(())
    }
}
