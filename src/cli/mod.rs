// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the fmindex command-line interface.
//!
//! Three subcommands: `build` turns a corpus file into an index file,
//! `locate` queries one, and `inspect` prints what is inside.

pub mod display;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "fmindex",
    about = "Compressed exact substring search over a fixed corpus",
    version
)]
pub struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Tab-separated with a header line
    Tsv,
    /// One JSON object of three columns
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build an index from a corpus file
    Build {
        /// Corpus file: one string per line, or a JSON array with --json
        #[arg(short, long)]
        input: String,

        /// Output index file
        #[arg(short, long)]
        output: String,

        /// Fold case of corpus and queries
        #[arg(long)]
        ignore_case: bool,

        /// Keep one suffix-array sample per this many text offsets
        #[arg(long, default_value_t = fmindex::DEFAULT_SAMPLE_STRIDE)]
        sample_stride: u32,

        /// Read the corpus as a JSON array of strings
        #[arg(long)]
        json: bool,
    },

    /// Find every occurrence of one or more patterns
    Locate {
        /// Index file written by `build`
        index: String,

        /// Patterns to search for
        #[arg(required = true)]
        patterns: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "tsv")]
        format: OutputFormat,
    },

    /// Inspect an index file
    Inspect {
        /// Path to index file
        file: String,
    },
}
