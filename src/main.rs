// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::io::{self, Write};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use fmindex::binary::{IndexFooter, MAGIC, VERSION};
use fmindex::{to_table, Index, IndexConfig};

mod cli;
use cli::display::{field, format_size, row, section_bot, section_mid, section_top, warn};
use cli::{Cli, Commands, OutputFormat};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            input,
            output,
            ignore_case,
            sample_stride,
            json,
        } => {
            let config = IndexConfig::default()
                .with_sample_stride(sample_stride)
                .with_case_sensitive(!ignore_case);
            run_build(&input, &output, config, json)
        }
        Commands::Locate {
            index,
            patterns,
            format,
        } => run_locate(&index, &patterns, format),
        Commands::Inspect { file } => run_inspect(&file),
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `-v` raises the default `warn` level.
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_corpus(path: &str, json: bool) -> Result<Vec<String>> {
    let text = fs::read_to_string(path).with_context(|| format!("reading corpus {}", path))?;
    if json {
        serde_json::from_str(&text).with_context(|| format!("parsing {} as a JSON array of strings", path))
    } else {
        Ok(text.lines().map(str::to_owned).collect())
    }
}

fn run_build(input: &str, output: &str, config: IndexConfig, json: bool) -> Result<()> {
    let start = Instant::now();
    let corpus = read_corpus(input, json)?;
    let index = Index::construct_with(&corpus, config).context("building index")?;
    index.save(output)?;

    let meta = index.meta();
    eprintln!(
        "✅ Built index of {} strings ({} text) into '{}' ({}) in {:.1} ms",
        meta.string_count,
        format_size(meta.text_len),
        output,
        format_size(meta.byte_size),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(())
}

fn run_locate(path: &str, patterns: &[String], format: OutputFormat) -> Result<()> {
    let index = Index::load(path)?;

    #[cfg(feature = "parallel")]
    let matches = index.locate_par(patterns);
    #[cfg(not(feature = "parallel"))]
    let matches = index.locate(patterns);

    let table = to_table(&matches);
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Tsv => table.write_tsv(&mut out)?,
        OutputFormat::Json => {
            serde_json::to_writer(&mut out, &table)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn run_inspect(path: &str) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path))?;
    if bytes.len() < 5 || bytes[..4] != MAGIC {
        bail!("{} is not an fmindex file", path);
    }
    if bytes[4] != VERSION {
        bail!(
            "{} uses format version {}, this build reads version {}",
            path,
            bytes[4],
            VERSION
        );
    }
    let index = Index::from_bytes(&bytes).with_context(|| format!("decoding {}", path))?;
    let crc32 = IndexFooter::read(&bytes)?.crc32;

    let meta = index.meta();
    let documents = index.documents();
    let lengths: Vec<usize> = (0..documents.len())
        .filter_map(|d| documents.document_range(d))
        .map(|r| r.len())
        .collect();
    let empty = lengths.iter().filter(|&&len| len == 0).count();

    section_top(path);
    field("format version", &VERSION.to_string());
    field("file size", &format_size(bytes.len()));
    field("crc32", &format!("{:#010x}", crc32));
    section_mid("CORPUS");
    field("strings", &meta.string_count.to_string());
    field("text", &format_size(meta.text_len));
    if let (Some(min), Some(max)) = (lengths.iter().min(), lengths.iter().max()) {
        field("shortest / longest", &format!("{} / {} B", min, max));
    }
    if empty > 0 {
        row(&format!(" {}", warn(&format!("{} empty strings", empty))));
    }
    section_mid("INDEX");
    field("case sensitive", &meta.case_sensitive.to_string());
    field("sample stride", &meta.sample_stride.to_string());
    field("suffix-array rows", &index.fm().rows().to_string());
    field("in memory", &format_size(index.fm().size_bytes()));
    if meta.text_len > 0 {
        field(
            "bits per text byte",
            &format!("{:.2}", bytes.len() as f64 * 8.0 / meta.text_len as f64),
        );
    }
    section_bot();
    Ok(())
}
