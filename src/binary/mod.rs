// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format for FM-index files.
//!
//! Hand-written, field by field, fixed-width little-endian. No generic
//! serialization framework sits between the structures and the bytes, so the
//! layout below is the whole story and stays stable across refactors.
//!
//! Decoding is all-or-nothing: every section is validated and cross-checked
//! before an [`FmIndex`] is assembled. A corrupt file never produces a
//! half-working index.
//!
//! # Security Considerations
//!
//! Files may come from anywhere:
//! - Every element count is checked against the bytes actually remaining
//!   before allocating
//! - The CRC32 footer catches corruption and truncation
//! - Structural checks (monotonic C-array and boundaries, sample coverage,
//!   per-symbol counts) catch malformed sections
//! - One full LF walk checks that the samples agree with the rank index
//!
//! # Format Overview (v1)
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │ HEADER (24 bytes)                                          │
//! │   magic: [u8; 4] = "FMIX"                                  │
//! │   version: u8 = 1                                          │
//! │   flags: u8 (bit 0: case folded)                           │
//! │   reserved: [u8; 2]                                        │
//! │   sample_stride: u32, doc_count: u32, text_len: u64        │
//! ├────────────────────────────────────────────────────────────┤
//! │ C-ARRAY: 257 × u64                                         │
//! ├────────────────────────────────────────────────────────────┤
//! │ RANK INDEX (wavelet matrix over the BWT)                   │
//! │   alphabet_len: u16, alphabet: [u8; alphabet_len]          │
//! │   seq_len: u64, level_count: u8                            │
//! │   level_count × ceil(seq_len / 64) × u64                   │
//! ├────────────────────────────────────────────────────────────┤
//! │ SAMPLES: sample_count: u64, (row: u32, offset: u32) pairs  │
//! ├────────────────────────────────────────────────────────────┤
//! │ BOUNDARIES: boundary_count: u64, u32 cumulative ends       │
//! ├────────────────────────────────────────────────────────────┤
//! │ FOOTER (8 bytes): crc32 + magic "XIMF"                     │
//! └────────────────────────────────────────────────────────────┘
//! ```

mod encoding;
mod header;

pub use encoding::{ByteReader, ByteWriter};
pub use header::{FormatFlags, IndexFooter, IndexHeader, FOOTER_MAGIC, MAGIC, VERSION};

use crate::corpus::{DocumentMap, MAX_TEXT_LEN};
use crate::error::{FmError, Result};
use crate::index::{CArray, FmIndex, RankBitVec, SampledSuffixArray, WaveletMatrix};

/// Largest file `decode` will look at (64 GiB).
pub const MAX_FILE_SIZE: u64 = 64 << 30;

/// Entries in the persisted C-array (256 symbols + total).
const C_ARRAY_LEN: usize = 257;

/// Everything a decoded file contains.
#[derive(Debug, Clone)]
pub struct DecodedIndex {
    pub header: IndexHeader,
    pub fm: FmIndex,
    pub documents: DocumentMap,
}

// ============================================================================
// ENCODE
// ============================================================================

/// Encode an index and its boundary table into one versioned blob.
pub fn encode(fm: &FmIndex, documents: &DocumentMap, flags: FormatFlags) -> Vec<u8> {
    let header = IndexHeader {
        version: VERSION,
        flags,
        sample_stride: fm.sample_stride(),
        doc_count: documents.len() as u32,
        text_len: fm.text_len() as u64,
    };

    let mut w = ByteWriter::with_capacity(encoded_len(fm, documents));
    header.write(&mut w);

    for &value in fm.c_array().as_slice() {
        w.u64(value);
    }

    let rank_index = fm.rank_index();
    w.u16(rank_index.alphabet().len() as u16);
    w.bytes(rank_index.alphabet());
    w.u64(rank_index.len() as u64);
    w.u8(rank_index.levels().len() as u8);
    for level in rank_index.levels() {
        for &word in level.words() {
            w.u64(word);
        }
    }

    let samples = fm.samples();
    w.u64(samples.len() as u64);
    for (row, offset) in samples.pairs() {
        w.u32(row);
        w.u32(offset);
    }

    w.u64(documents.len() as u64);
    for &end in documents.boundaries() {
        w.u32(end);
    }

    let crc32 = IndexFooter::compute_crc32(w.as_slice());
    IndexFooter { crc32 }.write(&mut w);
    w.into_inner()
}

/// Exact size of what [`encode`] would produce, without encoding.
pub fn encoded_len(fm: &FmIndex, documents: &DocumentMap) -> usize {
    let rank_index = fm.rank_index();
    let level_bytes: usize = rank_index.levels().iter().map(|l| l.words().len() * 8).sum();
    IndexHeader::SIZE
        + C_ARRAY_LEN * 8
        + 2
        + rank_index.alphabet().len()
        + 8
        + 1
        + level_bytes
        + 8
        + fm.samples().len() * 8
        + 8
        + documents.len() * 4
        + IndexFooter::SIZE
}

// ============================================================================
// DECODE
// ============================================================================

/// Decode and validate a blob produced by [`encode`].
///
/// # Validation
///
/// 1. Size is within [`MAX_FILE_SIZE`] and holds at least header + footer
/// 2. Footer magic is "XIMF" and the CRC32 matches
/// 3. Header magic, version and flags (see [`IndexHeader::read`])
/// 4. Every section is complete and structurally valid
/// 5. No bytes are left between the last section and the footer
pub fn decode(bytes: &[u8]) -> Result<DecodedIndex> {
    if bytes.len() as u64 > MAX_FILE_SIZE {
        return Err(FmError::corrupt(format!(
            "file too large: {} bytes (max {})",
            bytes.len(),
            MAX_FILE_SIZE
        )));
    }
    let min_size = IndexHeader::SIZE + IndexFooter::SIZE;
    if bytes.len() < min_size {
        return Err(FmError::corrupt(format!(
            "file too small: {} bytes (minimum {})",
            bytes.len(),
            min_size
        )));
    }

    // Footer first: no point parsing a body we can't trust
    let footer = IndexFooter::read(bytes)?;
    let content = &bytes[..bytes.len() - IndexFooter::SIZE];
    let computed = IndexFooter::compute_crc32(content);
    if footer.crc32 != computed {
        return Err(FmError::corrupt(format!(
            "CRC32 mismatch: expected {:#010x}, got {:#010x} (file corrupted)",
            footer.crc32, computed
        )));
    }

    let mut r = ByteReader::new(content);
    let header = IndexHeader::read(&mut r)?;
    if header.sample_stride == 0 {
        return Err(FmError::corrupt("sample stride is 0"));
    }
    let text_len = usize::try_from(header.text_len)
        .ok()
        .filter(|&len| len <= MAX_TEXT_LEN)
        .ok_or_else(|| {
            FmError::corrupt(format!(
                "text length {} exceeds the maximum of {}",
                header.text_len, MAX_TEXT_LEN
            ))
        })?;
    let rows = text_len + 1;

    let c_array = read_c_array(&mut r, text_len)?;
    let rank_index = read_rank_index(&mut r, rows)?;
    let samples = read_samples(&mut r, header.sample_stride, rows)?;
    let documents = read_boundaries(&mut r, header.doc_count, text_len)?;
    r.finish("boundary table")?;

    let fm = FmIndex::from_parts(rank_index, c_array, samples, text_len)?;

    tracing::debug!(
        text_len,
        documents = documents.len(),
        stride = header.sample_stride,
        "decoded FM-index"
    );

    Ok(DecodedIndex {
        header,
        fm,
        documents,
    })
}

fn read_c_array(r: &mut ByteReader<'_>, text_len: usize) -> Result<CArray> {
    let mut values = Vec::with_capacity(C_ARRAY_LEN);
    for _ in 0..C_ARRAY_LEN {
        values.push(r.u64("C-array")?);
    }
    CArray::from_raw(&values, text_len)
}

fn read_rank_index(r: &mut ByteReader<'_>, rows: usize) -> Result<WaveletMatrix> {
    let alphabet_len = r.u16("alphabet length")? as usize;
    if alphabet_len > 256 {
        return Err(FmError::corrupt(format!(
            "alphabet of {} symbols exceeds 256",
            alphabet_len
        )));
    }
    let alphabet = r.take(alphabet_len, "alphabet")?.to_vec();

    let seq_len = r.u64("rank index length")?;
    if seq_len != rows as u64 {
        return Err(FmError::corrupt(format!(
            "rank index covers {} rows, text needs {}",
            seq_len, rows
        )));
    }

    let level_count = r.u8("level count")? as usize;
    let words_per_level = rows.div_ceil(64);
    let level_bytes = words_per_level * 8;
    if level_count.saturating_mul(level_bytes) > r.remaining() {
        return Err(FmError::corrupt(format!(
            "{} rank index levels exceed available bytes {}",
            level_count,
            r.remaining()
        )));
    }

    let mut levels = Vec::with_capacity(level_count);
    for level in 0..level_count {
        let mut words = Vec::with_capacity(words_per_level);
        for _ in 0..words_per_level {
            words.push(r.u64("rank index level")?);
        }
        levels.push(RankBitVec::from_words(words, rows).map_err(|e| {
            FmError::corrupt(format!("rank index level {}: {}", level, e))
        })?);
    }

    WaveletMatrix::from_parts(alphabet, rows, levels)
}

fn read_samples(r: &mut ByteReader<'_>, stride: u32, rows: usize) -> Result<SampledSuffixArray> {
    let count = r.count("sample count", 8)?;
    let mut pairs = Vec::with_capacity(count);
    for _ in 0..count {
        let row = r.u32("sample row")?;
        let offset = r.u32("sample offset")?;
        pairs.push((row, offset));
    }
    SampledSuffixArray::from_pairs(stride, rows, &pairs)
}

fn read_boundaries(r: &mut ByteReader<'_>, doc_count: u32, text_len: usize) -> Result<DocumentMap> {
    let count = r.count("boundary count", 4)?;
    if count != doc_count as usize {
        return Err(FmError::corrupt(format!(
            "header declares {} documents, boundary table has {}",
            doc_count, count
        )));
    }
    let mut ends = Vec::with_capacity(count);
    for _ in 0..count {
        ends.push(r.u32("boundary")?);
    }
    DocumentMap::from_boundaries(ends, text_len)
}
