// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary format header and footer structures.
//!
//! The header is 24 bytes of fixed-size fields, parsed before anything else.
//! It carries the format version (checked, never reinterpreted), the flags
//! the index was built with, and the two lengths every section depends on.
//!
//! The footer is 8 bytes: a CRC32 checksum over everything before it, plus a
//! magic number ("XIMF", the header magic reversed). If the footer is wrong,
//! something got corrupted or truncated. Don't trust the data.

use crc32fast::Hasher as Crc32Hasher;

use super::encoding::{ByteReader, ByteWriter};
use crate::error::{FmError, Result};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Magic bytes: "FMIX" in ASCII (header)
pub const MAGIC: [u8; 4] = *b"FMIX";

/// Footer magic: "XIMF" (reversed, marks valid file end)
pub const FOOTER_MAGIC: [u8; 4] = *b"XIMF";

/// Current format version
pub const VERSION: u8 = 1;

// ============================================================================
// FLAGS
// ============================================================================

/// Format flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormatFlags(pub(crate) u8);

impl FormatFlags {
    /// Corpus was case-folded at build time; queries must be folded too.
    pub const CASE_FOLDED: u8 = 0b0000_0001;

    const KNOWN: u8 = Self::CASE_FOLDED;

    pub fn new() -> Self {
        Self(0)
    }

    pub fn with_case_folded(mut self, folded: bool) -> Self {
        if folded {
            self.0 |= Self::CASE_FOLDED;
        } else {
            self.0 &= !Self::CASE_FOLDED;
        }
        self
    }

    pub fn case_folded(self) -> bool {
        self.0 & Self::CASE_FOLDED != 0
    }
}

// ============================================================================
// HEADER
// ============================================================================

/// Binary format header (24 bytes fixed size)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexHeader {
    pub version: u8,
    pub flags: FormatFlags,
    pub sample_stride: u32,
    pub doc_count: u32,
    pub text_len: u64,
}

impl IndexHeader {
    // 4 (magic) + 1 (version) + 1 (flags) + 2 (reserved) + 4 + 4 + 8 = 24
    pub const SIZE: usize = 24;

    pub fn write(&self, w: &mut ByteWriter) {
        w.bytes(&MAGIC);
        w.u8(self.version);
        w.u8(self.flags.0);
        w.bytes(&[0u8; 2]); // reserved
        w.u32(self.sample_stride);
        w.u32(self.doc_count);
        w.u64(self.text_len);
    }

    /// Parse and validate the header. Rejects foreign magic, any version other
    /// than [`VERSION`], and unknown flag bits.
    pub fn read(r: &mut ByteReader<'_>) -> Result<Self> {
        let magic = r.take(4, "magic")?;
        if magic != MAGIC {
            return Err(FmError::corrupt(format!(
                "invalid magic: expected FMIX, got {:?}",
                magic
            )));
        }
        let version = r.u8("version")?;
        if version != VERSION {
            return Err(FmError::corrupt(format!(
                "unsupported format version {} (this build reads version {})",
                version, VERSION
            )));
        }
        let flags = r.u8("flags")?;
        if flags & !FormatFlags::KNOWN != 0 {
            return Err(FmError::corrupt(format!("unknown format flags {:#010b}", flags)));
        }
        r.take(2, "reserved")?;

        Ok(Self {
            version,
            flags: FormatFlags(flags),
            sample_stride: r.u32("sample_stride")?,
            doc_count: r.u32("doc_count")?,
            text_len: r.u64("text_len")?,
        })
    }
}

// ============================================================================
// FOOTER (8 bytes)
// ============================================================================

/// Footer with CRC32 checksum and magic number
#[derive(Debug, Clone)]
pub struct IndexFooter {
    /// CRC32 checksum of header + all sections (everything before footer)
    pub crc32: u32,
}

impl IndexFooter {
    pub const SIZE: usize = 8; // 4 bytes CRC32 + 4 bytes magic

    pub fn write(&self, w: &mut ByteWriter) {
        w.u32(self.crc32);
        w.bytes(&FOOTER_MAGIC);
    }

    /// Read the footer from the last 8 bytes of a blob.
    pub fn read(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::SIZE {
            return Err(FmError::corrupt("input too short for footer"));
        }
        let footer_start = bytes.len() - Self::SIZE;
        let magic = &bytes[footer_start + 4..];
        if magic != FOOTER_MAGIC {
            return Err(FmError::corrupt(format!(
                "invalid footer magic: expected XIMF, got {:?} (truncated file?)",
                magic
            )));
        }
        let crc32 = u32::from_le_bytes([
            bytes[footer_start],
            bytes[footer_start + 1],
            bytes[footer_start + 2],
            bytes[footer_start + 3],
        ]);
        Ok(Self { crc32 })
    }

    /// Compute CRC32 over the given bytes
    pub fn compute_crc32(data: &[u8]) -> u32 {
        let mut hasher = Crc32Hasher::new();
        hasher.update(data);
        hasher.finalize()
    }
}
