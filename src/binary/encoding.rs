// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-width little-endian encoding primitives.
//!
//! Every integer in the format has a fixed width, so the layout can be read
//! with a hex dump and a ruler. The reader is a bounds-checked cursor: each
//! read names the field it was after, so a truncated file reports *which*
//! field ran out instead of a bare "unexpected EOF".

use crate::error::{FmError, Result};

/// Append-only little-endian writer.
#[derive(Debug, Default)]
pub struct ByteWriter {
    buf: Vec<u8>,
}

impl ByteWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn bytes(&mut self, b: &[u8]) {
        self.buf.extend_from_slice(b);
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.buf
    }
}

/// Bounds-checked little-endian cursor.
#[derive(Debug)]
pub struct ByteReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    /// Next `n` bytes, or a truncation error naming `field`.
    pub fn take(&mut self, n: usize, field: &str) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(n)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| {
                FmError::corrupt(format!(
                    "truncated input reading {} at byte {} (need {}, have {})",
                    field,
                    self.pos,
                    n,
                    self.remaining()
                ))
            })?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, field: &str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    pub fn u8(&mut self, field: &str) -> Result<u8> {
        Ok(self.take(1, field)?[0])
    }

    pub fn u16(&mut self, field: &str) -> Result<u16> {
        self.array(field).map(u16::from_le_bytes)
    }

    pub fn u32(&mut self, field: &str) -> Result<u32> {
        self.array(field).map(u32::from_le_bytes)
    }

    pub fn u64(&mut self, field: &str) -> Result<u64> {
        self.array(field).map(u64::from_le_bytes)
    }

    /// Read an element count and check that `count * elem_size` bytes are
    /// actually left, before anything gets allocated for them.
    pub fn count(&mut self, field: &str, elem_size: usize) -> Result<usize> {
        let count = self.u64(field)?;
        let count = usize::try_from(count)
            .map_err(|_| FmError::corrupt(format!("{} count {} overflows", field, count)))?;
        let needed = count.checked_mul(elem_size).ok_or_else(|| {
            FmError::corrupt(format!("{} count {} overflows", field, count))
        })?;
        if needed > self.remaining() {
            return Err(FmError::corrupt(format!(
                "{} count {} exceeds available bytes {}",
                field,
                count,
                self.remaining()
            )));
        }
        Ok(count)
    }

    /// Fail if anything is left unread.
    pub fn finish(&self, section: &str) -> Result<()> {
        if self.remaining() != 0 {
            return Err(FmError::corrupt(format!(
                "{} trailing bytes after {}",
                self.remaining(),
                section
            )));
        }
        Ok(())
    }
}
