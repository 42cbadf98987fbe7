//! Bounds-checked reading of packed wire fields.

use super::{Error, Result};

/// A cursor over an immutable byte view that advances by explicit field
/// widths and fails with a structured error on any out-of-range access.
///
/// Multi-octet fields are little-endian, as everywhere in IEEE 802.15.4.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    buffer: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    /// Create a new [`Cursor`] at the start of the given buffer.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Octets consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Octets left to read.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let field = self
            .buffer
            .get(self.position..self.position + len)
            .ok_or(Error::UnexpectedEnd)?;
        self.position += len;
        Ok(field)
    }

    /// Read a single octet.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a 16-bit little-endian value.
    pub fn read_u16_le(&mut self) -> Result<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Read a 64-bit little-endian value.
    pub fn read_u64_le(&mut self) -> Result<u64> {
        let b = self.take(8)?;
        let mut raw = [0u8; 8];
        raw.copy_from_slice(b);
        Ok(u64::from_le_bytes(raw))
    }

    /// Skip `len` octets without interpreting them.
    pub fn skip(&mut self, len: usize) -> Result<()> {
        self.take(len).map(|_| ())
    }
}
