//! Owned byte buffer with bounds-checked big-endian access.
//!
//! Every TrueType table is held in a [`BinaryTableData`]. Reads take an
//! absolute offset inside the table and fail with [`Error::OutOfBounds`]
//! instead of touching memory past the end of the buffer. Writes append to
//! the buffer and report the number of bytes written so callers can keep a
//! running offset while assembling a new table.

use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

/// An owned, length-known table buffer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinaryTableData {
    data: Vec<u8>,
}

impl BinaryTableData {
    /// Wrap an existing buffer.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Create an empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Copy `length` bytes starting at `offset` out of `source`.
    pub fn copy_from(source: &[u8], offset: usize, length: usize) -> Result<Self> {
        let end = offset
            .checked_add(length)
            .filter(|&end| end <= source.len())
            .ok_or_else(|| Error::out_of_bounds(offset, length, source.len()))?;
        Ok(Self::new(source[offset..end].to_vec()))
    }

    /// Buffer length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer, returning the raw bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    fn range(&self, offset: usize, len: usize) -> Result<&[u8]> {
        match offset.checked_add(len) {
            Some(end) if end <= self.data.len() => Ok(&self.data[offset..end]),
            _ => Err(Error::out_of_bounds(offset, len, self.data.len())),
        }
    }

    fn range_mut(&mut self, offset: usize, len: usize) -> Result<&mut [u8]> {
        let size = self.data.len();
        match offset.checked_add(len) {
            Some(end) if end <= size => Ok(&mut self.data[offset..end]),
            _ => Err(Error::out_of_bounds(offset, len, size)),
        }
    }

    /// Borrow `len` bytes at `offset`.
    pub fn read_bytes(&self, offset: usize, len: usize) -> Result<&[u8]> {
        self.range(offset, len)
    }

    /// Read an unsigned byte.
    pub fn read_u8(&self, offset: usize) -> Result<u8> {
        Ok(self.range(offset, 1)?[0])
    }

    /// Read a big-endian `uint16`.
    pub fn read_ushort(&self, offset: usize) -> Result<u16> {
        Ok(BigEndian::read_u16(self.range(offset, 2)?))
    }

    /// Read a big-endian `int16`.
    pub fn read_short(&self, offset: usize) -> Result<i16> {
        Ok(BigEndian::read_i16(self.range(offset, 2)?))
    }

    /// Read a big-endian `uint32`.
    pub fn read_ulong(&self, offset: usize) -> Result<u32> {
        Ok(BigEndian::read_u32(self.range(offset, 4)?))
    }

    /// Read a big-endian `int32`.
    pub fn read_long(&self, offset: usize) -> Result<i32> {
        Ok(BigEndian::read_i32(self.range(offset, 4)?))
    }

    /// Read a 16.16 fixed-point number.
    pub fn read_fixed(&self, offset: usize) -> Result<f64> {
        Ok(self.read_long(offset)? as f64 / 65536.0)
    }

    /// Append a byte. Returns the number of bytes written.
    pub fn write_u8(&mut self, value: u8) -> usize {
        self.data.push(value);
        1
    }

    /// Append a big-endian `uint16`. Returns the number of bytes written.
    pub fn write_ushort(&mut self, value: u16) -> usize {
        let mut buf = [0u8; 2];
        BigEndian::write_u16(&mut buf, value);
        self.data.extend_from_slice(&buf);
        2
    }

    /// Append a big-endian `int16`. Returns the number of bytes written.
    pub fn write_short(&mut self, value: i16) -> usize {
        self.write_ushort(value as u16)
    }

    /// Append a big-endian `uint32`. Returns the number of bytes written.
    pub fn write_ulong(&mut self, value: u32) -> usize {
        let mut buf = [0u8; 4];
        BigEndian::write_u32(&mut buf, value);
        self.data.extend_from_slice(&buf);
        4
    }

    /// Append raw bytes. Returns the number of bytes written.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> usize {
        self.data.extend_from_slice(bytes);
        bytes.len()
    }

    /// Append zero bytes until the length is a multiple of four.
    pub fn pad_to_long(&mut self) -> usize {
        let pad = (4 - self.data.len() % 4) % 4;
        self.data.resize(self.data.len() + pad, 0);
        pad
    }

    /// Overwrite a big-endian `uint16` in place.
    pub fn set_ushort(&mut self, offset: usize, value: u16) -> Result<()> {
        BigEndian::write_u16(self.range_mut(offset, 2)?, value);
        Ok(())
    }

    /// Overwrite a big-endian `uint32` in place.
    pub fn set_ulong(&mut self, offset: usize, value: u32) -> Result<()> {
        BigEndian::write_u32(self.range_mut(offset, 4)?, value);
        Ok(())
    }

    /// Truncate the buffer to `len` bytes.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
    }

    /// Table checksum over the whole buffer.
    pub fn checksum(&self) -> u32 {
        checksum(&self.data)
    }
}

impl From<Vec<u8>> for BinaryTableData {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

/// Wrapping sum of big-endian 32-bit words; a short tail is zero-padded.
pub fn checksum(bytes: &[u8]) -> u32 {
    let mut chunks = bytes.chunks_exact(4);
    let mut sum = chunks
        .by_ref()
        .fold(0u32, |acc, word| acc.wrapping_add(BigEndian::read_u32(word)));

    let tail = chunks.remainder();
    if !tail.is_empty() {
        let mut last = [0u8; 4];
        last[..tail.len()].copy_from_slice(tail);
        sum = sum.wrapping_add(BigEndian::read_u32(&last));
    }
    sum
}
