use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{BufferError, Result};

const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Growable byte buffer with an append-only write end and a movable read cursor.
///
/// All multi-byte values are big-endian. Reads never move the cursor when
/// they fail, so a caller can inspect [`read_offset`](Self::read_offset)
/// after a [`BufferError::MalformedStream`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteBuffer {
    data: BytesMut,
    read_offset: usize,
}

impl ByteBuffer {
    /// Create an empty buffer.
    pub fn new() -> Self {
        Self::with_capacity(INITIAL_BUFFER_CAPACITY)
    }

    /// Create an empty buffer with at least `capacity` bytes preallocated.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(capacity),
            read_offset: 0,
        }
    }

    /// Create a buffer holding a copy of `bytes`, cursor at the start.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            data: BytesMut::from(bytes),
            read_offset: 0,
        }
    }

    /// Total number of written bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Offset at which the next write lands.
    pub fn write_offset(&self) -> usize {
        self.data.len()
    }

    /// Offset of the next byte to be read.
    pub fn read_offset(&self) -> usize {
        self.read_offset
    }

    /// Move the read cursor. Offsets past the written end are rejected.
    pub fn set_read_offset(&mut self, offset: usize) -> Result<()> {
        if offset > self.data.len() {
            return Err(BufferError::OffsetOutOfBounds {
                offset,
                len: self.data.len(),
            });
        }
        self.read_offset = offset;
        Ok(())
    }

    /// Bytes between the read cursor and the write end.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.read_offset
    }

    /// All written bytes, including already-read ones.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Bytes not yet read.
    pub fn unread(&self) -> &[u8] {
        &self.data[self.read_offset..]
    }

    /// Drop everything and reset the cursor.
    pub fn clear(&mut self) {
        self.data.clear();
        self.read_offset = 0;
    }

    /// Shorten the written bytes to `len`, pulling the cursor back if needed.
    ///
    /// Has no effect when `len` is not below the current length.
    pub fn truncate(&mut self, len: usize) {
        self.data.truncate(len);
        self.read_offset = self.read_offset.min(self.data.len());
    }

    /// Release already-read bytes, shifting the cursor back to zero.
    pub fn discard_read(&mut self) {
        self.data.advance(self.read_offset);
        self.read_offset = 0;
    }

    /// Freeze the written bytes into an immutable [`Bytes`].
    pub fn freeze(self) -> Bytes {
        self.data.freeze()
    }

    /// Overwrite four already-written bytes at `offset` with `value`.
    ///
    /// Used to back-patch length markers once the encoded size is known.
    pub fn patch_i32(&mut self, offset: usize, value: i32) -> Result<()> {
        let end = offset.checked_add(4).unwrap_or(usize::MAX);
        if end > self.data.len() {
            return Err(BufferError::OffsetOutOfBounds {
                offset,
                len: self.data.len(),
            });
        }
        self.data[offset..end].copy_from_slice(&value.to_be_bytes());
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) {
        self.data.put_u8(u8::from(value));
    }

    pub fn write_i8(&mut self, value: i8) {
        self.data.put_i8(value);
    }

    pub fn write_i16(&mut self, value: i16) {
        self.data.put_i16(value);
    }

    pub fn write_i32(&mut self, value: i32) {
        self.data.put_i32(value);
    }

    pub fn write_i64(&mut self, value: i64) {
        self.data.put_i64(value);
    }

    pub fn write_f32(&mut self, value: f32) {
        self.data.put_f32(value);
    }

    pub fn write_f64(&mut self, value: f64) {
        self.data.put_f64(value);
    }

    /// Append raw bytes with no length prefix.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.put_slice(bytes);
    }

    /// Any non-zero byte reads as `true`.
    pub fn read_bool(&mut self) -> Result<bool> {
        let mut src = self.take(1)?;
        Ok(src.get_u8() != 0)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        let mut src = self.take(1)?;
        Ok(src.get_i8())
    }

    pub fn read_i16(&mut self) -> Result<i16> {
        let mut src = self.take(2)?;
        Ok(src.get_i16())
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let mut src = self.take(4)?;
        Ok(src.get_i32())
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let mut src = self.take(8)?;
        Ok(src.get_i64())
    }

    pub fn read_f32(&mut self) -> Result<f32> {
        let mut src = self.take(4)?;
        Ok(src.get_f32())
    }

    pub fn read_f64(&mut self) -> Result<f64> {
        let mut src = self.take(8)?;
        Ok(src.get_f64())
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn read_slice(&mut self, len: usize) -> Result<&[u8]> {
        self.take(len)
    }

    /// Copy out the next `len` bytes and advance past them.
    pub fn read_bytes(&mut self, len: usize) -> Result<Bytes> {
        self.take(len).map(Bytes::copy_from_slice)
    }

    fn take(&mut self, needed: usize) -> Result<&[u8]> {
        let remaining = self.remaining();
        if needed > remaining {
            return Err(BufferError::MalformedStream { needed, remaining });
        }
        let start = self.read_offset;
        self.read_offset += needed;
        Ok(&self.data[start..start + needed])
    }
}

impl From<Vec<u8>> for ByteBuffer {
    fn from(bytes: Vec<u8>) -> Self {
        Self {
            data: BytesMut::from(&bytes[..]),
            read_offset: 0,
        }
    }
}

impl From<&[u8]> for ByteBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_slice(bytes)
    }
}

impl AsRef<[u8]> for ByteBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
