//! Append-only byte accumulator

use alloc::vec::Vec;

use crate::varint;

/// Growable byte sequence that preserves every byte value exactly
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteSink {
    buf: Vec<u8>,
}

impl ByteSink {
    /// Create an empty sink
    #[inline]
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Append a single byte
    #[inline]
    pub fn put_u8(&mut self, value: u8) {
        self.buf.push(value);
    }

    /// Append raw bytes without length prefix
    #[inline]
    pub fn put_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Append variable-length bytes with varint length prefix
    #[inline]
    pub fn put_varbytes(&mut self, bytes: &[u8]) {
        self.put_varint(bytes.len() as u64);
        self.put_bytes(bytes);
    }

    /// Append a varint-encoded u64
    #[inline]
    pub fn put_varint(&mut self, value: u64) {
        varint::write_u64(value, &mut self.buf);
    }

    /// Number of bytes written so far
    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True when nothing has been written
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Snapshot of the accumulated bytes
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the sink and return its bytes
    #[inline]
    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }
}
