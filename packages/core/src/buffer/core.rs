//! Core `ChunkBuffer` implementation
//!
//! Contains the buffer struct and its append path. Bytes are addressed by
//! absolute offset; `base` is the offset of the first retained byte.

use bytes::{Bytes, BytesMut};

use super::capacity::CapacityManager;

/// Append-only byte window over chunked input
///
/// Holds every byte from the earliest one still needed up to the last byte
/// appended. The read cursor sits somewhere inside that window; bytes between
/// `base` and the cursor are kept only while something (an unfinished token or
/// an open match) still refers to them.
#[derive(Debug)]
pub struct ChunkBuffer {
    /// Retained bytes, `buffer[0]` is at absolute offset `base`
    pub(super) buffer: BytesMut,
    /// Absolute offset of the first retained byte
    pub(super) base: usize,
    /// Absolute offset of the next unread byte
    pub(super) cursor: usize,
    /// Total bytes appended since creation
    pub(super) total_appended: u64,
    pub(super) capacity_manager: CapacityManager,
}

impl ChunkBuffer {
    /// Create new chunk buffer with specified initial capacity
    ///
    /// # Arguments
    ///
    /// * `capacity` - Initial buffer capacity in bytes
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: BytesMut::with_capacity(capacity),
            base: 0,
            cursor: 0,
            total_appended: 0,
            capacity_manager: CapacityManager::new(capacity),
        }
    }

    /// Create buffer with the default 8KB capacity
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(8192)
    }

    /// Append a chunk to the end of the logical input
    ///
    /// Empty chunks are accepted and change nothing.
    pub fn append(&mut self, chunk: &[u8]) {
        if chunk.is_empty() {
            return;
        }
        self.total_appended += chunk.len() as u64;

        if self.buffer.capacity() - self.buffer.len() < chunk.len() {
            self.capacity_manager
                .ensure_capacity(&mut self.buffer, chunk.len());
        }

        self.buffer.extend_from_slice(chunk);
    }

    /// Append an owned chunk
    #[inline]
    pub fn append_chunk(&mut self, chunk: Bytes) {
        self.append(&chunk);
    }

    /// Drop all retained bytes and restart offsets at zero
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.base = 0;
        self.cursor = 0;
        self.total_appended = 0;
        self.capacity_manager.reset();
    }
}

impl Default for ChunkBuffer {
    fn default() -> Self {
        Self::new()
    }
}
