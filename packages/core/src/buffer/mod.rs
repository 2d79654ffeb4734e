//! Chunk buffer for incremental JSON tokenization
//!
//! Accumulates upstream chunks into one logical byte sequence, hands bytes to
//! the tokenizer through a cursor, and releases the prefix nobody needs any
//! more. Running out of unread bytes is not an error: `peek` returning `None`
//! is the point where the reader suspends and asks upstream for another chunk.

mod capacity;
mod core;
mod span;

pub use self::core::ChunkBuffer;

use bytes::{Buf, Bytes};
pub use span::Span;

use crate::telemetry::BufferStats;

impl ChunkBuffer {
    /// Next unread byte, or `None` when more input is needed
    #[inline]
    #[must_use]
    pub fn peek(&self) -> Option<u8> {
        self.buffer.get(self.cursor - self.base).copied()
    }

    /// Byte at an absolute offset, if still retained and already appended
    #[inline]
    #[must_use]
    pub fn peek_at(&self, offset: usize) -> Option<u8> {
        offset
            .checked_sub(self.base)
            .and_then(|index| self.buffer.get(index).copied())
    }

    /// All appended bytes not yet read
    #[inline]
    #[must_use]
    pub fn unread(&self) -> &[u8] {
        &self.buffer[self.cursor - self.base..]
    }

    /// Move the cursor forward over `count` unread bytes
    #[inline]
    pub fn advance(&mut self, count: usize) {
        debug_assert!(count <= self.unread().len(), "advance past appended input");
        self.cursor += count;
    }

    /// Absolute offset of the next unread byte
    #[inline]
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Absolute offset of the first retained byte
    #[inline]
    #[must_use]
    pub fn base_offset(&self) -> usize {
        self.base
    }

    /// Absolute offset one past the last appended byte
    #[inline]
    #[must_use]
    pub fn end_offset(&self) -> usize {
        self.base + self.buffer.len()
    }

    /// Bytes kept behind the cursor for unfinished tokens or open matches
    #[inline]
    #[must_use]
    pub fn retained_behind_cursor(&self) -> usize {
        self.cursor - self.base
    }

    /// Release every byte before `up_to`
    ///
    /// The offset is clamped to the cursor, so unread input is never dropped.
    /// Callers pass the earliest offset they still need.
    pub fn mark_consumed(&mut self, up_to: usize) {
        let up_to = up_to.min(self.cursor);
        if up_to <= self.base {
            return;
        }
        self.buffer.advance(up_to - self.base);
        self.base = up_to;
        self.capacity_manager.maybe_shrink(&mut self.buffer);
    }

    /// Borrow a retained span
    ///
    /// Returns `None` when any part of the span was released or not yet appended.
    #[must_use]
    pub fn slice(&self, span: Span) -> Option<&[u8]> {
        if span.start < self.base || span.end > self.end_offset() || span.start > span.end {
            return None;
        }
        Some(&self.buffer[span.start - self.base..span.end - self.base])
    }

    /// Copy a retained span out of the buffer
    #[must_use]
    pub fn copy_span(&self, span: Span) -> Option<Bytes> {
        self.slice(span).map(Bytes::copy_from_slice)
    }

    /// Retained byte count (read and unread)
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Get buffer utilization statistics for monitoring
    #[must_use]
    pub fn stats(&self) -> BufferStats {
        BufferStats {
            retained: self.buffer.len(),
            unread: self.buffer.len() - (self.cursor - self.base),
            capacity: self.buffer.capacity(),
            total_appended: self.total_appended,
            released: self.base as u64,
        }
    }
}

#[cfg(test)]
mod buffer_tests {
    use super::*;

    #[test]
    fn test_buffer_creation() {
        let buffer = ChunkBuffer::with_capacity(1024);
        assert!(buffer.is_empty());
        assert!(buffer.capacity() >= 1024);
        assert_eq!(buffer.peek(), None);
    }

    #[test]
    fn test_chunks_form_one_logical_sequence() {
        let mut buffer = ChunkBuffer::new();
        buffer.append(b"hel");
        buffer.append(b"");
        buffer.append_chunk(Bytes::from_static(b"lo"));

        assert_eq!(buffer.unread(), b"hello");
        assert_eq!(buffer.end_offset(), 5);
        assert_eq!(buffer.stats().total_appended, 5);
    }

    #[test]
    fn test_cursor_and_peek() {
        let mut buffer = ChunkBuffer::new();
        buffer.append(b"ab");
        assert_eq!(buffer.peek(), Some(b'a'));
        buffer.advance(2);
        assert_eq!(buffer.peek(), None);
        assert_eq!(buffer.cursor(), 2);

        buffer.append(b"c");
        assert_eq!(buffer.peek(), Some(b'c'));
        assert_eq!(buffer.peek_at(0), Some(b'a'));
    }

    #[test]
    fn test_mark_consumed_keeps_offsets_absolute() {
        let mut buffer = ChunkBuffer::new();
        buffer.append(b"0123456789");
        buffer.advance(6);
        buffer.mark_consumed(4);

        assert_eq!(buffer.base_offset(), 4);
        assert_eq!(buffer.retained_behind_cursor(), 2);
        assert_eq!(buffer.peek_at(3), None);
        assert_eq!(buffer.peek_at(4), Some(b'4'));
        assert_eq!(buffer.slice(Span::new(4, 8)), Some(&b"4567"[..]));
        assert_eq!(buffer.slice(Span::new(2, 8)), None);
    }

    #[test]
    fn test_mark_consumed_never_passes_cursor() {
        let mut buffer = ChunkBuffer::new();
        buffer.append(b"abcdef");
        buffer.advance(2);
        buffer.mark_consumed(100);

        assert_eq!(buffer.base_offset(), 2);
        assert_eq!(buffer.unread(), b"cdef");
    }

    #[test]
    fn test_copy_span_outlives_release() {
        let mut buffer = ChunkBuffer::new();
        buffer.append(br#"{"a":1}"#);
        buffer.advance(7);

        let copied = buffer.copy_span(Span::new(0, 7)).expect("span retained");
        buffer.mark_consumed(7);

        assert_eq!(&copied[..], br#"{"a":1}"#);
        assert!(buffer.is_empty());
        assert_eq!(buffer.stats().released, 7);
    }
}
