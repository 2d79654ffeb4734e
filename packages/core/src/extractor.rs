//! Matched value extraction
//!
//! Copies closed spans out of the chunk buffer into an ordered queue before
//! the buffer is allowed to release them.

use std::collections::VecDeque;

use bytes::Bytes;

use crate::buffer::{ChunkBuffer, Span};
use crate::error::{JsonReaderError, JsonReaderResult};

/// A matched sub-document and its position in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedValue {
    pub span: Span,
    /// Exact input bytes of the value
    pub bytes: Bytes,
}

impl ExtractedValue {
    #[inline]
    #[must_use]
    pub fn offset(&self) -> usize {
        self.span.start
    }

    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }

    /// Parse the value into `T`
    ///
    /// # Errors
    /// Returns `JsonReaderError::Deserialization` carrying the value's offset.
    pub fn deserialize<T>(&self) -> JsonReaderResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_slice(&self.bytes)
            .map_err(|e| JsonReaderError::deserialization(self.span.start, e.to_string()))
    }
}

/// Ordered queue of extracted values
#[derive(Debug, Default)]
pub struct Extractor {
    ready: VecDeque<ExtractedValue>,
    last_end: Option<usize>,
}

impl Extractor {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy a completed span out of `buffer` and queue it
    pub fn capture(&mut self, buffer: &ChunkBuffer, span: Span) -> JsonReaderResult<()> {
        debug_assert!(
            self.last_end.map_or(true, |end| span.start >= end),
            "span {span} overlaps or precedes the previous value"
        );

        let bytes = buffer
            .copy_span(span)
            .ok_or_else(|| JsonReaderError::structural(span.start, "matched value was released"))?;
        self.last_end = Some(span.end);
        self.ready.push_back(ExtractedValue { span, bytes });
        Ok(())
    }

    /// Next queued value in document order
    #[inline]
    pub fn pop(&mut self) -> Option<ExtractedValue> {
        self.ready.pop_front()
    }

    #[inline]
    #[must_use]
    pub fn pending(&self) -> usize {
        self.ready.len()
    }

    /// Drop queued values
    pub fn clear(&mut self) {
        self.ready.clear();
    }
}
