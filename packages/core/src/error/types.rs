//! Reader error types
//!
//! Core error type for selector parsing, tokenization and stream processing.

use crate::config::ConfigurationError;

/// Result type for reader operations
pub type JsonReaderResult<T> = Result<T, JsonReaderError>;

/// Errors raised by the extraction engine
///
/// Every variant except `InvalidSelector`, `Config` and `Deserialization` is
/// fatal to the stream that raised it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonReaderError {
    /// The input is not valid JSON at `offset`
    #[error("structural error at offset {offset}: {reason}")]
    Structural { offset: usize, reason: String },

    /// Input ended while `depth` containers were still open
    #[error("truncated document: input ended at offset {offset} with {depth} open container(s)")]
    Truncated { offset: usize, depth: usize },

    /// Selector expression could not be parsed
    #[error("invalid selector '{expression}': {reason} at position {position}")]
    InvalidSelector {
        expression: String,
        reason: String,
        position: usize,
    },

    /// Bytes retained for an in-flight value exceeded the configured bound
    #[error("buffer limit exceeded: {retained} bytes retained, limit is {limit}")]
    BufferLimitExceeded { retained: usize, limit: usize },

    /// Nesting exceeded the configured depth
    #[error("nesting depth {depth} exceeds limit {limit}")]
    DepthLimitExceeded { depth: usize, limit: usize },

    /// Reader configuration failed validation
    #[error(transparent)]
    Config(#[from] ConfigurationError),

    /// An extracted value could not be mapped onto the requested type
    #[error("deserialization of value at offset {offset} failed: {message}")]
    Deserialization { offset: usize, message: String },
}

impl JsonReaderError {
    /// Whether the input ended before the document was complete
    #[inline]
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        matches!(self, Self::Truncated { .. })
    }

    /// Whether the input is malformed JSON
    #[inline]
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::Structural { .. })
    }

    /// Byte offset in the logical input the error refers to, if any
    #[must_use]
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Structural { offset, .. }
            | Self::Truncated { offset, .. }
            | Self::Deserialization { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}
