//! Error constructor functions
//!
//! Factory methods for building reader errors with positional context.

use super::types::JsonReaderError;

impl JsonReaderError {
    /// Creates a structural error for malformed input
    ///
    /// # Arguments
    /// * `offset` - Absolute byte offset of the offending byte
    /// * `reason` - What the tokenizer expected or rejected
    pub fn structural(offset: usize, reason: impl Into<String>) -> Self {
        Self::Structural {
            offset,
            reason: reason.into(),
        }
    }

    /// Creates a structural error naming an unexpected byte
    #[must_use]
    pub fn unexpected_byte(offset: usize, byte: u8, expected: &str) -> Self {
        let found = if byte.is_ascii_graphic() {
            format!("'{}'", byte as char)
        } else {
            format!("0x{byte:02x}")
        };
        Self::structural(offset, format!("unexpected byte {found}, expected {expected}"))
    }

    /// Creates a truncated-document error
    #[must_use]
    pub fn truncated(offset: usize, depth: usize) -> Self {
        Self::Truncated { offset, depth }
    }

    /// Creates an invalid selector error
    ///
    /// # Arguments
    /// * `expression` - The selector text as given
    /// * `reason` - Why it was rejected
    /// * `position` - Character position where parsing stopped
    pub fn invalid_selector(
        expression: impl Into<String>,
        reason: impl Into<String>,
        position: usize,
    ) -> Self {
        Self::InvalidSelector {
            expression: expression.into(),
            reason: reason.into(),
            position,
        }
    }

    /// Creates a buffer limit error
    #[must_use]
    pub fn buffer_limit(retained: usize, limit: usize) -> Self {
        Self::BufferLimitExceeded { retained, limit }
    }

    /// Creates a depth limit error
    #[must_use]
    pub fn depth_limit(depth: usize, limit: usize) -> Self {
        Self::DepthLimitExceeded { depth, limit }
    }

    /// Creates a typed-mapping error for a value starting at `offset`
    pub fn deserialization(offset: usize, message: impl Into<String>) -> Self {
        Self::Deserialization {
            offset,
            message: message.into(),
        }
    }
}
