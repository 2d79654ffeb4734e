//! # jsonreader
//!
//! Extract path-selected sub-documents from JSON delivered as arbitrary byte
//! chunks. Each match is produced as soon as its closing token arrives, as the
//! exact bytes of the input, without buffering the whole document.
//!
//! ## Usage
//!
//! ```rust
//! use jsonreader::{JsonReader, JsonReaderError};
//!
//! let body = br#"{"size":2,"rows":[{"id":1,"doc":{"name":"a"}},{"id":2,"doc":{"name":"b"}}]}"#;
//!
//! let docs = JsonReader::select("$.rows[*].doc")?
//!     .max_buffer_size(64 * 1024)
//!     .read_chunks(body.chunks(8).map(Ok::<_, JsonReaderError>))?
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! assert_eq!(docs, [&br#"{"name":"a"}"#[..], &br#"{"name":"b"}"#[..]]);
//! # Ok::<(), JsonReaderError>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;

pub use builder::{SelectBuilder, TypedReader};

// Re-export the engine types callers interact with
pub use jsonreader_core::{
    BufferStats, ConfigurationError, ExtractedValue, JsonReaderError, JsonReaderResult,
    ReaderConfig, ReaderStats, Segment, Selector, Span, SpanReader, SpanStream, StageState,
};

/// Main entry point providing static builder methods
pub struct JsonReader;

impl JsonReader {
    /// Start a read for the values selected by `path`
    ///
    /// # Arguments
    /// * `path` - Selector such as `$.rows[*].doc`
    ///
    /// # Returns
    /// `SelectBuilder` for method chaining
    ///
    /// # Errors
    /// Returns `JsonReaderError::InvalidSelector` if `path` is not a supported
    /// selector.
    pub fn select(path: &str) -> Result<SelectBuilder, JsonReaderError> {
        SelectBuilder::new(path)
    }
}

/// Start a read for the values selected by `path`
///
/// Shorthand for [`JsonReader::select`]
///
/// # Errors
/// Returns `JsonReaderError::InvalidSelector` if `path` is not a supported
/// selector.
pub fn select(path: &str) -> Result<SelectBuilder, JsonReaderError> {
    JsonReader::select(path)
}
