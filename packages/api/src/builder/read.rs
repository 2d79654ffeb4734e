//! Terminal methods producing raw byte values

use bytes::Bytes;
use futures::Stream;
use jsonreader_core::{JsonReaderError, SpanReader, SpanStream};

use super::core::SelectBuilder;

impl SelectBuilder {
    /// Read matches from a blocking source of chunks
    ///
    /// # Arguments
    /// * `chunks` - Any iterator of `Result<B, E>` where `B: AsRef<[u8]>`
    ///
    /// # Returns
    /// A [`SpanReader`] yielding `Result<Bytes, E>` per match, in document order
    ///
    /// # Errors
    /// Returns `JsonReaderError::Config` if the configured limits are invalid.
    ///
    /// # Examples
    /// ```
    /// use jsonreader::{JsonReader, JsonReaderError};
    ///
    /// let chunks = [&br#"{"rows":[{"id":1},"#[..], br#"{"id":2}]}"#];
    /// let ids = JsonReader::select("$.rows[*].id")?
    ///     .read_chunks(chunks.into_iter().map(Ok::<_, JsonReaderError>))?
    ///     .collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(ids, [&b"1"[..], &b"2"[..]]);
    /// # Ok::<(), JsonReaderError>(())
    /// ```
    pub fn read_chunks<I, B, E>(self, chunks: I) -> Result<SpanReader<I::IntoIter, E>, JsonReaderError>
    where
        I: IntoIterator<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: From<JsonReaderError>,
    {
        self.log_start("chunks");
        SpanReader::new(chunks.into_iter(), self.selector, self.config)
    }

    /// Read matches from an async stream of chunks
    ///
    /// # Arguments
    /// * `stream` - Any `futures::Stream` of `Result<B, E>` where `B: AsRef<[u8]>`
    ///
    /// # Returns
    /// A [`SpanStream`] yielding one `ExtractedValue` per match
    ///
    /// # Errors
    /// Returns `JsonReaderError::Config` if the configured limits are invalid.
    pub fn read_stream<S, B, E>(self, stream: S) -> Result<SpanStream<S, E>, JsonReaderError>
    where
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: From<JsonReaderError>,
    {
        self.log_start("stream");
        SpanStream::new(stream, self.selector, self.config)
    }

    /// Extract every match from an in-memory document
    ///
    /// # Errors
    /// Any reader error, including configuration errors.
    pub fn read_slice(self, input: &[u8]) -> Result<Vec<Bytes>, JsonReaderError> {
        self.read_chunks(std::iter::once(Ok::<_, JsonReaderError>(input)))?
            .collect()
    }

    pub(crate) fn log_start(&self, source: &str) {
        tracing::debug!(
            target: "jsonreader::api",
            selector = %self.selector,
            max_buffer_size = self.config.max_buffer_size,
            max_depth = self.config.max_depth,
            "starting {source} read"
        );
    }
}

#[cfg(test)]
mod read_tests {
    use super::*;
    use crate::JsonReader;

    #[test]
    fn test_read_slice() {
        let values = JsonReader::select("$.a[*]")
            .expect("valid selector")
            .read_slice(br#"{"a": [true, "x", {"y": null}]}"#)
            .expect("valid document");
        assert_eq!(values, [&b"true"[..], &br#""x""#[..], &br#"{"y": null}"#[..]]);
    }

    #[test]
    fn test_invalid_config_reported_at_start() {
        let err = JsonReader::select("$")
            .expect("valid selector")
            .max_depth(0)
            .read_slice(b"[]")
            .expect_err("zero depth");
        assert!(matches!(err, JsonReaderError::Config(_)));
    }

    #[test]
    fn test_read_slice_reports_truncation() {
        let err = JsonReader::select("$.a")
            .expect("valid selector")
            .read_slice(br#"{"a": [1"#)
            .expect_err("truncated");
        assert!(err.is_truncated());
    }
}
