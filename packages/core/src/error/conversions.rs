//! Conversions between reader errors and standard library error types

use std::io;

use super::types::JsonReaderError;

/// Lets `io::Error` chunk sources use the reader directly: reader failures
/// surface as `InvalidData`, truncation as `UnexpectedEof`.
impl From<JsonReaderError> for io::Error {
    fn from(error: JsonReaderError) -> Self {
        let kind = if error.is_truncated() {
            io::ErrorKind::UnexpectedEof
        } else {
            io::ErrorKind::InvalidData
        };
        io::Error::new(kind, error)
    }
}

#[cfg(test)]
mod conversion_tests {
    use super::*;

    #[test]
    fn test_io_error_kinds() {
        let truncated: io::Error = JsonReaderError::truncated(4, 1).into();
        assert_eq!(truncated.kind(), io::ErrorKind::UnexpectedEof);

        let structural: io::Error = JsonReaderError::structural(4, "bad byte").into();
        assert_eq!(structural.kind(), io::ErrorKind::InvalidData);
        assert!(structural.to_string().contains("offset 4"));
    }
}
