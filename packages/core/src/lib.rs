//! # jsonreader core
//!
//! Incremental JSON tokenization and path-selected sub-document extraction
//! over arbitrarily chunked input.
//!
//! ## Features
//!
//! - **Chunk-boundary independent** tokenization: strings, escapes and numbers
//!   may be split anywhere
//! - **Bounded memory**: only the value being captured and the token being
//!   read are kept buffered
//! - **Byte-exact output**: matched values are the original input bytes
//! - **Pull-driven backpressure**: one upstream chunk per insufficient-data event
//! - **Sync and async** adapters over `Iterator` and `futures::Stream` sources
//!
//! ## Usage
//!
//! ```rust
//! use jsonreader_core::{JsonReaderError, ReaderConfig, Selector, SpanReader};
//!
//! let document = br#"{"size":2,"rows":[{"id":1,"doc":{"name":"a"}},{"id":2,"doc":{"name":"b"}}]}"#;
//! let chunks = document.chunks(7).map(Ok::<_, JsonReaderError>);
//!
//! let selector = Selector::parse("$.rows[*].doc")?;
//! let docs = SpanReader::new(chunks, selector, ReaderConfig::default())?
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! assert_eq!(docs[0], &br#"{"name":"a"}"#[..]);
//! assert_eq!(docs[1], &br#"{"name":"b"}"#[..]);
//! # Ok::<(), JsonReaderError>(())
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod extractor;
pub mod navigator;
pub mod selector;
pub mod stream;
pub mod telemetry;
pub mod tokenizer;

pub use buffer::{ChunkBuffer, Span};
pub use config::{ConfigResult, ConfigurationError, ReaderConfig, Validator};
pub use error::{JsonReaderError, JsonReaderResult};
pub use extractor::{ExtractedValue, Extractor};
pub use navigator::{MatchState, Navigator, PathFrame};
pub use selector::{Segment, Selector, SelectorParser};
pub use stream::{Progress, SpanReader, SpanStream, StageCore, StageState};
pub use telemetry::{BufferStats, ReaderStats};
pub use tokenizer::{Step, Token, Tokenizer};
