//! Reader error handling module
//!
//! Error taxonomy for streaming extraction: structural failures, truncated
//! documents, selector parse failures and resource limits. Upstream failures
//! are never represented here; they are handed back to the caller unchanged.

mod constructors;
mod conversions;
mod types;

pub use types::{JsonReaderError, JsonReaderResult};
