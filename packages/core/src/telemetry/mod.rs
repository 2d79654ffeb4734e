//! Reader telemetry and statistics collection
//!
//! Plain snapshot types describing buffer usage and extraction progress.

mod stats;

pub use stats::{BufferStats, ReaderStats};
