//! Reader configuration
//!
//! Buffer sizing and structural limits for the streaming reader, with presets
//! and validation.

mod reader;
mod validation;

pub use reader::ReaderConfig;
pub use validation::{ConfigResult, ConfigValidator, ConfigurationError, Validator};
