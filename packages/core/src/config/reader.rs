//! Reader Configuration Module
//!
//! Buffer capacity and nesting limits for streaming extraction.

use serde::{Deserialize, Serialize};

use super::validation::{ConfigResult, ConfigValidator, ConfigurationError, Validator};

/// Runtime reader configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Initial capacity of the chunk buffer in bytes
    pub initial_buffer_capacity: usize,
    /// Upper bound on bytes retained for a single in-flight value or token
    pub max_buffer_size: usize,
    /// Maximum container nesting depth
    pub max_depth: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            initial_buffer_capacity: 8192, // 8KB
            max_buffer_size: 16_777_216,   // 16MB
            max_depth: 512,
        }
    }
}

impl ReaderConfig {
    /// Deepest nesting any preset or validated config may allow
    pub const DEPTH_CEILING: usize = 65_536;

    /// Create configuration for large documents with large matched values
    #[must_use]
    pub fn high_throughput() -> Self {
        Self {
            initial_buffer_capacity: 65_536, // 64KB
            max_buffer_size: 268_435_456,    // 256MB
            max_depth: 1024,
        }
    }

    /// Create memory-constrained configuration
    #[must_use]
    pub fn low_memory() -> Self {
        Self {
            initial_buffer_capacity: 1024, // 1KB
            max_buffer_size: 1_048_576,    // 1MB
            max_depth: 128,
        }
    }

    #[must_use]
    pub fn with_initial_buffer_capacity(mut self, bytes: usize) -> Self {
        self.initial_buffer_capacity = bytes;
        self
    }

    #[must_use]
    pub fn with_max_buffer_size(mut self, bytes: usize) -> Self {
        self.max_buffer_size = bytes;
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }
}

impl Validator for ReaderConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_buffer_size(
            self.initial_buffer_capacity,
            "initial_buffer_capacity",
        )?;
        ConfigValidator::validate_buffer_size(self.max_buffer_size, "max_buffer_size")?;
        ConfigValidator::validate_range(self.max_depth, 1, Self::DEPTH_CEILING, "max_depth")?;

        if self.initial_buffer_capacity > self.max_buffer_size {
            return Err(ConfigurationError::Conflict(format!(
                "initial_buffer_capacity ({}) exceeds max_buffer_size ({})",
                self.initial_buffer_capacity, self.max_buffer_size
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod reader_config_tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        assert!(ReaderConfig::default().validate().is_ok());
        assert!(ReaderConfig::high_throughput().validate().is_ok());
        assert!(ReaderConfig::low_memory().validate().is_ok());
    }

    #[test]
    fn test_zero_sizes_rejected() {
        let config = ReaderConfig::default().with_max_buffer_size(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidBufferSize(_))
        ));

        let config = ReaderConfig::default().with_max_depth(0);
        assert!(matches!(
            config.validate(),
            Err(ConfigurationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_capacity_conflict_rejected() {
        let config = ReaderConfig::default()
            .with_initial_buffer_capacity(4096)
            .with_max_buffer_size(1024);
        assert!(matches!(config.validate(), Err(ConfigurationError::Conflict(_))));
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: ReaderConfig =
            serde_json::from_str(r#"{"max_depth": 8}"#).expect("config should parse");
        assert_eq!(config.max_depth, 8);
        assert_eq!(
            config.initial_buffer_capacity,
            ReaderConfig::default().initial_buffer_capacity
        );
    }
}
