//! Configuration validation utilities

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Invalid buffer size: {0}")]
    InvalidBufferSize(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration conflict: {0}")]
    Conflict(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any validation fails:
    /// - `InvalidBufferSize` - if buffer sizes are zero or exceed limits
    /// - `InvalidParameter` - if parameters are outside valid ranges
    /// - `Conflict` - if configuration settings conflict with each other
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Largest buffer bound accepted (1 GiB)
    pub const MAX_BUFFER_BYTES: usize = 1 << 30;

    /// Validate buffer size
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidBufferSize` if:
    /// - The buffer size is zero
    /// - The buffer size exceeds 1 GiB
    pub fn validate_buffer_size(size: usize, name: &str) -> ConfigResult<()> {
        if size == 0 {
            return Err(ConfigurationError::InvalidBufferSize(format!(
                "{name} cannot be zero"
            )));
        }

        if size > Self::MAX_BUFFER_BYTES {
            return Err(ConfigurationError::InvalidBufferSize(format!(
                "{name} cannot exceed 1GB"
            )));
        }

        Ok(())
    }

    /// Validate a value lies within `[min, max]`
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidParameter` if the value is out of range.
    pub fn validate_range(value: usize, min: usize, max: usize, name: &str) -> ConfigResult<()> {
        if value < min || value > max {
            return Err(ConfigurationError::InvalidParameter(format!(
                "{name} must be between {min} and {max}, got {value}"
            )));
        }
        Ok(())
    }
}
