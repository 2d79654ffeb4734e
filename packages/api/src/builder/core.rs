//! Core `SelectBuilder` structure and configuration methods

use jsonreader_core::{JsonReaderError, ReaderConfig, Selector};

/// Builder for a selector read
///
/// Created by [`JsonReader::select`](crate::JsonReader::select). Configuration
/// methods consume and return the builder; terminal methods in
/// [`read`](super::read) and [`typed`](super::typed) start reading.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    pub(crate) selector: Selector,
    pub(crate) config: ReaderConfig,
}

impl SelectBuilder {
    /// Parse `expression` and start a builder with default configuration
    ///
    /// # Errors
    /// Returns `JsonReaderError::InvalidSelector` if the expression is not a
    /// supported selector.
    pub fn new(expression: &str) -> Result<Self, JsonReaderError> {
        Ok(Self::from_selector(Selector::parse(expression)?))
    }

    /// Start a builder from an already parsed selector
    #[must_use]
    pub fn from_selector(selector: Selector) -> Self {
        Self {
            selector,
            config: ReaderConfig::default(),
        }
    }

    /// Replace the whole reader configuration
    ///
    /// # Arguments
    /// * `config` - Buffer sizes and depth limit for the read
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn config(mut self, config: ReaderConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the initial chunk buffer capacity in bytes
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn buffer_capacity(mut self, bytes: usize) -> Self {
        self.config.initial_buffer_capacity = bytes;
        self
    }

    /// Bound the bytes retained for a single in-flight value
    ///
    /// Reading fails with `BufferLimitExceeded` when a value being captured
    /// grows past this size.
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn max_buffer_size(mut self, bytes: usize) -> Self {
        self.config.max_buffer_size = bytes;
        self
    }

    /// Bound the nesting depth of the input document
    ///
    /// # Returns
    /// `Self` for method chaining
    #[must_use]
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    #[must_use]
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    #[must_use]
    pub fn reader_config(&self) -> &ReaderConfig {
        &self.config
    }
}

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn test_builder_configuration_chain() {
        let builder = SelectBuilder::new("$.rows[*]")
            .expect("valid selector")
            .buffer_capacity(1024)
            .max_buffer_size(4096)
            .max_depth(16);

        assert_eq!(builder.reader_config().initial_buffer_capacity, 1024);
        assert_eq!(builder.reader_config().max_buffer_size, 4096);
        assert_eq!(builder.reader_config().max_depth, 16);
        assert_eq!(builder.selector().to_string(), "$.rows[*]");
    }

    #[test]
    fn test_config_replaces_previous_settings() {
        let builder = SelectBuilder::new("$")
            .expect("valid selector")
            .max_depth(3)
            .config(ReaderConfig::low_memory());
        assert_eq!(builder.reader_config(), &ReaderConfig::low_memory());
    }

    #[test]
    fn test_invalid_selector_rejected() {
        let err = SelectBuilder::new("$..rows").expect_err("descendant selector");
        assert!(matches!(err, JsonReaderError::InvalidSelector { position: 2, .. }));
    }
}
