//! Configuration options for XML to JSON conversion

use crate::parser::tree::TreeOptions;

/// Conversion configuration options
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Spaces per indentation level (0-8)
    pub indent_size: u8,
    /// Prefix distinguishing attribute keys from child element keys
    pub attribute_prefix: String,
    /// Key holding element text alongside attributes or children
    pub text_key: String,
    /// Maximum input size in bytes
    pub memory_limit: usize,
    /// Maximum element nesting depth
    pub max_depth: usize,
    /// Pretty-print output (vs compact)
    pub pretty: bool,
    /// Re-parse the JSON output and compare it against the parsed document
    pub validate_output: bool,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            indent_size: 2,
            attribute_prefix: "@".to_string(),
            text_key: "#text".to_string(),
            memory_limit: 100 * 1024 * 1024, // 100MB
            max_depth: 1000,
            pretty: true,
            validate_output: true,
        }
    }
}

impl ConversionConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set indentation size
    pub fn with_indent_size(mut self, size: u8) -> Result<Self, String> {
        if size > 8 {
            return Err("Indent size must be 0-8 spaces".to_string());
        }
        self.indent_size = size;
        Ok(self)
    }

    /// Set the attribute key prefix
    pub fn with_attribute_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.attribute_prefix = prefix.into();
        self
    }

    /// Set the text sentinel key
    pub fn with_text_key(mut self, key: impl Into<String>) -> Self {
        self.text_key = key.into();
        self
    }

    /// Set the input size limit
    pub fn with_memory_limit(mut self, limit_bytes: usize) -> Self {
        self.memory_limit = limit_bytes;
        self
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Enable/disable pretty printing
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Enable/disable output validation
    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_output = validate;
        self
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.indent_size > 8 {
            return Err("Indent size must be 0-8 spaces".to_string());
        }

        if self.memory_limit < 1024 {
            return Err("Memory limit must be at least 1KB".to_string());
        }

        if self.max_depth == 0 {
            return Err("Max depth must be at least 1".to_string());
        }

        if self.attribute_prefix.is_empty() {
            return Err(
                "Attribute prefix must not be empty; attribute and child keys would collide"
                    .to_string(),
            );
        }

        if self.text_key.is_empty() {
            return Err("Text key must not be empty".to_string());
        }

        if self.attribute_prefix == self.text_key {
            return Err("Attribute prefix and text key must differ".to_string());
        }

        Ok(())
    }

    /// The naming convention and depth limit handed to the tree builder
    pub fn tree_options(&self) -> TreeOptions {
        TreeOptions {
            attribute_prefix: self.attribute_prefix.clone(),
            text_key: self.text_key.clone(),
            max_depth: self.max_depth,
        }
    }
}
