//! JSON output formatting
//!
//! Serializes the intermediate representation to JSON text. Serialization
//! is delegated to serde_json; this module only controls the indentation
//! width and the pretty/compact choice. Key order in the output follows
//! insertion order of the underlying maps.

use crate::conversion::{ConversionConfig, ConversionResult};
use crate::error::{ConversionError, ConversionErrorKind};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Serializer, Value};

/// Main JSON formatter
pub struct JsonFormatter {
    config: ConversionConfig,
}

impl JsonFormatter {
    /// Create a new formatter with configuration
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Format a value as JSON text
    pub fn format(&self, value: &Value) -> ConversionResult<String> {
        if !self.config.pretty {
            return serde_json::to_string(value).map_err(serialization_error);
        }

        let indent = vec![b' '; usize::from(self.config.indent_size)];
        let formatter = PrettyFormatter::with_indent(&indent);
        let mut buffer = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
        value
            .serialize(&mut serializer)
            .map_err(serialization_error)?;

        String::from_utf8(buffer).map_err(|e| {
            ConversionError::conversion(ConversionErrorKind::serialization(format!(
                "output is not valid UTF-8: {}",
                e
            )))
        })
    }
}

/// Format a value as JSON text with the given configuration
pub fn format_to_json(value: &Value, config: &ConversionConfig) -> ConversionResult<String> {
    JsonFormatter::new(config.clone()).format(value)
}

fn serialization_error(error: serde_json::Error) -> ConversionError {
    ConversionError::conversion(ConversionErrorKind::serialization(error.to_string()))
}
