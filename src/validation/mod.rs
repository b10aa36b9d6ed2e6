//! Output validation
//!
//! After formatting, the JSON text is parsed back and compared against the
//! intermediate representation. Any mismatch means the conversion lost or
//! reshaped data, and the run fails before an output file is written.

use crate::error::{ConversionError, ConversionErrorKind};
use serde_json::Value;

/// Validates formatted JSON output against the parsed document
pub struct OutputValidator {
    max_depth: usize,
}

impl OutputValidator {
    /// Create a new validator
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Check that the output re-parses and round-trips to the same structure
    pub fn validate(&self, json_text: &str, document: &Value) -> Result<(), ConversionError> {
        let reparsed: Value = serde_json::from_str(json_text).map_err(|e| {
            ConversionError::conversion(ConversionErrorKind::serialization(format!(
                "output is not valid JSON: {}",
                e
            )))
        })?;

        if &reparsed != document {
            return Err(ConversionError::conversion(
                ConversionErrorKind::ConversionFailed {
                    message: "output does not round-trip to the parsed document".to_string(),
                },
            ));
        }

        self.check_depth(document, 1)
    }

    fn check_depth(&self, value: &Value, depth: usize) -> Result<(), ConversionError> {
        if depth > self.max_depth {
            return Err(ConversionError::conversion(
                ConversionErrorKind::DepthExceeded {
                    depth,
                    limit: self.max_depth,
                },
            ));
        }

        match value {
            Value::Object(map) => {
                for child in map.values() {
                    self.check_depth(child, depth + 1)?;
                }
            }
            Value::Array(items) => {
                for item in items {
                    self.check_depth(item, depth + 1)?;
                }
            }
            Value::String(_) | Value::Number(_) | Value::Bool(_) | Value::Null => {}
        }

        Ok(())
    }
}
