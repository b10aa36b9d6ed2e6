use crate::conversion::config::ConversionConfig;
use crate::conversion::ConversionResult;
use crate::error::{ConversionError, ConversionErrorKind};
use crate::parser::XmlSource;
use serde_json::Value;

/// Check the source size before attempting to read or parse the XML.
/// This avoids loading very large files into memory if the user-configured
/// limit is smaller than the file.
pub fn check_source_size_before_read(
    source: &XmlSource,
    config: &ConversionConfig,
) -> ConversionResult<()> {
    let source_type = source.source_type();

    if let Some(size) = source_type.estimated_size() {
        if size > config.memory_limit as u64 {
            return Err(ConversionError::conversion(
                ConversionErrorKind::InputTooLarge {
                    size: size as usize,
                    limit: config.memory_limit,
                },
            ));
        }
    }

    Ok(())
}

/// After building the intermediate representation, check its serialized
/// size against the configured limit before formatting the output.
pub fn check_value_size(value: &Value, config: &ConversionConfig) -> ConversionResult<()> {
    match serde_json::to_string(value) {
        Ok(s) => {
            let len = s.len();
            if len > config.memory_limit {
                return Err(ConversionError::conversion(
                    ConversionErrorKind::InputTooLarge {
                        size: len,
                        limit: config.memory_limit,
                    },
                ));
            }
        }
        Err(_) => {
            // If serialization fails here the formatter will report it
        }
    }

    Ok(())
}
