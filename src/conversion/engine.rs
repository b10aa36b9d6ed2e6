//! Core conversion engine for XML to JSON transformation

use crate::conversion::config::ConversionConfig;
use crate::conversion::limits;
use crate::conversion::ConversionResult;
use crate::error::{ConversionError, ConversionErrorKind};
use crate::formatter::format_to_json;
use crate::parser::tree::parse_document;
use crate::parser::XmlSource;
use crate::validation::OutputValidator;
use std::time::Instant;

/// Core conversion result
#[derive(Debug, Clone)]
pub struct JsonData {
    pub content: String,
    pub metadata: ConversionMetadata,
}

impl JsonData {
    /// Create a new JSON data result
    pub fn new(content: String, metadata: ConversionMetadata) -> Self {
        Self { content, metadata }
    }

    /// Get the formatted JSON output
    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Get the length of the output in bytes
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Check if the output is empty
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Metadata about the conversion process
#[derive(Debug, Clone)]
pub struct ConversionMetadata {
    pub input_size: u64,
    pub output_size: u64,
    pub element_count: usize,
    pub attribute_count: usize,
    pub max_depth: usize,
    pub processing_time_ms: u64,
}

/// Main conversion engine
pub struct ConversionEngine {
    config: ConversionConfig,
}

impl ConversionEngine {
    /// Create a new conversion engine
    pub fn new(config: ConversionConfig) -> Self {
        Self { config }
    }

    /// Convert an XML document string to JSON
    pub fn convert_str(&self, xml: &str) -> ConversionResult<JsonData> {
        let start_time = Instant::now();

        let document = parse_document(xml, &self.config.tree_options())?;
        limits::check_value_size(&document.value, &self.config)?;

        let content = format_to_json(&document.value, &self.config)?;

        if self.config.validate_output {
            let validator = OutputValidator::new(self.config.max_depth);
            validator.validate(&content, &document.value)?;
        }

        let metadata = ConversionMetadata {
            input_size: xml.len() as u64,
            output_size: content.len() as u64,
            element_count: document.element_count,
            attribute_count: document.attribute_count,
            max_depth: document.max_depth,
            processing_time_ms: start_time.elapsed().as_millis() as u64,
        };

        Ok(JsonData::new(content, metadata))
    }

    /// Convert XML from a source to JSON
    pub fn convert_source(&self, source: &XmlSource) -> ConversionResult<JsonData> {
        // Check source size before reading to avoid loading very large files
        limits::check_source_size_before_read(source, &self.config)?;

        let content = source.read_content().map_err(|e| {
            ConversionError::conversion(ConversionErrorKind::Io {
                message: format!(
                    "failed to read {}: {}",
                    source.source_type().description(),
                    e
                ),
                path: source.file_path().cloned(),
            })
        })?;

        self.convert_str(&content)
    }
}

/// Convert an XML string to JSON with the given configuration
pub fn convert_xml_to_json(xml: &str, config: &ConversionConfig) -> ConversionResult<JsonData> {
    let engine = ConversionEngine::new(config.clone());
    engine.convert_str(xml)
}

/// Convert XML from a source to JSON
pub fn convert_xml_from_source(
    source: &XmlSource,
    config: &ConversionConfig,
) -> ConversionResult<JsonData> {
    let engine = ConversionEngine::new(config.clone());
    engine.convert_source(source)
}
