//! XML to JSON converter
//!
//! A Rust CLI tool that reads a UTF-8 XML document and writes its structure
//! as insertion-ordered, pretty-printed JSON. Attributes are distinguished
//! from child elements by a configurable key prefix, text content alongside
//! attributes or children lands under a configurable sentinel key, and
//! repeated sibling tags collect into arrays in document order.

pub mod cli;
pub mod conversion;
pub mod error;
pub mod formatter;
pub mod parser;
pub mod validation;

// Re-export commonly used types
pub use conversion::{convert_xml_to_json, ConversionConfig, ConversionResult, JsonData};
pub use error::{ConversionError, ConversionErrorKind, ParseError};
pub use formatter::JsonFormatter;
pub use parser::XmlSource;

/// Convert an XML document to JSON text with default configuration
pub fn convert_xml(xml: &str) -> Result<String, ConversionError> {
    let config = ConversionConfig::default();
    convert_xml_with_config(xml, &config)
}

/// Convert an XML document to JSON text with custom configuration
pub fn convert_xml_with_config(
    xml: &str,
    config: &ConversionConfig,
) -> Result<String, ConversionError> {
    let result = convert_xml_to_json(xml, config)?;
    Ok(result.content)
}
