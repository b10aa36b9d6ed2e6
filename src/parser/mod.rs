//! XML input handling and parsing module

pub mod tree;
pub mod validation;

use crate::error::ParseResult;
use crate::parser::tree::{ParsedDocument, TreeOptions};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::PathBuf;

/// Types of XML input sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum XmlSourceType {
    /// Raw XML string input
    String(String),
    /// Single XML file path
    File(PathBuf),
    /// Standard input stream
    Stdin,
}

impl XmlSourceType {
    /// Get a human-readable description of the source
    pub fn description(&self) -> String {
        match self {
            XmlSourceType::String(_) => "string input".to_string(),
            XmlSourceType::File(path) => format!("file: {}", path.display()),
            XmlSourceType::Stdin => "standard input".to_string(),
        }
    }

    /// Check if the source exists and is accessible
    pub fn exists(&self) -> bool {
        match self {
            XmlSourceType::String(_) => true,
            XmlSourceType::File(path) => path.exists() && path.is_file(),
            XmlSourceType::Stdin => true,
        }
    }

    /// Get the size of the source in bytes, where it is known without reading
    pub fn estimated_size(&self) -> Option<u64> {
        match self {
            XmlSourceType::String(s) => Some(s.len() as u64),
            XmlSourceType::File(path) => std::fs::metadata(path).map(|m| m.len()).ok(),
            XmlSourceType::Stdin => None,
        }
    }
}

/// Source for parsing operations
#[derive(Debug, Clone)]
pub enum XmlSource {
    String(String),
    File(PathBuf),
    Stdin,
}

impl XmlSource {
    /// Parse the XML document from this source with the default mapping convention
    pub fn parse(&self) -> ParseResult<ParsedDocument> {
        self.parse_with_options(&TreeOptions::default())
    }

    /// Parse the XML document from this source with an explicit mapping convention
    pub fn parse_with_options(&self, options: &TreeOptions) -> ParseResult<ParsedDocument> {
        let content = self.read_content().map_err(|e| {
            crate::error::ParseError::new(
                format!("failed to read {}: {}", self.source_type().description(), e),
                None,
            )
        })?;
        tree::parse_document(&content, options)
    }

    /// Get the source type
    pub fn source_type(&self) -> XmlSourceType {
        match self {
            XmlSource::String(s) => XmlSourceType::String(s.clone()),
            XmlSource::File(p) => XmlSourceType::File(p.clone()),
            XmlSource::Stdin => XmlSourceType::Stdin,
        }
    }

    /// The file path behind this source, when it has one
    pub fn file_path(&self) -> Option<&PathBuf> {
        match self {
            XmlSource::File(path) => Some(path),
            _ => None,
        }
    }

    /// Read content as string
    pub fn read_content(&self) -> Result<String, std::io::Error> {
        match self {
            XmlSource::String(content) => Ok(content.clone()),
            XmlSource::File(path) => std::fs::read_to_string(path),
            XmlSource::Stdin => {
                let mut buffer = String::new();
                std::io::stdin().read_to_string(&mut buffer)?;
                Ok(buffer)
            }
        }
    }
}

/// Map a byte offset in the input to a 1-based (line, column) pair.
///
/// Columns count bytes within the line; the offset is clamped to the input
/// length so positions reported past the end still resolve.
pub(crate) fn location_at(content: &str, offset: usize) -> (usize, usize) {
    let clamped = offset.min(content.len());
    let bytes = &content.as_bytes()[..clamped];
    let line = bytes.iter().filter(|&&b| b == b'\n').count() + 1;
    let line_start = bytes
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |pos| pos + 1);
    (line, clamped - line_start + 1)
}

/// Render the offending line with a caret under the error column
pub(crate) fn preview_at(content: &str, line: usize, column: usize) -> String {
    content
        .lines()
        .nth(line.saturating_sub(1))
        .map(|text| format!("{}\n{}^", text, " ".repeat(column.saturating_sub(1))))
        .unwrap_or_default()
}
