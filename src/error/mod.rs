//! Error types and handling infrastructure for XML to JSON conversion

use anyhow::Error;
use std::fmt;
use std::path::PathBuf;

/// Core error types for the conversion process
#[derive(Debug, thiserror::Error)]
pub enum ConversionErrorKind {
    #[error("XML parse error: {message}")]
    XmlParse {
        message: String,
        location: Option<(usize, usize)>,
    },

    #[error("JSON serialization error: {message}")]
    Serialization { message: String },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<PathBuf>,
    },

    #[error("Input too large: {size} bytes (limit: {limit} bytes)")]
    InputTooLarge { size: usize, limit: usize },

    #[error("Document nested too deeply: depth {depth} (limit: {limit})")]
    DepthExceeded { depth: usize, limit: usize },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },

    #[error("Conversion failed: {message}")]
    ConversionFailed { message: String },
}

impl ConversionErrorKind {
    pub fn xml_parse(message: String, location: Option<(usize, usize)>) -> Self {
        Self::XmlParse { message, location }
    }

    pub fn serialization(message: String) -> Self {
        Self::Serialization { message }
    }

    pub fn io(message: String, path: Option<PathBuf>) -> Self {
        Self::Io { message, path }
    }

    pub fn configuration(message: String) -> Self {
        Self::Configuration { message }
    }
}

/// Main error type for conversion operations
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error(transparent)]
    ParseError(#[from] ParseError),

    #[error("{kind}")]
    Conversion {
        kind: ConversionErrorKind,
        source: Option<anyhow::Error>,
    },

    #[error(transparent)]
    Other(#[from] Error),
}

impl ConversionError {
    pub fn parse(message: String, location: Option<(usize, usize)>) -> Self {
        Self::ParseError(ParseError::new(message, location))
    }

    pub fn conversion(kind: ConversionErrorKind) -> Self {
        Self::Conversion { kind, source: None }
    }

    pub fn conversion_with_source(kind: ConversionErrorKind, source: anyhow::Error) -> Self {
        Self::Conversion {
            kind,
            source: Some(source),
        }
    }

    pub fn other(error: Error) -> Self {
        Self::Other(error)
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::ParseError(err) => {
                if let Some((line, col)) = err.location {
                    format!(
                        "XML parse error at line {}, column {}: {}",
                        line, col, err.message
                    )
                } else {
                    format!("XML parse error: {}", err.message)
                }
            }
            Self::Conversion { kind, .. } => match kind {
                ConversionErrorKind::Io {
                    message,
                    path: Some(path),
                } => {
                    format!("IO error for {}: {}", path.display(), message)
                }
                ConversionErrorKind::InputTooLarge { size, limit } => {
                    format!("Input too large: {} bytes (limit: {} bytes)", size, limit)
                }
                ConversionErrorKind::DepthExceeded { depth, limit } => {
                    format!(
                        "Document nested too deeply: depth {} (limit: {})",
                        depth, limit
                    )
                }
                _ => self.to_string(),
            },
            Self::Other(err) => {
                format!("Unexpected error: {}", err)
            }
        }
    }
}

/// XML parsing errors
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub location: Option<(usize, usize)>,
    pub input_preview: Option<String>,
}

impl ParseError {
    pub fn new(message: String, location: Option<(usize, usize)>) -> Self {
        Self {
            message,
            location,
            input_preview: None,
        }
    }

    pub fn with_preview(mut self, preview: String) -> Self {
        self.input_preview = Some(preview);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some((line, col)) = self.location {
            write!(f, " at line {}, column {}", line, col)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Convenience result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
