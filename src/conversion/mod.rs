//! XML to JSON conversion module
//!
//! This module contains the core conversion logic, configuration, limits,
//! and run statistics.

pub mod config;
pub mod engine;
pub mod limits;
pub mod stats;

pub use config::ConversionConfig;

pub use engine::{convert_xml_to_json, ConversionEngine, ConversionMetadata, JsonData};

use crate::error::ConversionError;

/// Result type for conversion operations
pub type ConversionResult<T> = Result<T, ConversionError>;

/// Result type for operations that return JSON data
pub type JsonConversionResult = ConversionResult<JsonData>;
