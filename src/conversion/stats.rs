//! Statistics for conversion runs

use crate::conversion::engine::ConversionMetadata;
use serde::{Deserialize, Serialize};

/// Statistics for a single conversion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionStatistics {
    /// Input XML size in bytes
    pub input_size_bytes: u64,
    /// Output JSON size in bytes
    pub output_size_bytes: u64,
    /// Output size relative to input, as a signed percentage
    pub size_change_percent: f32,
    /// Number of elements in the document
    pub element_count: usize,
    /// Number of attributes in the document
    pub attribute_count: usize,
    /// Deepest element nesting seen
    pub max_depth: usize,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Throughput (input bytes processed per second)
    pub throughput_bytes_per_sec: f32,
    /// Timestamp of when statistics were collected
    pub collected_at: chrono::DateTime<chrono::Utc>,
}

impl ConversionStatistics {
    /// Derive statistics from conversion metadata
    pub fn from_metadata(metadata: &ConversionMetadata) -> Self {
        let size_change_percent = if metadata.input_size > 0 {
            ((metadata.output_size as f32 - metadata.input_size as f32)
                / metadata.input_size as f32)
                * 100.0
        } else {
            0.0
        };

        let throughput_bytes_per_sec = if metadata.processing_time_ms > 0 {
            metadata.input_size as f32 / (metadata.processing_time_ms as f32 / 1000.0)
        } else {
            0.0
        };

        Self {
            input_size_bytes: metadata.input_size,
            output_size_bytes: metadata.output_size,
            size_change_percent,
            element_count: metadata.element_count,
            attribute_count: metadata.attribute_count,
            max_depth: metadata.max_depth,
            processing_time_ms: metadata.processing_time_ms,
            throughput_bytes_per_sec,
            collected_at: chrono::Utc::now(),
        }
    }

    /// Get a formatted one-line summary
    pub fn summary(&self) -> String {
        format!(
            "{} elements, {} attributes in {}ms ({:+.1}% size change)",
            self.element_count,
            self.attribute_count,
            self.processing_time_ms,
            self.size_change_percent
        )
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
