//! Configuration management and validation.
//!
//! Provides the run configuration for segmenting: segment sizing,
//! final-buffer handling, progress display and the observation filter
//! policy.

use crate::constants::{MAX_SEGMENT_LEN, SEGMENT_LEN};
use crate::error::{Result, SegmenterError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Observation filter policy
///
/// Invalid coordinates are always rejected; the remaining predicates are
/// switches. Platform type and precision filtering are off by default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Reject observations whose latitude and longitude are both multiples of 10 degrees
    pub reject_grid_aligned: bool,

    /// Keep only ship platform types (1-5)
    pub ship_only: bool,

    /// Minimum precision indicator; observations without one are rejected when set
    pub min_precision_indicator: Option<i32>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            reject_grid_aligned: true,
            ship_only: false,
            min_precision_indicator: None,
        }
    }
}

/// Global configuration for a segmenting run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentConfig {
    /// Observations per segment file
    pub segment_len: usize,

    /// Write the trailing partial buffer as a final short segment
    pub flush_final_segment: bool,

    /// Show a progress bar over input files
    pub show_progress: bool,

    /// Observation filter policy
    pub filter: FilterConfig,
}

impl Default for SegmentConfig {
    fn default() -> Self {
        Self {
            segment_len: SEGMENT_LEN,
            flush_final_segment: false,
            show_progress: true,
            filter: FilterConfig::default(),
        }
    }
}

impl SegmentConfig {
    /// Load a configuration from a JSON file; missing keys take defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            SegmenterError::ReadFailed {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let config: Self =
            serde_json::from_str(&contents).map_err(|e| SegmenterError::Configuration {
                message: format!("Invalid config file {}: {}", path.display(), e),
            })?;

        debug!("Loaded configuration from {}: {:?}", path.display(), config);
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the writer cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.segment_len == 0 {
            return Err(SegmenterError::Configuration {
                message: "segment_len must be greater than zero".to_string(),
            });
        }
        if self.segment_len > MAX_SEGMENT_LEN {
            return Err(SegmenterError::Configuration {
                message: format!(
                    "segment_len {} exceeds the maximum of {}",
                    self.segment_len, MAX_SEGMENT_LEN
                ),
            });
        }
        Ok(())
    }

    /// Set observations per segment
    pub fn with_segment_len(mut self, segment_len: usize) -> Self {
        self.segment_len = segment_len;
        self
    }

    /// Flush the final partial segment instead of discarding it
    pub fn with_final_flush(mut self) -> Self {
        self.flush_final_segment = true;
        self
    }

    /// Disable the progress bar
    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Replace the filter policy
    pub fn with_filter(mut self, filter: FilterConfig) -> Self {
        self.filter = filter;
        self
    }
}
