//! IMMA Segmenter Library
//!
//! Converts directories of fixed-width IMMA ship-log records into fixed-size
//! binary segment files of (longitude, latitude, platform type) triples,
//! plus an index file holding the segment count.
//!
//! This library provides tools for:
//! - Parsing fixed-width records through a declarative field layout
//! - Filtering invalid and placeholder positions
//! - Accumulating observations into fixed-capacity segments
//! - Writing and reading back little-endian `f32` segment files

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod processor;

// Re-export commonly used types
pub use config::{FilterConfig, SegmentConfig};
pub use error::{FieldParseError, Result, SegmenterError};
pub use models::{CoordinateTriple, Coordinates, Observation, ProcessingStats, RejectReason};
pub use parser::{parse_line, parse_record};
pub use processor::SegmentProcessor;
pub use processor::writer::{read_segment, read_segment_count};
