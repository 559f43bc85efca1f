//! Error handling for IMMA segmenting operations.
//!
//! Fatal errors cover input discovery, file I/O and configuration.
//! Field coercion failures are non-fatal and live in [`FieldParseError`].

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SegmenterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input directory not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Input path is not a directory: {path}")]
    InputNotDirectory { path: PathBuf },

    #[error("Failed to read input file: {path} - {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file: {path} - {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid segment file: {path} - {reason}")]
    InvalidSegment { path: PathBuf, reason: String },

    #[error("Invalid segment index: {path} - {reason}")]
    InvalidIndex { path: PathBuf, reason: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing task failed: {reason}")]
    TaskFailed { reason: String },
}

/// Non-fatal failure to coerce a fixed-width field.
///
/// The parser logs these and substitutes an absent value; they never
/// propagate out of a parse call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldParseError {
    #[error("malformed {field} field '{value}': {source}")]
    MalformedInteger {
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl FieldParseError {
    /// Name of the field that failed to parse
    pub fn field(&self) -> &'static str {
        match self {
            FieldParseError::MalformedInteger { field, .. } => field,
        }
    }
}

pub type Result<T> = std::result::Result<T, SegmenterError>;
