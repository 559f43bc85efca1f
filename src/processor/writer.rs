//! Segment file writing and reading
//!
//! A segment file is a bare array of little-endian `f32` values laid out as
//! `lng0, lat0, pt0, lng1, lat1, pt1, ...`. The index file is a single text
//! line with the number of segment files written.

use crate::constants::{
    BYTES_PER_OBSERVATION, INDEX_FILE_NAME, SEGMENT_FILE_EXTENSION, SEGMENT_FILE_PREFIX,
};
use crate::error::{Result, SegmenterError};
use crate::models::CoordinateTriple;
use crate::processor::segment::Segment;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes segment and index files into an output directory
#[derive(Debug, Clone)]
pub struct SegmentWriter {
    output_path: PathBuf,
}

impl SegmentWriter {
    /// Create a new segment writer; the directory must already exist
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    /// Path of the `index`-th segment file
    pub fn segment_path(&self, index: usize) -> PathBuf {
        segment_file_path(&self.output_path, index)
    }

    /// Path of the index file
    pub fn index_path(&self) -> PathBuf {
        self.output_path.join(INDEX_FILE_NAME)
    }

    /// Write one segment, replacing any existing file; returns bytes written
    pub fn write_segment(&self, segment: &Segment) -> Result<u64> {
        let path = self.segment_path(segment.index);
        let write_failed = |source: std::io::Error| SegmenterError::WriteFailed {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(write_failed)?;
        let mut out = BufWriter::new(file);

        for triple in &segment.triples {
            for value in triple.to_array() {
                out.write_all(&value.to_le_bytes()).map_err(write_failed)?;
            }
        }
        out.flush().map_err(write_failed)?;

        let bytes = (segment.len() * BYTES_PER_OBSERVATION) as u64;
        debug!(
            "Wrote segment {} ({} observations, {} bytes) to {}",
            segment.index,
            segment.len(),
            bytes,
            path.display()
        );
        Ok(bytes)
    }

    /// Write the segment count
    pub fn write_index(&self, segment_count: usize) -> Result<()> {
        let path = self.index_path();
        std::fs::write(&path, format!("{}\n", segment_count)).map_err(|source| {
            SegmenterError::WriteFailed {
                path: path.clone(),
                source,
            }
        })?;

        debug!("Wrote index {} with {} segments", path.display(), segment_count);
        Ok(())
    }
}

/// `coords<index>.bin` inside `dir`
pub fn segment_file_path(dir: &Path, index: usize) -> PathBuf {
    dir.join(format!(
        "{}{}.{}",
        SEGMENT_FILE_PREFIX, index, SEGMENT_FILE_EXTENSION
    ))
}

/// Decode a segment file back into triples
pub fn read_segment(path: &Path) -> Result<Vec<CoordinateTriple>> {
    let bytes = std::fs::read(path).map_err(|source| SegmenterError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    if bytes.len() % BYTES_PER_OBSERVATION != 0 {
        return Err(SegmenterError::InvalidSegment {
            path: path.to_path_buf(),
            reason: format!(
                "length {} is not a multiple of {} bytes",
                bytes.len(),
                BYTES_PER_OBSERVATION
            ),
        });
    }

    Ok(bytes
        .chunks_exact(BYTES_PER_OBSERVATION)
        .map(|chunk| {
            let mut values = [0.0f32; 3];
            for (value, raw) in values.iter_mut().zip(chunk.chunks_exact(4)) {
                *value = f32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]);
            }
            CoordinateTriple::from_array(values)
        })
        .collect())
}

/// Read the segment count from an index file
pub fn read_segment_count(path: &Path) -> Result<usize> {
    let contents = std::fs::read_to_string(path).map_err(|source| SegmenterError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;

    contents
        .trim()
        .parse()
        .map_err(|e| SegmenterError::InvalidIndex {
            path: path.to_path_buf(),
            reason: format!("'{}' is not a segment count: {}", contents.trim(), e),
        })
}
