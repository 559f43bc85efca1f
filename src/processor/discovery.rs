//! Input discovery for IMMA log directories
//!
//! Lists the files of a flat input directory in processing order. File
//! names are expected to encode chronology (zero-padded dates), so the
//! lexicographic order of full paths is the processing order.

use crate::error::{Result, SegmenterError};
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// File discovery component for an input directory
#[derive(Debug)]
pub struct InputDiscovery {
    input_path: PathBuf,
    skipped_entries: usize,
}

impl InputDiscovery {
    /// Create a new input discovery instance
    pub fn new(input_path: PathBuf) -> Self {
        Self {
            input_path,
            skipped_entries: 0,
        }
    }

    /// Number of non-file entries skipped by the last discovery
    pub fn skipped_entries(&self) -> usize {
        self.skipped_entries
    }

    /// Discover all files directly inside the input directory, sorted by path
    pub async fn discover_input_files(&mut self) -> Result<Vec<PathBuf>> {
        let metadata = match fs::metadata(&self.input_path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SegmenterError::InputNotFound {
                    path: self.input_path.clone(),
                });
            }
            Err(source) => {
                return Err(SegmenterError::ReadFailed {
                    path: self.input_path.clone(),
                    source,
                });
            }
        };

        if !metadata.is_dir() {
            return Err(SegmenterError::InputNotDirectory {
                path: self.input_path.clone(),
            });
        }

        debug!("Listing input files in: {}", self.input_path.display());

        let mut files = Vec::new();
        self.skipped_entries = 0;

        let mut dir = fs::read_dir(&self.input_path).await?;

        while let Some(entry) = dir.next_entry().await? {
            let path = entry.path();
            // Follows symlinks so linked log files are processed
            if fs::metadata(&path).await?.is_file() {
                files.push(path);
            } else {
                debug!("Skipping non-file entry: {}", path.display());
                self.skipped_entries += 1;
            }
        }

        files.sort();

        debug!(
            "Found {} input files ({} entries skipped)",
            files.len(),
            self.skipped_entries
        );

        Ok(files)
    }
}
