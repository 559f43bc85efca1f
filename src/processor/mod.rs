//! Main processing engine.
//!
//! Orchestrates a segmenting run: input discovery, output directory
//! creation, the sequential parse/filter/segment pass and the final
//! summary. The pass itself runs on a blocking task.

pub mod discovery;
pub mod filter;
pub mod pipeline;
pub mod segment;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::{discovery::InputDiscovery, pipeline::SegmentPipeline, writer::SegmentWriter};

use crate::config::SegmentConfig;
use crate::error::{Result, SegmenterError};
use crate::models::ProcessingStats;

use colored::*;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Instant;
use tokio::fs;
use tokio::task;
use tracing::debug;

/// Main processor turning a directory of IMMA logs into segment files
#[derive(Debug)]
pub struct SegmentProcessor {
    input_path: PathBuf,
    output_path: PathBuf,
    config: SegmentConfig,
    input_discovery: InputDiscovery,
}

impl SegmentProcessor {
    /// Create a new processor
    pub fn new(input_path: PathBuf, output_path: PathBuf) -> Result<Self> {
        // Verify input path exists
        if !input_path.exists() {
            return Err(SegmenterError::InputNotFound { path: input_path });
        }

        Ok(Self {
            input_path: input_path.clone(),
            output_path,
            config: SegmentConfig::default(),
            input_discovery: InputDiscovery::new(input_path),
        })
    }

    /// Configure the processor
    pub fn with_config(mut self, config: SegmentConfig) -> Self {
        self.config = config;
        self
    }

    /// Main processing entry point
    pub async fn process(&mut self) -> Result<ProcessingStats> {
        let start_time = Instant::now();
        self.config.validate()?;

        println!("{}", "Starting IMMA segmenting".bright_green().bold());
        println!(
            "  {} {}",
            "Input:".bright_cyan(),
            self.input_path.display()
        );
        println!(
            "  {} {}",
            "Output:".bright_cyan(),
            self.output_path.display()
        );

        // Step 1: List input files in processing order
        let input_files = self.input_discovery.discover_input_files().await?;
        println!(
            "  {} {} input files",
            "Found".bright_green(),
            input_files.len().to_string().bright_white().bold()
        );

        // Step 2: Create output directory
        fs::create_dir_all(&self.output_path)
            .await
            .map_err(|source| SegmenterError::WriteFailed {
                path: self.output_path.clone(),
                source,
            })?;

        // Step 3: Single sequential pass on a blocking task
        let config = self.config.clone();
        let writer = SegmentWriter::new(self.output_path.clone());
        let progress_bar = create_progress_bar(input_files.len(), config.show_progress);

        debug!(
            "Segmenting {} files with segment length {}",
            input_files.len(),
            config.segment_len
        );

        let pass = task::spawn_blocking(move || {
            let mut pipeline = SegmentPipeline::new(config, writer);
            for path in &input_files {
                progress_bar.set_message(
                    path.file_name()
                        .map(|name| name.to_string_lossy().to_string())
                        .unwrap_or_default(),
                );
                pipeline.process_file(path)?;
                progress_bar.inc(1);
            }
            progress_bar.finish_and_clear();
            progress_display().remove(&progress_bar);
            pipeline.finish()
        });

        let mut stats = pass.await.map_err(|e| SegmenterError::TaskFailed {
            reason: e.to_string(),
        })??;

        stats.output_path = self.output_path.clone();
        stats.processing_time_ms = start_time.elapsed().as_millis();

        print_summary(&stats);
        Ok(stats)
    }
}

/// Shared display that owns every visible progress bar
///
/// Log output is routed through [`MultiProgress::suspend`] on this display
/// so warnings emitted mid-run do not tear the bar.
pub fn progress_display() -> &'static MultiProgress {
    static DISPLAY: OnceLock<MultiProgress> = OnceLock::new();
    DISPLAY.get_or_init(MultiProgress::new)
}

/// Progress over files processed, shown as a percentage
fn create_progress_bar(file_count: usize, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let progress_bar = progress_display().add(ProgressBar::new(file_count as u64));
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {percent:>3}% ({pos}/{len}) {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    progress_bar
}

fn print_summary(stats: &ProcessingStats) {
    println!("\n{}", "Processing Summary".bright_green().bold());
    println!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        stats.processing_time_ms.to_string().bright_white()
    );
    println!(
        "  {} {} ({} lines)",
        "Files processed:".bright_cyan(),
        stats.files_processed.to_string().bright_white(),
        stats.lines_read
    );
    if let (Some(first), Some(last)) = (stats.first_date, stats.last_date) {
        println!(
            "  {} {} to {}",
            "Date range:".bright_cyan(),
            first.to_string().bright_white(),
            last.to_string().bright_white()
        );
    }
    println!(
        "  {} {}",
        "Observations accepted:".bright_cyan(),
        stats.observations_accepted.to_string().bright_white().bold()
    );
    println!(
        "  {} {} (invalid position {}, grid-aligned {}, not ship {}, low precision {})",
        "Observations rejected:".bright_cyan(),
        stats.total_rejected().to_string().bright_white(),
        stats.rejected_invalid_coordinates,
        stats.rejected_grid_aligned,
        stats.rejected_not_ship,
        stats.rejected_low_precision
    );
    if stats.malformed_fields > 0 {
        println!(
            "  {} {}",
            "Malformed fields:".bright_yellow(),
            stats.malformed_fields.to_string().bright_yellow()
        );
    }
    println!(
        "  {} {} ({} observations, {} bytes)",
        "Segments written:".bright_cyan(),
        stats.segments_written.to_string().bright_white().bold(),
        stats.observations_written,
        stats.bytes_written
    );
    if stats.observations_discarded > 0 {
        println!(
            "  {} {}",
            "Unflushed observations:".bright_yellow(),
            stats.observations_discarded.to_string().bright_yellow()
        );
    }
}
