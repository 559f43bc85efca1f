//! Sequential segmenting pass
//!
//! Feeds records through parse, filter and accumulate, writing each segment
//! as soon as it fills. All state for one run lives in [`SegmentPipeline`].

use crate::config::SegmentConfig;
use crate::error::{Result, SegmenterError};
use crate::models::ProcessingStats;
use crate::parser::parse_record;
use crate::processor::filter::check_observation;
use crate::processor::segment::{Segment, SegmentAccumulator};
use crate::processor::writer::SegmentWriter;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info, warn};

/// One segmenting run over an ordered sequence of input files
#[derive(Debug)]
pub struct SegmentPipeline {
    config: SegmentConfig,
    writer: SegmentWriter,
    accumulator: SegmentAccumulator,
    stats: ProcessingStats,
}

impl SegmentPipeline {
    pub fn new(config: SegmentConfig, writer: SegmentWriter) -> Self {
        let accumulator = SegmentAccumulator::new(config.segment_len);
        Self {
            config,
            writer,
            accumulator,
            stats: ProcessingStats::default(),
        }
    }

    /// Statistics gathered so far
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Process every line of one input file
    pub fn process_file(&mut self, path: &Path) -> Result<()> {
        let read_failed = |source: std::io::Error| SegmenterError::ReadFailed {
            path: path.to_path_buf(),
            source,
        };

        let file = File::open(path).map_err(read_failed)?;
        let mut reader = BufReader::new(file);
        let mut line = Vec::new();
        let mut lines = 0usize;

        loop {
            line.clear();
            if reader.read_until(b'\n', &mut line).map_err(read_failed)? == 0 {
                break;
            }
            lines += 1;
            self.process_record(&line)?;
        }

        self.stats.files_processed += 1;
        debug!("Processed {} lines from {}", lines, path.display());
        Ok(())
    }

    /// Parse, filter and buffer one record
    pub fn process_record(&mut self, record: &[u8]) -> Result<()> {
        self.stats.lines_read += 1;

        let observation = parse_record(record);
        self.stats.malformed_fields += observation.malformed_fields.len();

        if let Err(reason) = check_observation(&observation, &self.config.filter) {
            self.stats.record_rejection(reason);
            return Ok(());
        }

        let Some(triple) = observation.to_triple() else {
            return Ok(());
        };

        if let Some(date) = observation.date() {
            self.stats.record_date(date);
        }
        self.stats.observations_accepted += 1;

        if let Some(segment) = self.accumulator.push(triple) {
            self.flush(&segment)?;
        }
        Ok(())
    }

    fn flush(&mut self, segment: &Segment) -> Result<()> {
        self.stats.bytes_written += self.writer.write_segment(segment)?;
        self.stats.segments_written += 1;
        self.stats.observations_written += segment.len();
        Ok(())
    }

    /// Handle the final buffer and write the index
    pub fn finish(mut self) -> Result<ProcessingStats> {
        if self.config.flush_final_segment {
            if let Some(segment) = self.accumulator.take_partial() {
                self.flush(&segment)?;
            }
        } else if self.accumulator.buffered() > 0 {
            warn!(
                "{} observations in the final partial segment were not written",
                self.accumulator.buffered()
            );
        }

        self.stats.observations_discarded = self.accumulator.buffered();
        self.writer.write_index(self.accumulator.segment_count())?;

        info!(
            "Segmenting complete: {} observations accepted, {} segments written",
            self.stats.observations_accepted, self.stats.segments_written
        );

        Ok(self.stats)
    }
}
