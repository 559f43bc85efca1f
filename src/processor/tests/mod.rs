//! Integration tests for the processor module
//!
//! Tests the complete segmenting pipeline using temporary IMMA log directories.


use crate::config::SegmentConfig;
use std::path::Path;

/// Build one fixed-width record with the fields this tool reads
///
/// `lat` and `lng` are raw hundredths of a degree, right-aligned in their
/// columns like the real format.
pub fn imma_record(date: &str, lat: &str, lng: &str, li: &str, pt: &str) -> String {
    let mut line = format!("{:<8}    {:>5}{:>6}    {:>1}", date, lat, lng, li);
    line.push_str(&" ".repeat(124 - line.len()));
    line.push_str(&format!("{:>2}", pt));
    line.push_str("   remaining IMMA columns");
    line
}

/// Write records to `dir/name`, one per line
pub fn write_log(dir: &Path, name: &str, records: &[String]) {
    std::fs::create_dir_all(dir).unwrap();
    let mut contents = records.join("\n");
    contents.push('\n');
    std::fs::write(dir.join(name), contents).unwrap();
}

/// Quiet configuration for tests
pub fn test_config(segment_len: usize) -> SegmentConfig {
    SegmentConfig::default()
        .with_segment_len(segment_len)
        .without_progress()
}
