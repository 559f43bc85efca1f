//! Integration tests for the IMMA segmenter
//!
//! Drives the public API end to end against temporary log directories and
//! reads the binary output back.

use imma_segmenter::{
    FilterConfig, SegmentConfig, SegmentProcessor, parse_line, read_segment, read_segment_count,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Fixed-width record with year/month/day, position, precision and platform type
fn record(date: &str, lat: i32, lng: i32, li: u8, pt: Option<u8>) -> String {
    let mut line = format!("{:<8}    {:>5}{:>6}    {}", date, lat, lng, li);
    line.push_str(&" ".repeat(124 - line.len()));
    match pt {
        Some(pt) => line.push_str(&format!("{:>2}", pt)),
        None => line.push_str("  "),
    }
    line.push_str(" 165 trailing attachment data");
    line
}

fn write_log(dir: &Path, name: &str, lines: &[String]) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(name), lines.join("\n") + "\n").unwrap();
}

fn read_all_segments(output: &Path) -> Vec<[f32; 3]> {
    let count = read_segment_count(&output.join("segs.idx")).unwrap();
    (0..count)
        .flat_map(|k| read_segment(&output.join(format!("coords{}.bin", k))).unwrap())
        .map(|t| t.to_array())
        .collect()
}

#[test]
fn test_public_parser_matches_layout() {
    let obs = parse_line(&record("18620704", -4510, 17025, 4, Some(3)));

    assert_eq!(obs.year, "1862");
    assert_eq!(obs.month, "07");
    assert_eq!(obs.day, "04");
    assert_eq!(obs.precision_indicator, Some(4));
    assert_eq!(obs.platform_type, Some(3));
    let coords = obs.coordinates.unwrap();
    assert_eq!(coords.latitude, -45.10);
    assert_eq!(coords.longitude, 170.25);
}

#[tokio::test]
async fn test_round_trip_of_retained_observations() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("imma");
    let output = temp_dir.path().join("segments");

    let mut expected = Vec::new();
    let mut lines = Vec::new();
    for n in 0..37 {
        let lat = -8000 + n * 431;
        let lng = 17999 - n * 977;
        let pt = (n % 6) as u8;
        lines.push(record("18700101", lat, lng, 0, Some(pt)));
        expected.push([
            (f64::from(lng) / 100.0) as f32,
            (f64::from(lat) / 100.0) as f32,
            f32::from(pt),
        ]);
        // Placeholder position between every real one
        lines.push(record("18700101", 0, 0, 0, Some(1)));
    }
    write_log(&input, "1870.imma", &lines);

    let config = SegmentConfig::default()
        .with_segment_len(8)
        .with_final_flush()
        .without_progress();
    let mut processor = SegmentProcessor::new(input, output.clone())
        .unwrap()
        .with_config(config);
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.observations_accepted, 37);
    assert_eq!(stats.rejected_grid_aligned, 37);
    assert_eq!(read_all_segments(&output), expected);
}

#[tokio::test]
async fn test_default_policy_drops_trailing_observations() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("imma");
    let output = temp_dir.path().join("segments");

    let lines: Vec<String> = (1..=23)
        .map(|n| record("18700101", 100 + n, 200 + n, 0, Some(1)))
        .collect();
    write_log(&input, "1870.imma", &lines);

    let config = SegmentConfig::default().with_segment_len(5).without_progress();
    let mut processor = SegmentProcessor::new(input, output.clone())
        .unwrap()
        .with_config(config);
    let stats = processor.process().await.unwrap();

    // Segment k is complete whenever more than (k + 1) * 5 observations were accepted
    assert_eq!(read_segment_count(&output.join("segs.idx")).unwrap(), 4);
    for k in 0..4 {
        let segment = read_segment(&output.join(format!("coords{}.bin", k))).unwrap();
        assert_eq!(segment.len(), 5);
    }
    assert_eq!(stats.observations_discarded, 3);
    assert_eq!(read_all_segments(&output).len(), 20);
}

#[tokio::test]
async fn test_optional_platform_and_precision_filters() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("imma");
    let output = temp_dir.path().join("segments");

    write_log(
        &input,
        "1880.imma",
        &[
            record("18800101", 1234, 2345, 4, Some(1)),
            record("18800102", 1235, 2346, 0, Some(5)),
            record("18800103", 1236, 2347, 4, Some(0)),
            record("18800104", 1237, 2348, 4, None),
            record("18800105", 1238, 2349, 4, Some(6)),
            record("18800106", 1239, 2350, 4, Some(2)),
        ],
    );

    let config = SegmentConfig::default()
        .with_segment_len(100)
        .with_final_flush()
        .without_progress()
        .with_filter(FilterConfig {
            ship_only: true,
            min_precision_indicator: Some(1),
            ..Default::default()
        });
    let mut processor = SegmentProcessor::new(input, output.clone())
        .unwrap()
        .with_config(config);
    let stats = processor.process().await.unwrap();

    assert_eq!(stats.observations_accepted, 2);
    assert_eq!(stats.rejected_not_ship, 3);
    assert_eq!(stats.rejected_low_precision, 1);

    let platform_types: Vec<f32> = read_all_segments(&output).iter().map(|t| t[2]).collect();
    assert_eq!(platform_types, vec![1.0, 2.0]);
}
