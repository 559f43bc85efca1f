//! Fixed-width IMMA record parsing.
//!
//! Extracts platform type, precision indicator, position and date fields
//! from one ship-log line using the spans in [`imma_layout`]. Numeric
//! fields that fail coercion are logged together with the offending line
//! and come back as `None`; parsing never fails as a whole.

use crate::constants::{COORDINATE_SCALE, FieldSpan, LATITUDE_PLACEHOLDER, imma_layout};
use crate::error::FieldParseError;
use crate::models::{Coordinates, Observation};
use std::borrow::Cow;
use tracing::warn;

/// Parse one line of text
pub fn parse_line(line: &str) -> Observation {
    parse_record(line.as_bytes())
}

/// Parse one raw record
///
/// Spans beyond the end of a short record read as empty, and bytes that
/// are not valid UTF-8 are replaced rather than rejected.
pub fn parse_record(record: &[u8]) -> Observation {
    let record = strip_line_ending(record);
    let mut malformed_fields = Vec::new();

    let mut report = |error: FieldParseError| {
        warn!("{}; record: {}", error, String::from_utf8_lossy(record));
        malformed_fields.push(error.field());
    };

    let platform_type = parse_optional_int(record, imma_layout::PLATFORM_TYPE)
        .unwrap_or_else(|e| {
            report(e);
            None
        });

    let precision_indicator = parse_optional_int(record, imma_layout::PRECISION_INDICATOR)
        .unwrap_or_else(|e| {
            report(e);
            None
        });

    let coordinates = parse_coordinates(record).unwrap_or_else(|errors| {
        errors.into_iter().for_each(&mut report);
        None
    });

    Observation {
        platform_type,
        precision_indicator,
        coordinates,
        year: raw_field(record, imma_layout::YEAR).into_owned(),
        month: raw_field(record, imma_layout::MONTH).into_owned(),
        day: raw_field(record, imma_layout::DAY).into_owned(),
        malformed_fields,
    }
}

/// Text of a span, clamped to the record length
pub fn raw_field(record: &[u8], span: FieldSpan) -> Cow<'_, str> {
    let start = span.start.min(record.len());
    let end = span.end.min(record.len());
    String::from_utf8_lossy(&record[start..end])
}

/// Trimmed text of a span
pub fn trimmed_field(record: &[u8], span: FieldSpan) -> String {
    raw_field(record, span).trim().to_string()
}

/// Parse an integer span; blank yields `Ok(None)`
fn parse_optional_int(
    record: &[u8],
    span: FieldSpan,
) -> std::result::Result<Option<i32>, FieldParseError> {
    let value = trimmed_field(record, span);
    if value.is_empty() {
        return Ok(None);
    }
    parse_int(&value, span).map(Some)
}

fn parse_int(value: &str, span: FieldSpan) -> std::result::Result<i32, FieldParseError> {
    value
        .parse::<i32>()
        .map_err(|source| FieldParseError::MalformedInteger {
            field: span.name,
            value: value.to_string(),
            source,
        })
}

/// Latitude and longitude are only meaningful together
///
/// Either field blank gives `Ok(None)` without diagnostics; a malformed
/// field discards the pair and returns every coercion error.
fn parse_coordinates(
    record: &[u8],
) -> std::result::Result<Option<Coordinates>, Vec<FieldParseError>> {
    let mut latitude = trimmed_field(record, imma_layout::LATITUDE);
    let longitude = trimmed_field(record, imma_layout::LONGITUDE);

    if latitude == LATITUDE_PLACEHOLDER {
        latitude.clear();
    }

    if latitude.is_empty() || longitude.is_empty() {
        return Ok(None);
    }

    let lng = parse_int(&longitude, imma_layout::LONGITUDE);
    let lat = parse_int(&latitude, imma_layout::LATITUDE);

    match (lat, lng) {
        (Ok(lat), Ok(lng)) => Ok(Some(Coordinates {
            latitude: f64::from(lat) / COORDINATE_SCALE,
            longitude: f64::from(lng) / COORDINATE_SCALE,
        })),
        (lat, lng) => Err([lng.err(), lat.err()].into_iter().flatten().collect()),
    }
}

fn strip_line_ending(record: &[u8]) -> &[u8] {
    let record = record.strip_suffix(b"\n").unwrap_or(record);
    record.strip_suffix(b"\r").unwrap_or(record)
}
