//! Core data structures for IMMA segmenting.
//!
//! Defines parsed observations, the coordinate triples written to
//! segment files, rejection reasons and run statistics.

use crate::constants::{MISSING_PLATFORM_VALUE, platform_types};
use chrono::NaiveDate;
use std::path::PathBuf;

/// Position of an observation in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Fields extracted from one fixed-width record
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Observation {
    /// Platform type code, `None` when the field is blank or malformed
    pub platform_type: Option<i32>,
    /// Lat/lng indicator, `None` when the field is blank or malformed
    pub precision_indicator: Option<i32>,
    /// Latitude and longitude, present only when both parsed
    pub coordinates: Option<Coordinates>,
    pub year: String,
    pub month: String,
    pub day: String,
    /// Names of numeric fields that failed coercion
    pub malformed_fields: Vec<&'static str>,
}

impl Observation {
    /// Calendar date of the observation, if year/month/day form one
    pub fn date(&self) -> Option<NaiveDate> {
        let year = self.year.trim().parse().ok()?;
        let month = self.month.trim().parse().ok()?;
        let day = self.day.trim().parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    }

    /// True when the platform type is one of the ship classes
    pub fn is_ship(&self) -> bool {
        self.platform_type.is_some_and(platform_types::is_ship)
    }

    /// The triple written to a segment, if the observation has coordinates
    pub fn to_triple(&self) -> Option<CoordinateTriple> {
        self.coordinates.map(|coords| CoordinateTriple {
            longitude: coords.longitude as f32,
            latitude: coords.latitude as f32,
            platform_type: self
                .platform_type
                .map_or(MISSING_PLATFORM_VALUE, |pt| pt as f32),
        })
    }
}

/// One observation as stored in a segment file
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTriple {
    pub longitude: f32,
    pub latitude: f32,
    pub platform_type: f32,
}

impl CoordinateTriple {
    pub fn new(longitude: f32, latitude: f32, platform_type: f32) -> Self {
        Self {
            longitude,
            latitude,
            platform_type,
        }
    }

    /// Values in on-disk order
    pub fn to_array(self) -> [f32; 3] {
        [self.longitude, self.latitude, self.platform_type]
    }

    pub fn from_array(values: [f32; 3]) -> Self {
        Self::new(values[0], values[1], values[2])
    }
}

/// Why an observation was left out of the output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    /// Latitude or longitude missing or unparseable
    InvalidCoordinates,
    /// Both coordinates on the 10 degree grid
    GridAligned,
    /// Platform type outside the ship classes
    NotShip,
    /// Precision indicator missing or below the configured minimum
    LowPrecision,
}

/// Processing statistics
#[derive(Debug, Default, Clone)]
pub struct ProcessingStats {
    pub files_processed: usize,
    pub lines_read: usize,
    pub observations_accepted: usize,
    pub rejected_invalid_coordinates: usize,
    pub rejected_grid_aligned: usize,
    pub rejected_not_ship: usize,
    pub rejected_low_precision: usize,
    pub malformed_fields: usize,
    pub segments_written: usize,
    pub observations_written: usize,
    /// Bytes written across all segment files
    pub bytes_written: u64,
    /// Accepted observations left in the unflushed final buffer
    pub observations_discarded: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    pub output_path: PathBuf,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    /// Count a rejected observation
    pub fn record_rejection(&mut self, reason: RejectReason) {
        match reason {
            RejectReason::InvalidCoordinates => self.rejected_invalid_coordinates += 1,
            RejectReason::GridAligned => self.rejected_grid_aligned += 1,
            RejectReason::NotShip => self.rejected_not_ship += 1,
            RejectReason::LowPrecision => self.rejected_low_precision += 1,
        }
    }

    /// Widen the observed date range
    pub fn record_date(&mut self, date: NaiveDate) {
        self.first_date = Some(self.first_date.map_or(date, |d| d.min(date)));
        self.last_date = Some(self.last_date.map_or(date, |d| d.max(date)));
    }

    pub fn total_rejected(&self) -> usize {
        self.rejected_invalid_coordinates
            + self.rejected_grid_aligned
            + self.rejected_not_ship
            + self.rejected_low_precision
    }
}
