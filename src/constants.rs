//! Application constants for the IMMA segmenter
//!
//! This module contains the segment sizing defaults, output file naming,
//! and the fixed-width field layout of IMMA ship-log records.

// =============================================================================
// Segment Output
// =============================================================================

/// Ship observations per segment file
pub const SEGMENT_LEN: usize = 10_000;

/// Largest accepted segment length (120 MB of triples per segment)
pub const MAX_SEGMENT_LEN: usize = 10_000_000;

/// Floats written per observation: longitude, latitude, platform type
pub const FLOATS_PER_OBSERVATION: usize = 3;

/// Bytes occupied by one observation in a segment file
pub const BYTES_PER_OBSERVATION: usize = FLOATS_PER_OBSERVATION * std::mem::size_of::<f32>();

/// Segment files are named `coords<N>.bin`
pub const SEGMENT_FILE_PREFIX: &str = "coords";
pub const SEGMENT_FILE_EXTENSION: &str = "bin";

/// Text file holding the number of segment files written
pub const INDEX_FILE_NAME: &str = "segs.idx";

/// Value written for the platform type slot when the field is absent
pub const MISSING_PLATFORM_VALUE: f32 = -1.0;

// =============================================================================
// Record Interpretation
// =============================================================================

/// Raw coordinate fields are hundredths of a degree
pub const COORDINATE_SCALE: f64 = 100.0;

/// Coordinates that are multiples of this on both axes are treated as placeholders
pub const GRID_STEP_DEGREES: f64 = 10.0;

/// Latitude field value that stands for "no latitude"
pub const LATITUDE_PLACEHOLDER: &str = "-";

/// Platform type codes
pub mod platform_types {
    /// Platform not identified
    pub const UNKNOWN: i32 = 0;

    /// Lowest code assigned to a ship class
    pub const FIRST_SHIP: i32 = 1;

    /// Highest code assigned to a ship class
    pub const LAST_SHIP: i32 = 5;

    /// True for the codes used by ships
    pub fn is_ship(code: i32) -> bool {
        (FIRST_SHIP..=LAST_SHIP).contains(&code)
    }
}

/// Lat/lng indicator codes (coordinate precision)
pub mod precision_indicators {
    /// Degrees and tenths
    pub const DEGREES_AND_TENTHS: i32 = 0;

    /// Degrees and minutes
    pub const DEGREES_AND_MINUTES: i32 = 4;
}

// =============================================================================
// Fixed-width Layout
// =============================================================================

/// A named half-open byte range within a fixed-width record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    pub name: &'static str,
    pub start: usize,
    pub end: usize,
}

impl FieldSpan {
    pub const fn new(name: &'static str, start: usize, end: usize) -> Self {
        Self { name, start, end }
    }

    pub const fn width(&self) -> usize {
        self.end - self.start
    }
}

/// Byte offsets of the IMMA fields this tool reads
///
/// All other columns of the record are ignored.
pub mod imma_layout {
    use super::FieldSpan;

    pub const YEAR: FieldSpan = FieldSpan::new("year", 0, 4);
    pub const MONTH: FieldSpan = FieldSpan::new("month", 4, 6);
    pub const DAY: FieldSpan = FieldSpan::new("day", 6, 8);
    pub const LATITUDE: FieldSpan = FieldSpan::new("latitude", 12, 17);
    pub const LONGITUDE: FieldSpan = FieldSpan::new("longitude", 17, 23);
    pub const PRECISION_INDICATOR: FieldSpan = FieldSpan::new("precision_indicator", 27, 28);
    pub const PLATFORM_TYPE: FieldSpan = FieldSpan::new("platform_type", 124, 126);

    /// Every field in record order
    pub const ALL: &[FieldSpan] = &[
        YEAR,
        MONTH,
        DAY,
        LATITUDE,
        LONGITUDE,
        PRECISION_INDICATOR,
        PLATFORM_TYPE,
    ];

    /// Minimum record length that covers every field
    pub const RECORD_MIN_LEN: usize = PLATFORM_TYPE.end;
}
