//! Segment accumulation
//!
//! Groups accepted coordinate triples into fixed-capacity segments. A full
//! buffer is only handed out when the next observation arrives, so the
//! last buffer of a run stays pending until [`SegmentAccumulator::take_partial`]
//! is called.

use crate::constants::SEGMENT_LEN;
use crate::models::CoordinateTriple;

/// A batch of triples ready to be written as `coords<index>.bin`
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub index: usize,
    pub triples: Vec<CoordinateTriple>,
}

impl Segment {
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}

/// Running state of the segmenting pass
#[derive(Debug)]
pub struct SegmentAccumulator {
    segment_len: usize,
    buffer: Vec<CoordinateTriple>,
    segment_index: usize,
    observation_count: usize,
}

impl SegmentAccumulator {
    /// Create an accumulator; `segment_len` must be non-zero
    pub fn new(segment_len: usize) -> Self {
        debug_assert!(segment_len > 0);
        Self {
            segment_len,
            buffer: Vec::with_capacity(initial_capacity(segment_len)),
            segment_index: 0,
            observation_count: 0,
        }
    }

    /// Append a triple, returning the previous segment if it just filled
    ///
    /// The flush happens before the `k * segment_len`-th observation
    /// (k >= 1) is buffered.
    pub fn push(&mut self, triple: CoordinateTriple) -> Option<Segment> {
        let completed = if self.observation_count > 0
            && self.observation_count % self.segment_len == 0
            && !self.buffer.is_empty()
        {
            Some(self.take_buffer())
        } else {
            None
        };

        self.buffer.push(triple);
        self.observation_count += 1;
        completed
    }

    /// Hand out whatever is still buffered as a final segment
    pub fn take_partial(&mut self) -> Option<Segment> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(self.take_buffer())
        }
    }

    fn take_buffer(&mut self) -> Segment {
        let triples = std::mem::replace(
            &mut self.buffer,
            Vec::with_capacity(initial_capacity(self.segment_len)),
        );
        let segment = Segment {
            index: self.segment_index,
            triples,
        };
        self.segment_index += 1;
        segment
    }

    /// Segments handed out so far
    pub fn segment_count(&self) -> usize {
        self.segment_index
    }

    /// Observations accepted so far
    pub fn observation_count(&self) -> usize {
        self.observation_count
    }

    /// Observations waiting in the current buffer
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

/// Up-front buffer size; larger segments grow on demand
fn initial_capacity(segment_len: usize) -> usize {
    segment_len.min(SEGMENT_LEN)
}
