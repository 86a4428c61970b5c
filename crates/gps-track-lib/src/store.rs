//! Track point storage
//!
//! This module provides the `TrackStore`, the single ordered sequence of every
//! point ingested during a run, with per-point segment-boundary flags.

use crate::{Error, Result};
use geo::Coord;

/// A single recorded location
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackPoint {
    /// Longitude (x) and latitude (y) in WGS84 degrees
    pub coord: Coord<f64>,
    /// True for the first and the last point of a segment
    pub is_segment_boundary: bool,
}

impl TrackPoint {
    /// Longitude in degrees
    #[inline]
    pub fn lon(&self) -> f64 {
        self.coord.x
    }

    /// Latitude in degrees
    #[inline]
    pub fn lat(&self) -> f64 {
        self.coord.y
    }

    /// Whether the step from `self` to `next` is part of the traveled path
    ///
    /// A step between two boundary points is treated as the jump from one
    /// segment to the next: it is neither measured nor drawn. This also drops
    /// the single step of a two-point segment, and the step between two
    /// adjacent single-point segments.
    #[inline]
    pub fn links_to(&self, next: &TrackPoint) -> bool {
        !(self.is_segment_boundary && next.is_segment_boundary)
    }
}

/// Append-only collection of track points with a fixed logical capacity
#[derive(Clone, Debug)]
pub struct TrackStore {
    points: Vec<TrackPoint>,
    capacity: usize,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl TrackStore {
    /// Create an empty store that accepts at most `capacity` points
    pub fn new(capacity: usize) -> Self {
        Self {
            points: Vec::new(),
            capacity,
        }
    }

    /// Append one segment, flagging its first and last point as boundaries
    ///
    /// A single-point segment gets its only point flagged. An empty segment is a
    /// no-op. If the segment does not fit in the remaining capacity nothing is
    /// appended and `Error::CapacityExceeded` is returned.
    pub fn append_segment(&mut self, coords: &[Coord<f64>]) -> Result<()> {
        if coords.is_empty() {
            return Ok(());
        }
        if coords.len() > self.capacity - self.points.len() {
            return Err(Error::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let start = self.points.len();
        self.points.extend(coords.iter().map(|&coord| TrackPoint {
            coord,
            is_segment_boundary: false,
        }));
        let end = self.points.len() - 1;
        self.points[start].is_segment_boundary = true;
        self.points[end].is_segment_boundary = true;

        Ok(())
    }

    /// Number of points stored so far
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the store holds no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Maximum number of points the store accepts
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// All points in ingestion order
    #[inline]
    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    /// Get a point by index
    #[inline]
    pub fn get(&self, index: usize) -> Option<&TrackPoint> {
        self.points.get(index)
    }

    /// Read-only view of the points in `from..to`
    ///
    /// Panics if the range is out of bounds, like slice indexing.
    #[inline]
    pub fn slice(&self, from: usize, to: usize) -> &[TrackPoint] {
        &self.points[from..to]
    }
}
