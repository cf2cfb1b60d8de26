use geo::{Coordinate, GeoFloat, Line};
use slab::Slab;

use super::EdgeRef;
use crate::events::{EventType, SweepLineEvent};

/// One segment of an edge registered with the sweep.
///
/// Identified by the edge handle and the index of the segment within
/// the edge; stores the x-interval the sweep works with.
#[derive(Debug, Clone, Copy)]
pub struct SweepLineSegment<T: GeoFloat> {
    key: usize,
    edge: EdgeRef,
    segment_index: usize,
    min_x: T,
    max_x: T,
}

impl<T: GeoFloat> SweepLineSegment<T> {
    /// Create and store a segment for `coords[segment_index..=segment_index + 1]`.
    pub(crate) fn new<'a>(
        storage: &'a mut Slab<Self>,
        edge: EdgeRef,
        coords: &[Coordinate<T>],
        segment_index: usize,
    ) -> &'a mut Self {
        let p0 = coords[segment_index];
        let p1 = coords[segment_index + 1];
        let entry = storage.vacant_entry();
        let segment = SweepLineSegment {
            key: entry.key(),
            edge,
            segment_index,
            min_x: p0.x.min(p1.x),
            max_x: p0.x.max(p1.x),
        };
        entry.insert(segment)
    }

    #[inline]
    pub fn edge(&self) -> EdgeRef {
        self.edge
    }

    #[inline]
    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    #[inline]
    pub fn min_x(&self) -> T {
        self.min_x
    }

    #[inline]
    pub fn max_x(&self) -> T {
        self.max_x
    }

    /// The segment as a line, given the coordinates of its edge.
    pub fn line(&self, coords: &[Coordinate<T>]) -> Line<T> {
        Line::new(coords[self.segment_index], coords[self.segment_index + 1])
    }

    /// The insert and delete events of this segment.
    pub(crate) fn events(&self, edge_set: Option<usize>) -> [SweepLineEvent<T>; 2] {
        [
            SweepLineEvent::new(self.min_x, EventType::Insert, edge_set, self.key),
            SweepLineEvent::new(self.max_x, EventType::Delete, edge_set, self.key),
        ]
    }
}
