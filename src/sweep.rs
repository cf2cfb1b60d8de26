//! Plane sweep over the x-intervals of edge segments.
//!
//! The sweep reports every pair of segments whose x-intervals overlap
//! to a [`SegmentIntersector`], and records the intersections it
//! returns on the edges. Pairs whose x-intervals are disjoint are
//! never reported.

mod segment;
pub use segment::SweepLineSegment;

use geo::{Coordinate, GeoFloat};
use log::{debug, trace};
use slab::Slab;

use crate::{
    edge::Edge,
    events::SweepLineEvent,
    intersector::{SegmentIntersector, SegmentRef},
};

/// Handle of an edge in the slices passed to
/// [`SimpleSweepLineIntersector::compute_intersections`].
///
/// `set` indexes the outer slice and `index` the edge within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeRef {
    pub set: usize,
    pub index: usize,
}

/// Finds candidate intersecting segment pairs with a sweep over
/// segment x-intervals.
///
/// Segments are added first, then [`Self::compute_intersections`]
/// sorts the events and sweeps them once. Each segment may carry an
/// edge set tag: two segments with the same tag are never compared,
/// while untagged segments are compared with everything.
#[derive(Debug, Clone)]
pub struct SimpleSweepLineIntersector<T: GeoFloat> {
    segments: Slab<SweepLineSegment<T>>,
    events: Vec<SweepLineEvent<T>>,
    prepared: bool,
    overlaps: usize,
}

impl<T: GeoFloat> Default for SimpleSweepLineIntersector<T> {
    fn default() -> Self {
        SimpleSweepLineIntersector {
            segments: Slab::new(),
            events: vec![],
            prepared: false,
            overlaps: 0,
        }
    }
}

impl<T: GeoFloat> SimpleSweepLineIntersector<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the segments of one edge.
    ///
    /// `edge` is the handle under which the edge will be passed to
    /// [`Self::compute_intersections`].
    pub fn add(&mut self, edge: EdgeRef, coords: &[Coordinate<T>], edge_set: Option<usize>) {
        for segment_index in 0..coords.len().saturating_sub(1) {
            let segment = SweepLineSegment::new(&mut self.segments, edge, coords, segment_index);
            self.events.extend(segment.events(edge_set).iter().cloned());
        }
        self.prepared = false;
    }

    /// Add every edge of `edges` as set `set`.
    ///
    /// In self-noding mode pass `edge_set` as `None`. Otherwise every
    /// edge is tagged with `edge_set`, or with its own index when
    /// `each_edge_own_set` is true.
    pub fn add_edges(
        &mut self,
        set: usize,
        edges: &[Edge<T>],
        edge_set: Option<usize>,
        each_edge_own_set: bool,
    ) {
        for (index, edge) in edges.iter().enumerate() {
            let tag = if each_edge_own_set { Some(index) } else { edge_set };
            self.add(EdgeRef { set, index }, edge.coords(), tag);
        }
    }

    /// Sort the events and pair each insert with its delete.
    ///
    /// Events are sorted by x. At equal x, inserts come before
    /// deletes, so segments that merely touch in x are still
    /// compared. Remaining ties are broken by segment key.
    pub fn prepare_events(&mut self) {
        if self.prepared {
            return;
        }
        self.events.sort();

        let mut insert_index = vec![None; self.segments.capacity()];
        for i in 0..self.events.len() {
            let key = self.events[i].segment_key();
            if self.events[i].is_insert() {
                insert_index[key] = Some(i);
            } else if let Some(ins) = insert_index[key] {
                self.events[i].set_paired_index(ins);
                self.events[ins].set_paired_index(i);
            }
        }
        self.prepared = true;
        debug!(
            "prepared {} events for {} segments",
            self.events.len(),
            self.segments.len()
        );
    }

    /// The events; sorted and paired once prepared.
    pub fn events(&self) -> &[SweepLineEvent<T>] {
        &self.events
    }

    pub fn segments(&self) -> &Slab<SweepLineSegment<T>> {
        &self.segments
    }

    /// Number of candidate pairs passed to the intersector by the last
    /// sweep.
    pub fn overlaps(&self) -> usize {
        self.overlaps
    }

    /// Run the sweep, passing every candidate pair to `si`.
    ///
    /// Intersections returned by `si` are recorded on both edges of
    /// the pair. `edges[set][index]` must be the edge added under
    /// `EdgeRef { set, index }`.
    pub fn compute_intersections<S: SegmentIntersector<T>>(
        &mut self,
        edges: &mut [&mut [Edge<T>]],
        si: &mut S,
    ) {
        self.prepare_events();
        self.overlaps = 0;

        for i in 0..self.events.len() {
            let ev0 = &self.events[i];
            let j = match ev0.delete_event_index() {
                Some(j) => j,
                None => continue,
            };
            let seg0 = self.segments[ev0.segment_key()];
            for ev1 in self.events[i + 1..j].iter() {
                if !ev1.is_insert() {
                    continue;
                }
                if ev0.edge_set().is_some() && ev0.edge_set() == ev1.edge_set() {
                    continue;
                }
                let seg1 = self.segments[ev1.segment_key()];
                trace!(
                    "candidate {:?}#{} x {:?}#{}",
                    seg0.edge(),
                    seg0.segment_index(),
                    seg1.edge(),
                    seg1.segment_index()
                );
                process_overlap(edges, &seg0, &seg1, si);
                self.overlaps += 1;
            }
        }
        debug!("sweep found {} overlapping segment pairs", self.overlaps);
    }
}

fn process_overlap<T: GeoFloat, S: SegmentIntersector<T>>(
    edges: &mut [&mut [Edge<T>]],
    seg0: &SweepLineSegment<T>,
    seg1: &SweepLineSegment<T>,
    si: &mut S,
) {
    let (e0, e1) = (seg0.edge(), seg1.edge());
    let outcome = si.process_pair(
        SegmentRef {
            edge: e0,
            segment_index: seg0.segment_index(),
            coords: edges[e0.set][e0.index].coords(),
        },
        SegmentRef {
            edge: e1,
            segment_index: seg1.segment_index(),
            coords: edges[e1.set][e1.index].coords(),
        },
    );

    if let Some(isec) = &outcome.intersection {
        edges[e0.set][e0.index].add_intersections(isec, seg0.segment_index(), 0);
        edges[e1.set][e1.index].add_intersections(isec, seg1.segment_index(), 1);
    }
    if outcome.touched {
        edges[e0.set][e0.index].set_isolated(false);
        edges[e1.set][e1.index].set_isolated(false);
    }
}
