use geo::{Coordinate, GeoFloat, LineString};

use super::{DirEdgeId, RingId};
use crate::topology::{Label, Position};

/// Which links of the directed edges a ring follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingKind {
    /// Follows `next`; may touch itself at nodes.
    Maximal,
    /// Follows `next_min`; a maximal ring split at its self-touching
    /// nodes.
    Minimal,
}

/// A closed ring of directed edges.
///
/// Rings are built by [`PlanarGraph::build_ring`](super::PlanarGraph::build_ring)
/// and stored in the graph; shells and holes refer to each other by
/// [`RingId`].
#[derive(Debug, Clone)]
pub struct EdgeRing<T: GeoFloat> {
    pub(super) kind: RingKind,
    pub(super) start: DirEdgeId,
    pub(super) edges: Vec<DirEdgeId>,
    pub(super) pts: Vec<Coordinate<T>>,
    pub(super) label: Label,
    pub(super) is_hole: bool,
    pub(super) shell: Option<RingId>,
    pub(super) holes: Vec<RingId>,
}

impl<T: GeoFloat> EdgeRing<T> {
    pub(super) fn new(kind: RingKind, start: DirEdgeId) -> Self {
        EdgeRing {
            kind,
            start,
            edges: vec![],
            pts: vec![],
            label: Label::line(None),
            is_hole: false,
            shell: None,
            holes: vec![],
        }
    }

    #[inline]
    pub fn kind(&self) -> RingKind {
        self.kind
    }

    #[inline]
    pub fn start(&self) -> DirEdgeId {
        self.start
    }

    /// The directed edges of the ring, in order.
    pub fn edges(&self) -> &[DirEdgeId] {
        &self.edges
    }

    /// The closed coordinate sequence of the ring.
    pub fn coords(&self) -> &[Coordinate<T>] {
        &self.pts
    }

    pub fn line_string(&self) -> LineString<T> {
        LineString::from(self.pts.clone())
    }

    /// The label merged from the right sides of the ring's edges.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// Whether the ring winds opposite to the configured shell
    /// orientation.
    pub fn is_hole(&self) -> bool {
        self.is_hole
    }

    /// A ring is a shell until it is assigned to one.
    pub fn is_shell(&self) -> bool {
        self.shell.is_none()
    }

    pub fn shell(&self) -> Option<RingId> {
        self.shell
    }

    pub fn holes(&self) -> &[RingId] {
        &self.holes
    }

    /// Whether the ring is labelled by only one geometry.
    pub fn is_single_geometry(&self) -> bool {
        self.label.geometry_count() == 1
    }

    /// Append the points of an edge in the given direction. The first
    /// point is skipped unless this is the first edge, as it repeats
    /// the last point added.
    pub(super) fn add_points(&mut self, coords: &[Coordinate<T>], forward: bool, first_edge: bool) {
        let skip = if first_edge { 0 } else { 1 };
        if forward {
            self.pts.extend(coords.iter().skip(skip).copied());
        } else {
            self.pts.extend(coords.iter().rev().skip(skip).copied());
        }
    }

    /// Take the right location of each geometry from `de_label`,
    /// unless already known.
    pub(super) fn merge_label(&mut self, de_label: &Label) {
        for gi in 0..2 {
            if !de_label.is_area_for(gi) {
                continue;
            }
            let loc = match de_label.location(gi, Position::Right) {
                Some(loc) => loc,
                None => continue,
            };
            if self.label.on_location(gi).is_none() {
                self.label.set_on_location(gi, Some(loc));
            }
        }
    }
}
