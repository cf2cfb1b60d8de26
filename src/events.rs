use std::cmp::Ordering;

use geo::{Coordinate, GeoFloat};

/// Wraps a [`Coordinate`] to support lexicographic ordering.
///
/// The ordering is by `x` and then by `y`. Implements `PartialOrd`,
/// `Ord` and `Eq` even though `Coordinate` doesn't implement these.
/// This is necessary to key ordered collections by coordinate, such
/// as the node map of a graph or the index of an edge list.
///
/// Note that the trait impls exist even when `T` is not `Eq` or
/// `Ord`. We must ensure that any sweep point only contains values
/// that can be consistently ordered.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct SweepPoint<T: GeoFloat>(Coordinate<T>);

impl<T: GeoFloat> SweepPoint<T> {
    /// Get the wrapped coordinate.
    #[inline]
    pub fn coord(&self) -> Coordinate<T> {
        self.0
    }
}

/// Implememnt lexicographic ordering by `x` and then by `y`
/// coordinate.
impl<T: GeoFloat> PartialOrd for SweepPoint<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.0.x.partial_cmp(&other.0.x) {
            Some(Ordering::Equal) => self.0.y.partial_cmp(&other.0.y),
            o => o,
        }
    }
}

/// Derive `Ord` from `PartialOrd` and expect to not fail.
impl<T: GeoFloat> Ord for SweepPoint<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap()
    }
}

/// We derive `Eq` manually to not require `T: Eq`.
impl<T: GeoFloat> Eq for SweepPoint<T> {}

/// Create from `Coordinate` while checking the components are finite.
impl<T: GeoFloat> From<Coordinate<T>> for SweepPoint<T> {
    fn from(pt: Coordinate<T>) -> Self {
        assert!(
            pt.x.is_finite(),
            "sweep point requires a finite x-coordinate"
        );
        assert!(
            pt.y.is_finite(),
            "sweep point requires a finite y-coordinate"
        );
        SweepPoint(pt)
    }
}

/// Event type to associate with a sweep-line event.
///
/// The ordering of the variants is important for the algorithm: at
/// equal `x`, inserts are processed before deletes. Thus the scan
/// range of an insert always covers every segment whose x-interval
/// merely touches it.
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Clone, Copy)]
pub enum EventType {
    Insert,
    Delete,
}

/// A sweep event of the x-interval sweep.
///
/// Each segment produces one insert event at its minimum `x` and one
/// delete event at its maximum `x`. After the events are sorted, the
/// insert event records the position of its delete event, and the
/// delete event records the position of its insert event.
#[derive(Debug, Clone)]
pub struct SweepLineEvent<T: GeoFloat> {
    x: T,
    ty: EventType,
    edge_set: Option<usize>,
    segment_key: usize,
    paired_index: Option<usize>,
}

impl<T: GeoFloat> SweepLineEvent<T> {
    pub(crate) fn new(x: T, ty: EventType, edge_set: Option<usize>, segment_key: usize) -> Self {
        assert!(x.is_finite(), "sweep event requires a finite x-coordinate");
        SweepLineEvent {
            x,
            ty,
            edge_set,
            segment_key,
            paired_index: None,
        }
    }

    /// The sweep coordinate of this event.
    #[inline]
    pub fn x(&self) -> T {
        self.x
    }

    #[inline]
    pub fn ty(&self) -> EventType {
        self.ty
    }

    #[inline]
    pub fn is_insert(&self) -> bool {
        self.ty == EventType::Insert
    }

    #[inline]
    pub fn is_delete(&self) -> bool {
        self.ty == EventType::Delete
    }

    /// The group tag of the segment (`None` in self-noding mode).
    #[inline]
    pub fn edge_set(&self) -> Option<usize> {
        self.edge_set
    }

    /// Key of the segment in the sweep's segment storage.
    #[inline]
    pub fn segment_key(&self) -> usize {
        self.segment_key
    }

    /// For an insert event, the position of its delete event in the
    /// sorted event list. `None` before the events are prepared.
    #[inline]
    pub fn delete_event_index(&self) -> Option<usize> {
        if self.is_insert() {
            self.paired_index
        } else {
            None
        }
    }

    /// For a delete event, the position of its insert event in the
    /// sorted event list. `None` before the events are prepared.
    #[inline]
    pub fn insert_event_index(&self) -> Option<usize> {
        if self.is_delete() {
            self.paired_index
        } else {
            None
        }
    }

    pub(crate) fn set_paired_index(&mut self, idx: usize) {
        self.paired_index = Some(idx);
    }
}

/// Equality check consistent with the ordering.
impl<T: GeoFloat> PartialEq for SweepLineEvent<T> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

/// Assert total equality
impl<T: GeoFloat> Eq for SweepLineEvent<T> {}

/// Ordering by `x`, then by event type (inserts first), then by
/// segment key. The last tie-break makes the sort deterministic.
impl<T: GeoFloat> PartialOrd for SweepLineEvent<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(
            self.x
                .partial_cmp(&other.x)?
                .then_with(|| self.ty.cmp(&other.ty))
                .then_with(|| self.segment_key.cmp(&other.segment_key)),
        )
    }
}

/// Derive `Ord` from `PartialOrd` and expect to not fail.
impl<T: GeoFloat> Ord for SweepLineEvent<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap()
    }
}
