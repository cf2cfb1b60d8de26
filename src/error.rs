use geo::{Coordinate, GeoFloat};
use thiserror::Error;

/// A topology inconsistency found while labelling or linking a graph.
///
/// These errors indicate that the input is malformed or was not fully
/// noded. They are never patched over: the caller must re-node the
/// input before trying again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TopologyError<T: GeoFloat> {
    #[error("side location conflict at {0:?}")]
    SideLocationConflict(Coordinate<T>),

    #[error("found single null side at {0:?}")]
    SingleNullSide(Coordinate<T>),

    #[error("found unlabelled area edge at {0:?}")]
    UnlabelledAreaEdge(Coordinate<T>),

    #[error("found non-area edge at {0:?}")]
    NonAreaEdge(Coordinate<T>),

    #[error("no outgoing directed edge found at {0:?}")]
    NoOutgoingEdge(Coordinate<T>),

    #[error("unable to link last incoming directed edge at {0:?}")]
    UnlinkedIncomingEdge(Coordinate<T>),

    #[error("depth mismatch at {0:?}")]
    DepthMismatch(Coordinate<T>),

    #[error("assigned depths do not match at {0:?}")]
    AssignedDepthMismatch(Coordinate<T>),

    #[error("directed edge visited twice during ring-building at {0:?}")]
    RingEdgeVisitedTwice(Coordinate<T>),

    #[error("directed edge without successor during ring-building at {0:?}")]
    RingEdgeWithoutNext(Coordinate<T>),

    #[error("found two horizontal edges incident on node at {0:?}")]
    TwoHorizontalEdges(Coordinate<T>),
}

impl<T: GeoFloat> TopologyError<T> {
    /// The coordinate at which the inconsistency was detected.
    pub fn coordinate(&self) -> Coordinate<T> {
        use TopologyError::*;
        match *self {
            SideLocationConflict(c)
            | SingleNullSide(c)
            | UnlabelledAreaEdge(c)
            | NonAreaEdge(c)
            | NoOutgoingEdge(c)
            | UnlinkedIncomingEdge(c)
            | DepthMismatch(c)
            | AssignedDepthMismatch(c)
            | RingEdgeVisitedTwice(c)
            | RingEdgeWithoutNext(c)
            | TwoHorizontalEdges(c) => c,
        }
    }
}

pub type Result<V, T> = std::result::Result<V, TopologyError<T>>;
