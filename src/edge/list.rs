use std::collections::BTreeMap;

use geo::GeoFloat;

use super::Edge;
use crate::events::SweepPoint;

/// A list of edges with an index for finding equal edges.
///
/// Two edges are equal if their coordinates agree forwards or
/// backwards. The index is keyed by the coordinates in whichever of
/// the two orders is lexicographically smaller.
#[derive(Debug, Clone)]
pub struct EdgeList<T: GeoFloat> {
    edges: Vec<Edge<T>>,
    index: BTreeMap<Vec<SweepPoint<T>>, usize>,
}

impl<T: GeoFloat> Default for EdgeList<T> {
    fn default() -> Self {
        EdgeList {
            edges: vec![],
            index: BTreeMap::new(),
        }
    }
}

fn oriented_key<T: GeoFloat>(edge: &Edge<T>) -> Vec<SweepPoint<T>> {
    let fwd: Vec<SweepPoint<T>> = edge.coords().iter().map(|c| SweepPoint::from(*c)).collect();
    let rev: Vec<SweepPoint<T>> = fwd.iter().rev().copied().collect();
    if rev < fwd {
        rev
    } else {
        fwd
    }
}

impl<T: GeoFloat> EdgeList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an edge and return its index.
    ///
    /// If an equal edge is already indexed, the index keeps pointing
    /// to the first one.
    pub fn add(&mut self, edge: Edge<T>) -> usize {
        let idx = self.edges.len();
        self.index.entry(oriented_key(&edge)).or_insert(idx);
        self.edges.push(edge);
        idx
    }

    pub fn add_all<I: IntoIterator<Item = Edge<T>>>(&mut self, edges: I) {
        for e in edges {
            self.add(e);
        }
    }

    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut [Edge<T>] {
        &mut self.edges
    }

    pub fn get(&self, idx: usize) -> &Edge<T> {
        &self.edges[idx]
    }

    pub fn get_mut(&mut self, idx: usize) -> &mut Edge<T> {
        &mut self.edges[idx]
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// The index of an edge equal to `edge`, if one was added.
    pub fn find_equal_edge(&self, edge: &Edge<T>) -> Option<usize> {
        self.index.get(&oriented_key(edge)).copied()
    }

    /// The index of the first edge pointwise equal to `edge`.
    pub fn find_edge_index(&self, edge: &Edge<T>) -> Option<usize> {
        self.edges.iter().position(|e| e.is_pointwise_equal(edge))
    }

    pub fn into_edges(self) -> Vec<Edge<T>> {
        self.edges
    }
}

#[cfg(test)]
mod tests {
    use geo::Coordinate;

    use super::*;
    use crate::topology::Label;

    fn edge(pts: &[(f64, f64)]) -> Edge<f64> {
        Edge::new(
            pts.iter().map(|&(x, y)| Coordinate { x, y }).collect(),
            Label::line(None),
        )
    }

    #[test]
    fn test_find_equal_edge() {
        let mut list = EdgeList::new();
        list.add(edge(&[(0., 0.), (1., 1.)]));
        list.add(edge(&[(1., 1.), (2., 0.), (3., 3.)]));

        assert_eq!(list.find_equal_edge(&edge(&[(3., 3.), (2., 0.), (1., 1.)])), Some(1));
        assert_eq!(list.find_equal_edge(&edge(&[(0., 0.), (1., 1.)])), Some(0));
        assert_eq!(list.find_equal_edge(&edge(&[(0., 0.), (2., 2.)])), None);

        assert_eq!(list.find_edge_index(&edge(&[(1., 1.), (2., 0.), (3., 3.)])), Some(1));
        assert_eq!(list.find_edge_index(&edge(&[(3., 3.), (2., 0.), (1., 1.)])), None);
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let mut list = EdgeList::new();
        list.add_all(vec![edge(&[(0., 0.), (1., 1.)]), edge(&[(1., 1.), (0., 0.)])]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.find_equal_edge(&edge(&[(0., 0.), (1., 1.)])), Some(0));
    }
}
