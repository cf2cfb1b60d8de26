use std::collections::BTreeMap;

use geo::{coordinate_position::CoordPos, Coordinate, GeoFloat};

use super::{DirEdgeId, DirectedEdge, Node, NodeId};
use crate::events::SweepPoint;

/// The nodes of a graph, indexed by coordinate.
///
/// Adding a node at an existing coordinate returns the existing node,
/// so coincident points coalesce into a single node.
#[derive(Debug, Clone)]
pub struct NodeMap<T: GeoFloat> {
    nodes: Vec<Node<T>>,
    index: BTreeMap<SweepPoint<T>, NodeId>,
}

impl<T: GeoFloat> Default for NodeMap<T> {
    fn default() -> Self {
        NodeMap {
            nodes: vec![],
            index: BTreeMap::new(),
        }
    }
}

impl<T: GeoFloat> NodeMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The node at `coord`, created if needed.
    pub fn add_node(&mut self, coord: Coordinate<T>) -> NodeId {
        let nodes = &mut self.nodes;
        *self.index.entry(SweepPoint::from(coord)).or_insert_with(|| {
            nodes.push(Node::new(coord));
            nodes.len() - 1
        })
    }

    /// Add `node`, or merge its label into the node already present
    /// at its coordinate.
    pub fn add_node_labelled(&mut self, node: Node<T>) -> NodeId {
        match self.find(node.coordinate()) {
            Some(id) => {
                self.nodes[id].merge_label_from(&node);
                id
            }
            None => {
                let id = self.nodes.len();
                self.index.insert(SweepPoint::from(node.coordinate()), id);
                self.nodes.push(node);
                id
            }
        }
    }

    /// Insert a directed edge in the star of the node at its start,
    /// creating the node if needed.
    pub(crate) fn add_edge_end(&mut self, id: DirEdgeId, des: &mut [DirectedEdge<T>]) -> NodeId {
        let node = self.add_node(des[id].coordinate());
        self.nodes[node].star_mut().insert(id, des);
        des[id].set_node(node);
        node
    }

    pub fn find(&self, coord: Coordinate<T>) -> Option<NodeId> {
        self.index.get(&SweepPoint::from(coord)).copied()
    }

    #[inline]
    pub fn get(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id]
    }

    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut Node<T> {
        &mut self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Node ids sorted by coordinate.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.values().copied()
    }

    /// Nodes sorted by coordinate.
    pub fn iter(&self) -> impl Iterator<Item = &Node<T>> + '_ {
        self.index.values().map(move |id| &self.nodes[*id])
    }

    /// The nodes on the boundary of geometry `geom_index`.
    pub fn boundary_nodes(&self, geom_index: usize) -> Vec<NodeId> {
        self.ids()
            .filter(|id| self.nodes[*id].label().on_location(geom_index) == Some(CoordPos::OnBoundary))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::Label;

    #[test]
    fn test_add_node_twice() {
        let mut map = NodeMap::new();
        let a = map.add_node(Coordinate { x: 1., y: 2. });
        let b = map.add_node(Coordinate { x: 0., y: 5. });
        let c = map.add_node(Coordinate { x: 1., y: 2. });
        assert_eq!(a, c);
        assert_ne!(a, b);
        assert_eq!(map.len(), 2);
        assert_eq!(map.find(Coordinate { x: 0., y: 5. }), Some(b));
        assert_eq!(map.find(Coordinate { x: 9., y: 9. }), None);

        let order: Vec<_> = map.iter().map(|n| n.coordinate().x).collect();
        assert_eq!(order, vec![0., 1.]);
    }

    #[test]
    fn test_add_node_labelled_merges() {
        let mut map = NodeMap::new();
        let mut n1 = Node::new(Coordinate { x: 0., y: 0. });
        n1.set_label(0, Some(CoordPos::OnBoundary));
        let id = map.add_node_labelled(n1);

        let mut n2 = Node::new(Coordinate { x: 0., y: 0. });
        n2.set_label(0, Some(CoordPos::Inside));
        n2.set_label(1, Some(CoordPos::Outside));
        assert_eq!(map.add_node_labelled(n2), id);

        let label: &Label = map.get(id).label();
        assert_eq!(label.on_location(0), Some(CoordPos::OnBoundary));
        assert_eq!(label.on_location(1), Some(CoordPos::Outside));
        assert_eq!(map.boundary_nodes(0), vec![id]);
        assert!(map.boundary_nodes(1).is_empty());
    }
}
