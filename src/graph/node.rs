use std::fmt;

use geo::{coordinate_position::CoordPos, dimensions::Dimensions, Coordinate, GeoFloat};

use super::{DirectedEdge, DirectedEdgeStar};
use crate::{component::GraphComponent, edge::Edge, matrix::IntersectionMatrix, topology::Label};

/// A point of a graph where edges meet, with the star of directed
/// edges leaving it.
#[derive(Debug, Clone)]
pub struct Node<T: GeoFloat> {
    coord: Coordinate<T>,
    component: GraphComponent,
    star: DirectedEdgeStar,
    z_values: Vec<T>,
}

impl<T: GeoFloat> Node<T> {
    /// A node with an undefined label and no edges.
    pub fn new(coord: Coordinate<T>) -> Self {
        Node {
            coord,
            component: GraphComponent::new(Label::line(None)),
            star: DirectedEdgeStar::new(),
            z_values: vec![],
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Coordinate<T> {
        self.coord
    }

    #[inline]
    pub fn component(&self) -> &GraphComponent {
        &self.component
    }

    #[inline]
    pub fn component_mut(&mut self) -> &mut GraphComponent {
        &mut self.component
    }

    #[inline]
    pub fn label(&self) -> &Label {
        self.component.label()
    }

    #[inline]
    pub fn star(&self) -> &DirectedEdgeStar {
        &self.star
    }

    #[inline]
    pub fn star_mut(&mut self) -> &mut DirectedEdgeStar {
        &mut self.star
    }

    /// A node is isolated if it is labelled by only one geometry.
    pub fn is_isolated(&self) -> bool {
        self.label().geometry_count() == 1
    }

    /// Whether some incident edge is in the result.
    pub fn is_incident_edge_in_result(&self, des: &[DirectedEdge<T>], edges: &[Edge<T>]) -> bool {
        self.star
            .ids()
            .iter()
            .any(|id| edges[des[*id].edge()].component().is_in_result())
    }

    /// Record the z-value of a coordinate merged into this node.
    ///
    /// NaN and repeated values are ignored.
    pub fn add_z(&mut self, z: T) {
        if z.is_nan() || self.z_values.contains(&z) {
            return;
        }
        self.z_values.push(z);
    }

    pub fn z_values(&self) -> &[T] {
        &self.z_values
    }

    /// Mean of the recorded z-values; NaN if there are none.
    pub fn z(&self) -> T {
        if self.z_values.is_empty() {
            return T::nan();
        }
        let sum = self.z_values.iter().fold(T::zero(), |acc, z| acc + *z);
        sum / T::from(self.z_values.len()).unwrap_or_else(T::nan)
    }

    /// Take the locations of `other` for the geometries this node's
    /// label leaves undefined.
    pub fn merge_label(&mut self, other: &Label) {
        for gi in 0..2 {
            let loc = self.merged_location(other, gi);
            if self.label().on_location(gi).is_none() {
                self.component.label_mut().set_on_location(gi, loc);
            }
        }
    }

    pub fn merge_label_from(&mut self, other: &Node<T>) {
        let label = other.label().clone();
        self.merge_label(&label);
    }

    /// The location of geometry `geom_index` after merging `other`:
    /// a boundary location is kept, anything else is replaced by a
    /// defined location of `other`.
    pub fn merged_location(&self, other: &Label, geom_index: usize) -> Option<CoordPos> {
        let loc = self.label().on_location(geom_index);
        if other.is_empty(geom_index) || loc == Some(CoordPos::OnBoundary) {
            loc
        } else {
            other.on_location(geom_index)
        }
    }

    pub fn set_label(&mut self, geom_index: usize, loc: Option<CoordPos>) {
        self.component.label_mut().set_on_location(geom_index, loc);
    }

    /// Toggle the boundary location of `geom_index`: a boundary node
    /// becomes interior, anything else becomes boundary.
    pub fn set_label_boundary(&mut self, geom_index: usize) {
        let new_loc = match self.label().on_location(geom_index) {
            Some(CoordPos::OnBoundary) => CoordPos::Inside,
            Some(CoordPos::Inside) => CoordPos::OnBoundary,
            _ => CoordPos::OnBoundary,
        };
        self.set_label(geom_index, Some(new_loc));
    }

    /// Contribute the node's label to `im`.
    pub fn compute_im(&self, im: &mut IntersectionMatrix) {
        im.set_at_least_if_valid(
            self.label().on_location(0),
            self.label().on_location(1),
            Dimensions::ZeroDimensional,
        );
    }
}

impl<T: GeoFloat> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node {:?} lbl: {}", self.coord, self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PlanarGraph;

    #[test]
    fn test_merge_label() {
        let mut node = Node::new(Coordinate { x: 0., y: 0. });
        node.set_label(0, Some(CoordPos::OnBoundary));
        node.merge_label(&Label::line(Some(CoordPos::Inside)));
        assert_eq!(node.label().on_location(0), Some(CoordPos::OnBoundary));
        assert_eq!(node.label().on_location(1), Some(CoordPos::Inside));
        assert!(!node.is_isolated());
    }

    #[test]
    fn test_set_label_boundary() {
        let mut node = Node::new(Coordinate { x: 0., y: 0. });
        node.set_label_boundary(0);
        assert_eq!(node.label().on_location(0), Some(CoordPos::OnBoundary));
        assert!(node.is_isolated());
        node.set_label_boundary(0);
        assert_eq!(node.label().on_location(0), Some(CoordPos::Inside));
    }

    #[test]
    fn test_incident_edge_in_result() {
        let mut graph = PlanarGraph::default();
        let label = Label::line_for(0, Some(CoordPos::Inside));
        graph.add_edges(vec![
            Edge::new(vec![(0., 0.).into(), (1., 0.).into()], label.clone()),
            Edge::new(vec![(1., 0.).into(), (1., 1.).into()], label),
        ]);
        let in_result = |graph: &PlanarGraph<f64>, x: f64, y: f64| {
            let id = graph.find_node(Coordinate { x, y }).unwrap();
            graph
                .node(id)
                .is_incident_edge_in_result(graph.directed_edges(), graph.edges())
        };
        assert!(!in_result(&graph, 1., 0.));

        graph.edges_mut()[1].component_mut().set_in_result(true);
        assert!(!in_result(&graph, 0., 0.));
        assert!(in_result(&graph, 1., 0.));
        assert!(in_result(&graph, 1., 1.));
    }

    #[test]
    fn test_z_values() {
        let mut node = Node::<f64>::new(Coordinate { x: 0., y: 0. });
        assert!(node.z().is_nan());
        node.add_z(1.);
        node.add_z(f64::NAN);
        node.add_z(3.);
        node.add_z(3.);
        assert_eq!(node.z_values(), &[1., 3.]);
        assert_eq!(node.z(), 2.);
    }

    #[test]
    fn test_compute_im() {
        let mut node = Node::new(Coordinate { x: 0., y: 0. });
        node.set_label(0, Some(CoordPos::OnBoundary));
        node.set_label(1, Some(CoordPos::Inside));
        let mut im = IntersectionMatrix::new();
        node.compute_im(&mut im);
        assert_eq!(im.get(CoordPos::OnBoundary, CoordPos::Inside), Dimensions::ZeroDimensional);
    }
}
