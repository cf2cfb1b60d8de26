use geo::GeoFloat;

use crate::{edge::Edge, graph::Node, matrix::IntersectionMatrix, topology::Label};

/// State shared by the nodes and edges of a graph.
#[derive(Debug, Clone)]
pub struct GraphComponent {
    label: Label,
    in_result: bool,
    covered: bool,
    covered_set: bool,
    visited: bool,
}

impl GraphComponent {
    pub fn new(label: Label) -> Self {
        GraphComponent {
            label,
            in_result: false,
            covered: false,
            covered_set: false,
            visited: false,
        }
    }

    #[inline]
    pub fn label(&self) -> &Label {
        &self.label
    }

    #[inline]
    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    pub fn set_label(&mut self, label: Label) {
        self.label = label;
    }

    #[inline]
    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    pub fn set_in_result(&mut self, in_result: bool) {
        self.in_result = in_result;
    }

    #[inline]
    pub fn is_covered(&self) -> bool {
        self.covered
    }

    /// Whether [`Self::set_covered`] was ever called.
    #[inline]
    pub fn is_covered_set(&self) -> bool {
        self.covered_set
    }

    pub fn set_covered(&mut self, covered: bool) {
        self.covered = covered;
        self.covered_set = true;
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}

/// A borrowed graph component: either a node or an edge.
#[derive(Debug, Clone, Copy)]
pub enum ComponentRef<'a, T: GeoFloat> {
    Node(&'a Node<T>),
    Edge(&'a Edge<T>),
}

impl<'a, T: GeoFloat> ComponentRef<'a, T> {
    pub fn component(&self) -> &'a GraphComponent {
        match *self {
            ComponentRef::Node(n) => n.component(),
            ComponentRef::Edge(e) => e.component(),
        }
    }

    pub fn label(&self) -> &'a Label {
        self.component().label()
    }

    /// Whether the component touches only one of the geometries.
    pub fn is_isolated(&self) -> bool {
        match *self {
            ComponentRef::Node(n) => n.is_isolated(),
            ComponentRef::Edge(e) => e.is_isolated(),
        }
    }

    /// Contribute the component's label to `im`.
    pub fn compute_im(&self, im: &mut IntersectionMatrix) {
        match *self {
            ComponentRef::Node(n) => n.compute_im(im),
            ComponentRef::Edge(e) => e.compute_im(im),
        }
    }

    /// As [`Self::compute_im`].
    ///
    /// # Panics
    ///
    /// If the label does not describe both geometries.
    pub fn update_im(&self, im: &mut IntersectionMatrix) {
        assert!(
            self.label().geometry_count() >= 2,
            "found partial label while updating intersection matrix"
        );
        self.compute_im(im);
    }
}
