use geo::{
    coordinate_position::{CoordPos, CoordinatePosition},
    kernels::{Kernel, Orientation},
    Coordinate, GeoFloat, Geometry, LineString, Polygon,
};
use log::{debug, trace};

use super::{DirEdgeId, DirectedEdge, EdgeRing, Node, NodeId, NodeMap, RingId, RingKind};
use crate::{
    config::GraphConfig,
    edge::Edge,
    error::{Result, TopologyError},
    topology::Quadrant,
    utils::winding_order,
};

/// A graph of nodes, edges and directed edges.
///
/// The graph owns every element; elements refer to each other by
/// index. Edges added with [`Self::add_edges`] get a pair of directed
/// edges each, at ids `2k` (forward) and `2k + 1` (reverse) in order
/// of addition. Rings built from the directed edges are stored in the
/// graph too.
#[derive(Debug, Clone)]
pub struct PlanarGraph<T: GeoFloat> {
    config: GraphConfig,
    edges: Vec<Edge<T>>,
    nodes: NodeMap<T>,
    directed_edges: Vec<DirectedEdge<T>>,
    rings: Vec<EdgeRing<T>>,
}

impl<T: GeoFloat> Default for PlanarGraph<T> {
    fn default() -> Self {
        Self::new(GraphConfig::default())
    }
}

/// Whether the segment `ep0 -> ep1` starts at `p0` and points in the
/// direction of `p0 -> p1`.
fn match_in_same_direction<T: GeoFloat>(
    p0: Coordinate<T>,
    p1: Coordinate<T>,
    ep0: Coordinate<T>,
    ep1: Coordinate<T>,
) -> bool {
    p0 == ep0
        && T::Ker::orient2d(p0, p1, ep1) == Orientation::Collinear
        && Quadrant::from_coords(p0, p1) == Quadrant::from_coords(ep0, ep1)
}

impl<T: GeoFloat> PlanarGraph<T> {
    pub fn new(config: GraphConfig) -> Self {
        PlanarGraph {
            config,
            edges: vec![],
            nodes: NodeMap::new(),
            directed_edges: vec![],
            rings: vec![],
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    pub fn edges(&self) -> &[Edge<T>] {
        &self.edges
    }

    pub fn edges_mut(&mut self) -> &mut [Edge<T>] {
        &mut self.edges
    }

    pub fn edge(&self, idx: usize) -> &Edge<T> {
        &self.edges[idx]
    }

    pub fn nodes(&self) -> &NodeMap<T> {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut NodeMap<T> {
        &mut self.nodes
    }

    pub fn node(&self, id: NodeId) -> &Node<T> {
        self.nodes.get(id)
    }

    pub fn directed_edges(&self) -> &[DirectedEdge<T>] {
        &self.directed_edges
    }

    pub fn directed_edge(&self, id: DirEdgeId) -> &DirectedEdge<T> {
        &self.directed_edges[id]
    }

    pub fn directed_edge_mut(&mut self, id: DirEdgeId) -> &mut DirectedEdge<T> {
        &mut self.directed_edges[id]
    }

    pub fn rings(&self) -> &[EdgeRing<T>] {
        &self.rings
    }

    pub fn ring(&self, id: RingId) -> &EdgeRing<T> {
        &self.rings[id]
    }

    /// Add an edge without directed edges, returning its index.
    pub fn insert_edge(&mut self, edge: Edge<T>) -> usize {
        self.edges.push(edge);
        self.edges.len() - 1
    }

    /// Add edges along with a pair of directed edges for each, and
    /// insert the directed edges in the stars of their nodes.
    pub fn add_edges<I: IntoIterator<Item = Edge<T>>>(&mut self, edges: I) {
        for edge in edges {
            let edge_index = self.insert_edge(edge);
            let first_id = self.directed_edges.len();
            let pair = DirectedEdge::pair(edge_index, &self.edges[edge_index], first_id);
            self.directed_edges.extend(pair.iter().cloned());
            self.nodes.add_edge_end(first_id, &mut self.directed_edges);
            self.nodes.add_edge_end(first_id + 1, &mut self.directed_edges);
        }
        debug!(
            "graph has {} edges, {} nodes",
            self.edges.len(),
            self.nodes.len()
        );
    }

    pub fn add_node(&mut self, coord: Coordinate<T>) -> NodeId {
        self.nodes.add_node(coord)
    }

    /// Add a node, merging its label into an existing node at the same
    /// coordinate.
    pub fn add_node_labelled(&mut self, node: Node<T>) -> NodeId {
        self.nodes.add_node_labelled(node)
    }

    pub fn find_node(&self, coord: Coordinate<T>) -> Option<NodeId> {
        self.nodes.find(coord)
    }

    /// Whether there is a node at `coord` on the boundary of geometry
    /// `geom_index`.
    pub fn is_boundary_node(&self, geom_index: usize, coord: Coordinate<T>) -> bool {
        self.find_node(coord)
            .map(|id| self.nodes.get(id).label().on_location(geom_index) == Some(CoordPos::OnBoundary))
            .unwrap_or(false)
    }

    /// Link the result directed edges at every node.
    pub fn link_result_directed_edges(&mut self) -> Result<(), T> {
        let des = &mut self.directed_edges;
        for node in self.nodes.iter() {
            node.star().link_result_directed_edges(des)?;
        }
        Ok(())
    }

    /// Link all directed edges at every node.
    pub fn link_all_directed_edges(&mut self) {
        let des = &mut self.directed_edges;
        for node in self.nodes.iter() {
            node.star().link_all_directed_edges(des);
        }
    }

    /// Label the graph against the input geometries.
    ///
    /// Completes the directed edge labels at each node, merges the
    /// labels of each directed edge pair, and finally merges the
    /// labels computed at each node into the node labels.
    pub fn compute_labelling(&mut self, geoms: &[&Geometry<T>]) -> Result<(), T> {
        let node_ids: Vec<NodeId> = self.nodes.ids().collect();
        for id in node_ids.iter().copied() {
            let node = self.nodes.get_mut(id);
            node.star_mut()
                .compute_labelling(&mut self.directed_edges, &self.edges, geoms)?;
        }
        for id in node_ids.iter().copied() {
            self.nodes
                .get(id)
                .star()
                .merge_sym_labels(&mut self.directed_edges);
        }
        for id in node_ids.iter().copied() {
            let node = self.nodes.get_mut(id);
            if let Some(label) = node.star().label().cloned() {
                node.component_mut().label_mut().merge(&label);
            }
        }
        Ok(())
    }

    /// The first directed edge of edge `edge_index`.
    pub fn find_edge_end(&self, edge_index: usize) -> Option<DirEdgeId> {
        self.directed_edges
            .iter()
            .position(|de| de.edge() == edge_index)
    }

    /// The edge whose first segment is `p0 -> p1`.
    pub fn find_edge(&self, p0: Coordinate<T>, p1: Coordinate<T>) -> Option<usize> {
        self.edges
            .iter()
            .position(|e| e.coord(0) == p0 && e.coord(1) == p1)
    }

    /// The edge that starts or ends with a segment leaving `p0` in
    /// the direction of `p1`.
    pub fn find_edge_in_same_direction(&self, p0: Coordinate<T>, p1: Coordinate<T>) -> Option<usize> {
        self.edges.iter().position(|e| {
            let n = e.num_points();
            match_in_same_direction(p0, p1, e.coord(0), e.coord(1))
                || match_in_same_direction(p0, p1, e.coord(n - 1), e.coord(n - 2))
        })
    }

    /// Mark directed edge `id` and its sym as visited.
    pub fn set_visited_edge(&mut self, id: DirEdgeId, visited: bool) {
        let sym = self.directed_edges[id].sym();
        self.directed_edges[id].set_visited(visited);
        self.directed_edges[sym].set_visited(visited);
    }

    fn ring_of(&self, id: DirEdgeId, kind: RingKind) -> Option<RingId> {
        let de = &self.directed_edges[id];
        match kind {
            RingKind::Maximal => de.edge_ring(),
            RingKind::Minimal => de.min_edge_ring(),
        }
    }

    fn set_ring_of(&mut self, id: DirEdgeId, kind: RingKind, ring: Option<RingId>) {
        let de = &mut self.directed_edges[id];
        match kind {
            RingKind::Maximal => de.set_edge_ring(ring),
            RingKind::Minimal => de.set_min_edge_ring(ring),
        }
    }

    fn next_of(&self, id: DirEdgeId, kind: RingKind) -> Option<DirEdgeId> {
        let de = &self.directed_edges[id];
        match kind {
            RingKind::Maximal => de.next(),
            RingKind::Minimal => de.next_min(),
        }
    }

    /// Build the ring starting at `start`, following `next` links for
    /// a maximal ring or `next_min` links for a minimal one.
    ///
    /// Fails if a link is missing, a directed edge is not an area
    /// edge, or the walk reaches an edge of the ring a second time
    /// without returning to `start`. On failure no ring is added and
    /// no edge is left assigned to it.
    pub fn build_ring(&mut self, start: DirEdgeId, kind: RingKind) -> Result<RingId, T> {
        let ring_id = self.rings.len();
        let mut ring = EdgeRing::new(kind, start);

        let mut de = start;
        let mut first_edge = true;
        let result = loop {
            let pt = self.directed_edges[de].coordinate();
            if self.ring_of(de, kind) == Some(ring_id) {
                break Err(TopologyError::RingEdgeVisitedTwice(pt));
            }
            if !self.directed_edges[de].label().is_area() {
                break Err(TopologyError::NonAreaEdge(pt));
            }
            ring.edges.push(de);
            ring.merge_label(self.directed_edges[de].label());
            let forward = self.directed_edges[de].is_forward();
            ring.add_points(self.edges[self.directed_edges[de].edge()].coords(), forward, first_edge);
            first_edge = false;
            self.set_ring_of(de, kind, Some(ring_id));

            match self.next_of(de, kind) {
                Some(next) if next == start => break Ok(()),
                Some(next) => de = next,
                None => break Err(TopologyError::RingEdgeWithoutNext(pt)),
            }
        };

        if let Err(e) = result {
            for id in ring.edges.iter().copied() {
                self.set_ring_of(id, kind, None);
            }
            return Err(e);
        }

        ring.is_hole = winding_order(&ring.pts)
            .map(|w| w != self.config.shell_orientation)
            .unwrap_or(false);
        trace!(
            "built {:?} ring of {} edges (hole: {})",
            kind,
            ring.edges.len(),
            ring.is_hole
        );
        self.rings.push(ring);
        Ok(ring_id)
    }

    /// Link the `next_min` pointers of the edges of maximal ring
    /// `ring` at every node it passes through.
    pub fn link_minimal_directed_edges(&mut self, ring: RingId) -> Result<(), T> {
        let des = &mut self.directed_edges;
        for de in self.rings[ring].edges.iter().copied() {
            if let Some(node) = des[de].node() {
                self.nodes.get(node).star().link_minimal_directed_edges(des, ring)?;
            }
        }
        Ok(())
    }

    /// Split maximal ring `ring` into minimal rings.
    ///
    /// Links the minimal pointers at the ring's nodes first.
    pub fn build_minimal_rings(&mut self, ring: RingId) -> Result<Vec<RingId>, T> {
        self.link_minimal_directed_edges(ring)?;
        let mut minimal = vec![];
        let edges = self.rings[ring].edges.clone();
        for de in edges {
            if self.directed_edges[de].min_edge_ring().is_none() {
                minimal.push(self.build_ring(de, RingKind::Minimal)?);
            }
        }
        Ok(minimal)
    }

    /// Make `hole` a hole of `shell`.
    pub fn set_shell(&mut self, hole: RingId, shell: RingId) {
        self.rings[hole].shell = Some(shell);
        self.rings[shell].holes.push(hole);
    }

    /// Twice the largest number of edges of the ring leaving any of
    /// its nodes.
    pub fn ring_max_node_degree(&self, ring: RingId) -> usize {
        let r = &self.rings[ring];
        let minimal = r.kind == RingKind::Minimal;
        r.edges
            .iter()
            .filter_map(|de| self.directed_edges[*de].node())
            .map(|node| {
                self.nodes
                    .get(node)
                    .star()
                    .outgoing_degree_in_ring(&self.directed_edges, ring, minimal)
            })
            .max()
            .unwrap_or(0)
            * 2
    }

    /// Mark the edges of the ring as in the result.
    pub fn set_ring_in_result(&mut self, ring: RingId) {
        for de in self.rings[ring].edges.iter() {
            let edge = self.directed_edges[*de].edge();
            self.edges[edge].component_mut().set_in_result(true);
        }
    }

    /// Whether none of the ring's edges are in the result.
    pub fn is_ring_isolated(&self, ring: RingId) -> bool {
        !self.rings[ring].edges.iter().any(|de| {
            let edge = self.directed_edges[*de].edge();
            self.edges[edge].component().is_in_result()
        })
    }

    /// Whether `p` is inside or on the ring, and neither inside nor
    /// on one of its holes.
    pub fn ring_contains_point(&self, ring: RingId, p: Coordinate<T>) -> bool {
        let r = &self.rings[ring];
        let poly = Polygon::new(r.line_string(), vec![]);
        if poly.coordinate_position(&p) == CoordPos::Outside {
            return false;
        }
        !r.holes
            .iter()
            .any(|h| self.ring_contains_point(*h, p))
    }

    /// The polygon with the ring as exterior and its holes as
    /// interiors.
    pub fn ring_to_polygon(&self, ring: RingId) -> Polygon<T> {
        let r = &self.rings[ring];
        let holes: Vec<LineString<T>> = r
            .holes
            .iter()
            .map(|h| self.rings[*h].line_string())
            .collect();
        Polygon::new(r.line_string(), holes)
    }
}
