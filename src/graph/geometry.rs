use std::collections::BTreeMap;

use geo::{
    coordinate_position::CoordPos, winding_order::WindingOrder, Coordinate, GeoFloat, Geometry,
    LineString, Polygon,
};
use log::{debug, trace};

use super::{NodeId, PlanarGraph};
use crate::{
    config::GraphConfig,
    edge::Edge,
    events::SweepPoint,
    intersector::EdgeIntersector,
    sweep::SimpleSweepLineIntersector,
    topology::Label,
    utils::{remove_repeated_points, winding_order},
};

/// The topology graph of one input geometry.
///
/// Every linear component of the geometry becomes an edge: polygon
/// rings get area labels, with the interior on the side given by the
/// ring's role and orientation, and linestrings get line labels.
/// Points and linestring end points become nodes. `arg_index` (`0` or
/// `1`) selects the label slot the geometry is recorded in.
#[derive(Debug, Clone)]
pub struct GeometryGraph<'a, T: GeoFloat> {
    arg_index: usize,
    parent: &'a Geometry<T>,
    graph: PlanarGraph<T>,
    use_boundary_determination_rule: bool,
    line_edge_map: BTreeMap<Vec<SweepPoint<T>>, usize>,
    boundary_points: Option<Vec<Coordinate<T>>>,
    has_too_few_points: bool,
    invalid_point: Option<Coordinate<T>>,
}

impl<'a, T: GeoFloat> GeometryGraph<'a, T> {
    /// Build the graph of `parent` with the default configuration.
    pub fn new(arg_index: usize, parent: &'a Geometry<T>) -> Self {
        Self::with_config(arg_index, parent, GraphConfig::default())
    }

    /// Build the graph of `parent`.
    ///
    /// # Panics
    ///
    /// If `arg_index` is not `0` or `1`.
    pub fn with_config(arg_index: usize, parent: &'a Geometry<T>, config: GraphConfig) -> Self {
        assert!(arg_index < 2, "geometry graph index must be 0 or 1");
        let mut gg = GeometryGraph {
            arg_index,
            parent,
            graph: PlanarGraph::new(config),
            use_boundary_determination_rule: true,
            line_edge_map: BTreeMap::new(),
            boundary_points: None,
            has_too_few_points: false,
            invalid_point: None,
        };
        gg.add_geometry(parent);
        debug!(
            "geometry graph {}: {} edges, {} nodes",
            arg_index,
            gg.graph.edges().len(),
            gg.graph.nodes().len()
        );
        gg
    }

    #[inline]
    pub fn arg_index(&self) -> usize {
        self.arg_index
    }

    /// The input geometry.
    #[inline]
    pub fn geometry(&self) -> &'a Geometry<T> {
        self.parent
    }

    #[inline]
    pub fn planar(&self) -> &PlanarGraph<T> {
        &self.graph
    }

    #[inline]
    pub fn planar_mut(&mut self) -> &mut PlanarGraph<T> {
        &mut self.graph
    }

    pub fn into_planar(self) -> PlanarGraph<T> {
        self.graph
    }

    #[inline]
    pub fn edges(&self) -> &[Edge<T>] {
        self.graph.edges()
    }

    /// Whether some ring or line had too few distinct points to form
    /// an edge.
    pub fn has_too_few_points(&self) -> bool {
        self.has_too_few_points
    }

    /// A point of the last component rejected for having too few
    /// points.
    pub fn invalid_point(&self) -> Option<Coordinate<T>> {
        self.invalid_point
    }

    /// The edge built from the input linestring or ring `line`.
    pub fn find_edge(&self, line: &LineString<T>) -> Option<&Edge<T>> {
        self.line_edge_map
            .get(&line_key(&line.0))
            .map(|idx| self.graph.edge(*idx))
    }

    /// The nodes on the boundary of the geometry.
    pub fn boundary_nodes(&self) -> Vec<NodeId> {
        self.graph.nodes().boundary_nodes(self.arg_index)
    }

    /// The coordinates of the boundary nodes.
    pub fn boundary_points(&mut self) -> &[Coordinate<T>] {
        if self.boundary_points.is_none() {
            let pts = self
                .boundary_nodes()
                .into_iter()
                .map(|id| self.graph.node(id).coordinate())
                .collect();
            self.boundary_points = Some(pts);
        }
        self.boundary_points.as_deref().unwrap_or(&[])
    }

    /// Split every edge at its recorded intersections, appending the
    /// parts to `out`.
    pub fn compute_split_edges(&mut self, out: &mut Vec<Edge<T>>) {
        for edge in self.graph.edges_mut() {
            edge.add_split_edges(out);
        }
    }

    /// Add an edge with a node at each end point. Both end points are
    /// on the boundary, whatever the boundary node rule.
    pub fn add_edge(&mut self, edge: Edge<T>) {
        let first = edge.coord(0);
        let last = edge.coord(edge.num_points() - 1);
        self.graph.insert_edge(edge);
        self.insert_point(first, Some(CoordPos::OnBoundary));
        self.insert_point(last, Some(CoordPos::OnBoundary));
    }

    /// Add an interior point.
    pub fn add_point(&mut self, coord: Coordinate<T>) {
        self.insert_point(coord, Some(CoordPos::Inside));
    }

    fn add_geometry(&mut self, geom: &Geometry<T>) {
        match geom {
            Geometry::Point(p) => self.add_point(p.0),
            Geometry::Line(l) => self.add_line_string(&LineString::from(vec![l.start, l.end])),
            Geometry::LineString(ls) => self.add_line_string(ls),
            Geometry::Polygon(p) => self.add_polygon(p),
            Geometry::MultiPoint(mp) => {
                for p in mp.0.iter() {
                    self.add_point(p.0);
                }
            }
            Geometry::MultiLineString(mls) => {
                for ls in mls.0.iter() {
                    self.add_line_string(ls);
                }
            }
            Geometry::MultiPolygon(mp) => {
                // Adjacent polygons of a multipolygon may share
                // boundary points an even number of times.
                self.use_boundary_determination_rule = false;
                for p in mp.0.iter() {
                    self.add_polygon(p);
                }
            }
            Geometry::GeometryCollection(gc) => {
                for g in gc.0.iter() {
                    self.add_geometry(g);
                }
            }
            Geometry::Rect(r) => self.add_polygon(&r.to_polygon()),
            Geometry::Triangle(t) => self.add_polygon(&t.to_polygon()),
        }
    }

    fn add_polygon(&mut self, poly: &Polygon<T>) {
        self.add_polygon_ring(poly.exterior(), CoordPos::Outside, CoordPos::Inside);
        for hole in poly.interiors() {
            self.add_polygon_ring(hole, CoordPos::Inside, CoordPos::Outside);
        }
    }

    /// Add a ring. `cw_left` and `cw_right` are the locations on
    /// either side if the ring is clockwise; they are swapped for a
    /// counter-clockwise ring.
    fn add_polygon_ring(&mut self, ring: &LineString<T>, cw_left: CoordPos, cw_right: CoordPos) {
        if ring.0.is_empty() {
            return;
        }
        let coords = remove_repeated_points(&ring.0);
        if coords.len() < 4 {
            self.has_too_few_points = true;
            self.invalid_point = Some(coords[0]);
            return;
        }

        let (left, right) = match winding_order(&coords) {
            Some(WindingOrder::CounterClockwise) => (cw_right, cw_left),
            _ => (cw_left, cw_right),
        };
        let first = coords[0];
        let label = Label::area_for(
            self.arg_index,
            Some(CoordPos::OnBoundary),
            Some(left),
            Some(right),
        );
        let idx = self.graph.insert_edge(Edge::new(coords, label));
        self.line_edge_map.insert(line_key(&ring.0), idx);
        self.insert_point(first, Some(CoordPos::OnBoundary));
    }

    fn add_line_string(&mut self, line: &LineString<T>) {
        if line.0.is_empty() {
            return;
        }
        let coords = remove_repeated_points(&line.0);
        if coords.len() < 2 {
            self.has_too_few_points = true;
            self.invalid_point = Some(coords[0]);
            return;
        }

        let first = coords[0];
        let last = coords[coords.len() - 1];
        let label = Label::line_for(self.arg_index, Some(CoordPos::Inside));
        let idx = self.graph.insert_edge(Edge::new(coords, label));
        self.line_edge_map.insert(line_key(&line.0), idx);
        self.insert_boundary_point(first);
        self.insert_boundary_point(last);
    }

    /// Set the location of the node at `coord`, creating it if
    /// needed.
    pub fn insert_point(&mut self, coord: Coordinate<T>, loc: Option<CoordPos>) {
        let id = self.graph.add_node(coord);
        self.graph.nodes_mut().get_mut(id).set_label(self.arg_index, loc);
        self.boundary_points = None;
    }

    /// Add a line end point at `coord`. Whether it is on the boundary
    /// depends on how many line ends meet there and on the boundary
    /// node rule.
    pub fn insert_boundary_point(&mut self, coord: Coordinate<T>) {
        let id = self.graph.add_node(coord);
        let node = self.graph.nodes().get(id);
        let count = if node.label().on_location(self.arg_index) == Some(CoordPos::OnBoundary) {
            2
        } else {
            1
        };
        let loc = self.graph.config().boundary_node_rule.location(count);
        self.graph
            .nodes_mut()
            .get_mut(id)
            .set_label(self.arg_index, Some(loc));
        self.boundary_points = None;
    }

    /// Node the geometry against itself.
    ///
    /// Every segment is tested against every other if
    /// `compute_ring_self_nodes` is set or the geometry is not
    /// polygonal. Otherwise the rings of a polygon are assumed to be
    /// individually simple and only tested against each other. The
    /// intersections found are recorded on the edges and become
    /// nodes. Returns the intersector with its statistics.
    pub fn compute_self_nodes(&mut self, compute_ring_self_nodes: bool) -> EdgeIntersector<T> {
        let mut si = EdgeIntersector::new(true, false);
        let is_rings = matches!(
            self.parent,
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) | Geometry::Rect(_) | Geometry::Triangle(_)
        );
        let compute_all_segments = compute_ring_self_nodes || !is_rings;

        let mut sweep = SimpleSweepLineIntersector::new();
        sweep.add_edges(0, self.graph.edges(), None, !compute_all_segments);
        sweep.compute_intersections(&mut [self.graph.edges_mut()], &mut si);
        debug!(
            "self-noding graph {}: {} tests, {} intersections",
            self.arg_index,
            si.num_tests(),
            si.num_intersections()
        );

        self.add_self_intersection_nodes();
        si
    }

    /// Node the edges of this geometry against those of `other`.
    ///
    /// Proper intersections are recorded on the edges only if
    /// `include_proper` is set. Edges that touch are marked as not
    /// isolated.
    pub fn compute_edge_intersections(
        &mut self,
        other: &mut GeometryGraph<'_, T>,
        include_proper: bool,
    ) -> EdgeIntersector<T> {
        let mut si = EdgeIntersector::new(include_proper, true);
        si.set_boundary_nodes(self.boundary_points().to_vec(), other.boundary_points().to_vec());

        let mut sweep = SimpleSweepLineIntersector::new();
        sweep.add_edges(0, self.graph.edges(), Some(0), false);
        sweep.add_edges(1, other.graph.edges(), Some(1), false);
        sweep.compute_intersections(
            &mut [self.graph.edges_mut(), other.graph.edges_mut()],
            &mut si,
        );
        debug!(
            "noding graphs: {} candidate pairs, {} intersections",
            sweep.overlaps(),
            si.num_intersections()
        );
        si
    }

    fn add_self_intersection_nodes(&mut self) {
        let arg_index = self.arg_index;
        let pts: Vec<_> = self
            .graph
            .edges()
            .iter()
            .flat_map(|e| {
                let loc = e.label().on_location(arg_index);
                e.intersections().iter().map(move |ei| (ei.coord, loc))
            })
            .collect();
        for (coord, loc) in pts {
            self.add_self_intersection_node(coord, loc);
        }
    }

    fn add_self_intersection_node(&mut self, coord: Coordinate<T>, loc: Option<CoordPos>) {
        if self.graph.is_boundary_node(self.arg_index, coord) {
            return;
        }
        trace!("self-intersection node at {:?}", coord);
        if loc == Some(CoordPos::OnBoundary) && self.use_boundary_determination_rule {
            self.insert_boundary_point(coord);
        } else {
            self.insert_point(coord, loc);
        }
    }
}

fn line_key<T: GeoFloat>(coords: &[Coordinate<T>]) -> Vec<SweepPoint<T>> {
    coords.iter().map(|c| SweepPoint::from(*c)).collect()
}
