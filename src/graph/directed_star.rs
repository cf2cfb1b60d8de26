use geo::{coordinate_position::CoordPos, Coordinate, GeoFloat, Geometry};
use log::trace;

use super::{DirEdgeId, DirectedEdge, EdgeEndStar, HasEdgeEnd, RingId};
use crate::{
    edge::Edge,
    error::{Result, TopologyError},
    topology::{Label, Position},
};

/// States of the scan linking incoming to outgoing edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkState {
    ScanningForIncoming,
    LinkingToOutgoing,
}

/// The directed edges leaving a node.
///
/// Wraps an [`EdgeEndStar`] over the directed edges of a graph, and
/// adds the operations that link directed edges into rings.
#[derive(Debug, Clone, Default)]
pub struct DirectedEdgeStar {
    star: EdgeEndStar,
    label: Option<Label>,
}

impl DirectedEdgeStar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: GeoFloat>(&mut self, id: DirEdgeId, des: &[DirectedEdge<T>]) -> bool {
        self.star.insert(id, des)
    }

    #[inline]
    pub fn star(&self) -> &EdgeEndStar {
        &self.star
    }

    /// Ids of the directed edges, counter-clockwise.
    #[inline]
    pub fn ids(&self) -> &[DirEdgeId] {
        self.star.ids()
    }

    /// The node label computed by [`Self::compute_labelling`].
    pub fn label(&self) -> Option<&Label> {
        self.label.as_ref()
    }

    /// Number of outgoing edges in the result.
    pub fn outgoing_degree<T: GeoFloat>(&self, des: &[DirectedEdge<T>]) -> usize {
        self.ids().iter().filter(|id| des[**id].is_in_result()).count()
    }

    /// Number of outgoing edges belonging to `ring`; minimal rings are
    /// looked up through the minimal ring links.
    pub fn outgoing_degree_in_ring<T: GeoFloat>(
        &self,
        des: &[DirectedEdge<T>],
        ring: RingId,
        minimal: bool,
    ) -> usize {
        self.ids()
            .iter()
            .filter(|id| {
                let de = &des[**id];
                let r = if minimal {
                    de.min_edge_ring()
                } else {
                    de.edge_ring()
                };
                r == Some(ring)
            })
            .count()
    }

    /// The edge with the largest x-extent away from the node.
    ///
    /// Returns the first edge if both the first and last edges are in
    /// the northern half-plane, the last if both are southern. If
    /// they straddle the x-axis, a non-horizontal one of the two is
    /// chosen.
    pub fn rightmost_edge<T: GeoFloat>(&self, des: &[DirectedEdge<T>]) -> Result<Option<DirEdgeId>, T> {
        let ids = self.ids();
        let (first, last) = match (ids.first(), ids.last()) {
            (Some(f), Some(l)) => (*f, *l),
            _ => return Ok(None),
        };
        if ids.len() == 1 {
            return Ok(Some(first));
        }
        let (de0, de_last) = (des[first].edge_end(), des[last].edge_end());
        let north0 = de0.quadrant().is_northern();
        let north1 = de_last.quadrant().is_northern();
        if north0 && north1 {
            Ok(Some(first))
        } else if !north0 && !north1 {
            Ok(Some(last))
        } else if de0.dy() != T::zero() {
            Ok(Some(first))
        } else if de_last.dy() != T::zero() {
            Ok(Some(last))
        } else {
            Err(TopologyError::TwoHorizontalEdges(de0.coordinate()))
        }
    }

    /// Complete the directed edge labels, and compute the node label:
    /// a geometry is interior at the node if any incident edge lies
    /// in its interior or boundary.
    pub fn compute_labelling<T: GeoFloat>(
        &mut self,
        des: &mut [DirectedEdge<T>],
        edges: &[Edge<T>],
        geoms: &[&Geometry<T>],
    ) -> Result<(), T> {
        self.star.compute_labelling(des, geoms)?;

        let mut label = Label::line(None);
        for id in self.ids() {
            let edge_label = edges[des[*id].edge()].label();
            for gi in 0..2 {
                match edge_label.on_location(gi) {
                    Some(CoordPos::Inside) | Some(CoordPos::OnBoundary) => {
                        label.set_on_location(gi, Some(CoordPos::Inside));
                    }
                    _ => {}
                }
            }
        }
        self.label = Some(label);
        Ok(())
    }

    /// Merge the label of each edge's sym into its own.
    pub fn merge_sym_labels<T: GeoFloat>(&self, des: &mut [DirectedEdge<T>]) {
        for id in self.ids() {
            let sym_label = des[des[*id].sym()].label().clone();
            des[*id].label_mut().merge(&sym_label);
        }
    }

    /// Fill undefined edge locations with the node's locations.
    pub fn update_labelling<T: GeoFloat>(&self, des: &mut [DirectedEdge<T>], node_label: &Label) {
        for id in self.ids() {
            let label = des[*id].label_mut();
            label.set_all_locations_if_empty(0, node_label.on_location(0));
            label.set_all_locations_if_empty(1, node_label.on_location(1));
        }
    }

    /// Outgoing edges that are in the result, or whose sym is.
    pub fn result_area_edges<T: GeoFloat>(&self, des: &[DirectedEdge<T>]) -> Vec<DirEdgeId> {
        self.ids()
            .iter()
            .copied()
            .filter(|id| des[*id].is_in_result() || des[des[*id].sym()].is_in_result())
            .collect()
    }

    /// Link each incoming result edge to the next outgoing result edge
    /// clockwise.
    ///
    /// Fails if an incoming edge is left with no outgoing edge to link
    /// to.
    pub fn link_result_directed_edges<T: GeoFloat>(&self, des: &mut [DirectedEdge<T>]) -> Result<(), T> {
        let result_edges = self.result_area_edges(des);

        let mut first_out = None;
        let mut incoming = None;
        let mut state = LinkState::ScanningForIncoming;
        for next_out in result_edges.iter().copied() {
            let next_in = des[next_out].sym();
            if !des[next_out].label().is_area() {
                continue;
            }
            if first_out.is_none() && des[next_out].is_in_result() {
                first_out = Some(next_out);
            }
            match state {
                LinkState::ScanningForIncoming => {
                    if !des[next_in].is_in_result() {
                        continue;
                    }
                    incoming = Some(next_in);
                    state = LinkState::LinkingToOutgoing;
                }
                LinkState::LinkingToOutgoing => {
                    if !des[next_out].is_in_result() {
                        continue;
                    }
                    if let Some(inc) = incoming {
                        des[inc].set_next(next_out);
                    }
                    state = LinkState::ScanningForIncoming;
                }
            }
        }

        if state == LinkState::LinkingToOutgoing {
            let pt = self.coordinate(des);
            let first_out = match first_out {
                Some(f) => f,
                None => return Err(TopologyError::NoOutgoingEdge(pt)),
            };
            if !des[first_out].is_in_result() {
                return Err(TopologyError::UnlinkedIncomingEdge(pt));
            }
            if let Some(inc) = incoming {
                trace!("linking last incoming edge at {:?}", pt);
                des[inc].set_next(first_out);
            }
        }
        Ok(())
    }

    /// As [`Self::link_result_directed_edges`], for the edges of the
    /// maximal ring `ring`, setting the minimal ring links.
    pub fn link_minimal_directed_edges<T: GeoFloat>(
        &self,
        des: &mut [DirectedEdge<T>],
        ring: RingId,
    ) -> Result<(), T> {
        let result_edges = self.result_area_edges(des);

        let mut first_out = None;
        let mut incoming = None;
        let mut state = LinkState::ScanningForIncoming;
        for next_out in result_edges.iter().rev().copied() {
            let next_in = des[next_out].sym();
            if first_out.is_none() && des[next_out].edge_ring() == Some(ring) {
                first_out = Some(next_out);
            }
            match state {
                LinkState::ScanningForIncoming => {
                    if des[next_in].edge_ring() != Some(ring) {
                        continue;
                    }
                    incoming = Some(next_in);
                    state = LinkState::LinkingToOutgoing;
                }
                LinkState::LinkingToOutgoing => {
                    if des[next_out].edge_ring() != Some(ring) {
                        continue;
                    }
                    if let Some(inc) = incoming {
                        des[inc].set_next_min(next_out);
                    }
                    state = LinkState::ScanningForIncoming;
                }
            }
        }

        if state == LinkState::LinkingToOutgoing {
            let pt = self.coordinate(des);
            let first_out = match first_out {
                Some(f) if des[f].edge_ring() == Some(ring) => f,
                _ => return Err(TopologyError::UnlinkedIncomingEdge(pt)),
            };
            if let Some(inc) = incoming {
                des[inc].set_next_min(first_out);
            }
        }
        Ok(())
    }

    /// Link every incoming edge to the next outgoing edge clockwise,
    /// regardless of result membership.
    pub fn link_all_directed_edges<T: GeoFloat>(&self, des: &mut [DirectedEdge<T>]) {
        let mut prev_out = None;
        let mut first_in = None;
        for next_out in self.ids().iter().rev().copied() {
            let next_in = des[next_out].sym();
            if first_in.is_none() {
                first_in = Some(next_in);
            }
            if let Some(prev) = prev_out {
                des[next_in].set_next(prev);
            }
            prev_out = Some(next_out);
        }
        if let (Some(first_in), Some(prev_out)) = (first_in, prev_out) {
            des[first_in].set_next(prev_out);
        }
    }

    /// Mark line edges as covered if they lie in the interior of a
    /// result area.
    ///
    /// Walks around the star tracking whether the current sector is
    /// inside the result, starting from the first area edge.
    pub fn find_covered_line_edges<T: GeoFloat>(&self, des: &[DirectedEdge<T>], edges: &mut [Edge<T>]) {
        let mut start_loc = None;
        for next_out in self.ids().iter().copied() {
            let next_in = des[next_out].sym();
            if !des[next_out].is_line_edge() {
                if des[next_out].is_in_result() {
                    start_loc = Some(CoordPos::Inside);
                    break;
                }
                if des[next_in].is_in_result() {
                    start_loc = Some(CoordPos::Outside);
                    break;
                }
            }
        }
        let mut curr_loc = match start_loc {
            Some(loc) => loc,
            None => return,
        };

        for next_out in self.ids().iter().copied() {
            let next_in = des[next_out].sym();
            if des[next_out].is_line_edge() {
                edges[des[next_out].edge()]
                    .component_mut()
                    .set_covered(curr_loc == CoordPos::Inside);
            } else {
                if des[next_out].is_in_result() {
                    curr_loc = CoordPos::Outside;
                }
                if des[next_in].is_in_result() {
                    curr_loc = CoordPos::Inside;
                }
            }
        }
    }

    /// Propagate depths around the star starting from the depths of
    /// `de`.
    ///
    /// Fails if the depth reached after a full turn does not equal the
    /// right depth of `de`.
    pub fn compute_depths<T: GeoFloat>(
        &self,
        des: &mut [DirectedEdge<T>],
        edges: &[Edge<T>],
        de: DirEdgeId,
    ) -> Result<(), T> {
        let pt = des[de].coordinate();
        let edge_index = match self.star.find_index(de) {
            Some(i) => i,
            None => return Err(TopologyError::DepthMismatch(pt)),
        };
        let start_depth = des[de].depth(Position::Left);
        let target_last_depth = des[de].depth(Position::Right);

        let ids = self.ids();
        let next_depth = propagate_depths(des, edges, &ids[edge_index + 1..], start_depth)?;
        let last_depth = propagate_depths(des, edges, &ids[..edge_index], next_depth)?;
        if last_depth != target_last_depth {
            return Err(TopologyError::DepthMismatch(pt));
        }
        Ok(())
    }

    fn coordinate<T: GeoFloat>(&self, des: &[DirectedEdge<T>]) -> Coordinate<T> {
        self.star
            .coordinate(des)
            .unwrap_or_else(|| Coordinate { x: T::nan(), y: T::nan() })
    }
}

fn propagate_depths<T: GeoFloat>(
    des: &mut [DirectedEdge<T>],
    edges: &[Edge<T>],
    ids: &[DirEdgeId],
    start_depth: i32,
) -> Result<i32, T> {
    let mut curr_depth = start_depth;
    for id in ids.iter().copied() {
        let delta = des[id].depth_delta(&edges[des[id].edge()]);
        des[id].set_edge_depths(delta, Position::Right, curr_depth)?;
        curr_depth = des[id].depth(Position::Left);
    }
    Ok(curr_depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    const I: Option<CoordPos> = Some(CoordPos::Inside);
    const B: Option<CoordPos> = Some(CoordPos::OnBoundary);
    const E: Option<CoordPos> = Some(CoordPos::Outside);

    fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn edge(p0: (f64, f64), p1: (f64, f64), label: Label) -> Edge<f64> {
        Edge::new(vec![p0.into(), p1.into()], label)
    }

    /// Directed edges of `edges`, and the star of those leaving the
    /// origin.
    fn star_at_origin(edges: &[Edge<f64>]) -> (Vec<DirectedEdge<f64>>, DirectedEdgeStar) {
        let mut des = vec![];
        for (k, e) in edges.iter().enumerate() {
            des.extend(DirectedEdge::pair(k, e, 2 * k).iter().cloned());
        }
        let mut star = DirectedEdgeStar::new();
        let origin = Coordinate { x: 0., y: 0. };
        for id in 0..des.len() {
            if des[id].coordinate() == origin {
                star.insert(id, &des);
            }
        }
        (des, star)
    }

    #[test]
    fn test_rightmost_edge() -> anyhow::Result<()> {
        init_log();
        let (des, star) = star_at_origin(&[]);
        assert_eq!(star.rightmost_edge(&des)?, None);

        let edges = vec![
            edge((0., 0.), (-1., 1.), Label::line(None)),
            edge((0., 0.), (1., 1.), Label::line(None)),
        ];
        let (des, star) = star_at_origin(&edges);
        assert_eq!(star.ids(), &[2, 0]);
        assert_eq!(star.rightmost_edge(&des)?, Some(2));

        let edges = vec![
            edge((0., 0.), (1., -1.), Label::line(None)),
            edge((0., 0.), (-1., -1.), Label::line(None)),
        ];
        let (des, star) = star_at_origin(&edges);
        assert_eq!(star.rightmost_edge(&des)?, Some(0));

        // First edge is horizontal, so the southern one is picked.
        let edges = vec![
            edge((0., 0.), (1., 0.), Label::line(None)),
            edge((0., 0.), (1., -1.), Label::line(None)),
        ];
        let (des, star) = star_at_origin(&edges);
        assert_eq!(star.rightmost_edge(&des)?, Some(2));
        Ok(())
    }

    #[test]
    fn test_link_all_directed_edges() {
        init_log();
        let edges = vec![
            edge((0., 0.), (1., 0.), Label::line(None)),
            edge((0., 0.), (0., 1.), Label::line(None)),
            edge((0., 0.), (-1., 0.), Label::line(None)),
        ];
        let (mut des, star) = star_at_origin(&edges);
        assert_eq!(star.ids(), &[0, 2, 4]);

        star.link_all_directed_edges(&mut des);
        assert_eq!(des[1].next(), Some(2));
        assert_eq!(des[3].next(), Some(4));
        assert_eq!(des[5].next(), Some(0));
        assert_eq!(des[0].next(), None);
    }

    #[test]
    fn test_find_covered_line_edges() {
        init_log();
        // Corner of the unit square, with a line inside and one
        // outside. Result edges keep the interior on their right.
        let mut edges = vec![
            edge((0., 0.), (1., 0.), Label::area_for(0, B, I, E)),
            edge((0., 1.), (0., 0.), Label::area_for(0, B, I, E)),
            edge((0., 0.), (1., 1.), Label::line_for(0, I)),
            edge((0., 0.), (-1., -1.), Label::line_for(0, E)),
        ];
        let (mut des, star) = star_at_origin(&edges);
        assert_eq!(star.ids(), &[0, 4, 3, 6]);
        des[1].set_in_result(true);
        des[3].set_in_result(true);
        assert_eq!(star.outgoing_degree(&des), 1);
        assert_eq!(star.result_area_edges(&des), vec![0, 3]);

        star.find_covered_line_edges(&des, &mut edges);
        assert!(edges[2].component().is_covered());
        assert!(edges[3].component().is_covered_set());
        assert!(!edges[3].component().is_covered());
        assert!(!edges[0].component().is_covered_set());
    }

    #[test]
    fn test_compute_depths() -> anyhow::Result<()> {
        init_log();
        // Interior of a polygon between the edges going east and
        // north: depth 1 inside, 0 outside.
        let mut edges = vec![
            edge((0., 0.), (1., 0.), Label::area_for(0, B, I, E)),
            edge((0., 0.), (0., 1.), Label::area_for(0, B, E, I)),
        ];
        edges[0].set_depth_delta(1);
        edges[1].set_depth_delta(-1);

        let (mut des, star) = star_at_origin(&edges);
        des[0].set_edge_depths(1, Position::Right, 0)?;
        star.compute_depths(&mut des, &edges, 0)?;
        assert_eq!(des[2].depth(Position::Right), 1);
        assert_eq!(des[2].depth(Position::Left), 0);

        // Inconsistent delta on the second edge.
        edges[1].set_depth_delta(1);
        let (mut des, star) = star_at_origin(&edges);
        des[0].set_edge_depths(1, Position::Right, 0)?;
        let err = star.compute_depths(&mut des, &edges, 0).unwrap_err();
        assert!(matches!(err, TopologyError::DepthMismatch(_)));
        Ok(())
    }

    #[test]
    fn test_link_result_directed_edges() -> anyhow::Result<()> {
        init_log();
        let edges = vec![
            edge((0., 0.), (1., 0.), Label::area_for(0, B, E, I)),
            edge((0., 1.), (0., 0.), Label::area_for(0, B, E, I)),
        ];
        let (mut des, star) = star_at_origin(&edges);
        des[2].set_in_result(true);
        des[0].set_in_result(true);
        star.link_result_directed_edges(&mut des)?;
        assert_eq!(des[2].next(), Some(0));
        Ok(())
    }

    #[test]
    fn test_minimal_link_without_outgoing_fails() {
        init_log();
        let edges = vec![edge((0., 1.), (0., 0.), Label::area_for(0, B, E, I))];
        let (mut des, star) = star_at_origin(&edges);
        assert_eq!(star.ids(), &[1]);
        des[0].set_in_result(true);
        des[0].set_edge_ring(Some(0));

        let err = star.link_minimal_directed_edges(&mut des, 0).unwrap_err();
        assert_eq!(err, TopologyError::UnlinkedIncomingEdge((0., 0.).into()));
        assert_eq!(des[0].next_min(), None);
    }
}
