#![allow(dead_code)]

use geo::{line_intersection::line_intersection, Line};
use geo_topograph::{
    intersector::{PairOutcome, SegmentRef},
    Edge, Label, SegmentIntersector, SimpleSweepLineIntersector,
};
use rstar::{RTree, RTreeObject};

struct GeomWithData<R: RTreeObject, T>(R, T);

impl<R: RTreeObject, T> RTreeObject for GeomWithData<R, T> {
    type Envelope = R::Envelope;

    fn envelope(&self) -> Self::Envelope {
        self.0.envelope()
    }
}

/// Counts the candidate pairs that actually intersect.
#[derive(Default)]
struct Counter(usize);

impl SegmentIntersector<f64> for Counter {
    fn process_pair(&mut self, a: SegmentRef<'_, f64>, b: SegmentRef<'_, f64>) -> PairOutcome<f64> {
        if line_intersection(a.line(), b.line()).is_some() {
            self.0 += 1;
        }
        PairOutcome::none()
    }
}

pub fn line_edges(lines: &[Line<f64>]) -> Vec<Edge<f64>> {
    lines
        .iter()
        .map(|l| Edge::new(vec![l.start, l.end], Label::line(None)))
        .collect()
}

pub fn count_sweep(lines: &[Line<f64>]) -> usize {
    let mut edges = line_edges(lines);
    let mut sweep = SimpleSweepLineIntersector::new();
    sweep.add_edges(0, &edges, None, true);

    let mut counter = Counter::default();
    sweep.compute_intersections(&mut [&mut edges[..]], &mut counter);
    counter.0
}

pub fn count_brute(lines: &[Line<f64>]) -> usize {
    let mut count = 0;
    let n = lines.len();
    for i in 0..n {
        let l1 = &lines[i];
        for j in i + 1..n {
            let l2 = &lines[j];
            if line_intersection(*l1, *l2).is_some() {
                count += 1;
            }
        }
    }
    count
}

pub fn count_rtree(lines: &[Line<f64>]) -> usize {
    let lines: Vec<_> = lines
        .iter()
        .enumerate()
        .map(|(i, l)| GeomWithData(*l, i))
        .collect();

    let tree = RTree::bulk_load(lines);
    tree.intersection_candidates_with_other_tree(&tree)
        .filter_map(|(l1, l2)| {
            if l1.1 >= l2.1 {
                None
            } else {
                line_intersection(l1.0, l2.0)
            }
        })
        .count()
}
