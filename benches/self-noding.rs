use criterion::*;
use geo::{Geometry, Rect};
use geo_topograph::GeometryGraph;
use rand::thread_rng;

#[path = "utils/random.rs"]
mod random;
use random::random_walk;

const BBOX: [f64; 2] = [1024., 1024.];

fn self_noding(c: &mut Criterion) {
    let mut group = c.benchmark_group("Self-noding of random walks");
    group.plot_config(PlotConfiguration::default().summary_scale(AxisScale::Logarithmic));
    let bbox: Rect<f64> = Rect::new([0., 0.], BBOX);

    (6..12).step_by(2).for_each(|scale| {
        let steps = 1 << scale;
        let geom = Geometry::LineString(random_walk(&mut thread_rng(), bbox, steps, BBOX[0] / 16.));

        group.sample_size(20);
        group.bench_with_input(BenchmarkId::new("compute_self_nodes", steps), &geom, |b, geom| {
            b.iter(|| {
                let mut graph = GeometryGraph::new(0, geom);
                graph.compute_self_nodes(true);
                black_box(graph.planar().nodes().len())
            });
        });
        group.bench_with_input(BenchmarkId::new("node and split", steps), &geom, |b, geom| {
            b.iter(|| {
                let mut graph = GeometryGraph::new(0, geom);
                graph.compute_self_nodes(true);
                let mut parts = vec![];
                graph.compute_split_edges(&mut parts);
                black_box(parts.len())
            });
        });
    });
    group.finish();
}

criterion_group!(noding, self_noding);
criterion_main!(noding);
