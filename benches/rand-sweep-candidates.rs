use criterion::*;
use geo::Rect;

const BBOX: [f64; 2] = [1024., 1024.];

#[path = "utils/random.rs"]
mod random;
#[path = "utils/noding.rs"]
mod noding;

use noding::*;
use rand::thread_rng;
use random::*;

fn short_lines(c: &mut Criterion) {
    const NUM_LINES: usize = 1024;

    let bbox: Rect<f64> = Rect::new([0., 0.], BBOX);
    let line_len = BBOX[0] / 5.;

    let lines: Vec<_> = (0..NUM_LINES)
        .map(|_| uniform_line_with_length(&mut thread_rng(), bbox, line_len))
        .collect();
    assert_eq!(count_sweep(&lines), count_brute(&lines));

    c.bench_function("Sweep - short random lines", |b| {
        b.iter(|| black_box(count_sweep(&lines)))
    });
    c.bench_function("R-Tree - short random lines", |b| {
        b.iter(|| black_box(count_rtree(&lines)))
    });
    c.bench_function("Brute-Force - short random lines", |b| {
        b.iter(|| black_box(count_brute(&lines)))
    });
}

fn uniform_lines(c: &mut Criterion) {
    const NUM_LINES: usize = 1024;
    let bbox: Rect<f64> = Rect::new([0., 0.], BBOX);

    let lines: Vec<_> = (0..NUM_LINES)
        .map(|_| uniform_line(&mut thread_rng(), bbox))
        .collect();
    c.bench_function("Sweep - uniform random lines", |b| {
        b.iter(|| black_box(count_sweep(&lines)))
    });
    c.bench_function("Brute-Force - uniform random lines", |b| {
        b.iter(|| black_box(count_brute(&lines)))
    });
}

criterion_group!(random, uniform_lines, short_lines);
criterion_main!(random);
