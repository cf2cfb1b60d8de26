use std::f64::consts::PI;

use geo::{rotate::RotatePoint, Coordinate, Line, LineString, Rect};

use rand::Rng;
use rand_distr::{Distribution, Normal, Standard};

#[inline]
pub fn uniform_point<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Coordinate<f64> {
    let coords: [f64; 2] = rng.sample(Standard);
    let dims = bounds.max() - bounds.min();
    Coordinate {
        x: bounds.min().x + dims.x * coords[0],
        y: bounds.min().y + dims.y * coords[1],
    }
}

#[inline]
pub fn uniform_line<R: Rng>(rng: &mut R, bounds: Rect<f64>) -> Line<f64> {
    Line::new(uniform_point(rng, bounds), uniform_point(rng, bounds))
}

#[inline]
#[allow(dead_code)]
pub fn uniform_line_with_length<R: Rng>(rng: &mut R, bounds: Rect<f64>, length: f64) -> Line<f64> {
    let start = uniform_point(rng, bounds);
    let line = Line::new(start, start + (length, 0.).into());
    let angle = rng.sample::<f64, _>(Standard) * 2. * PI;
    line.rotate_around_point(angle, start.into())
}

/// A random walk of `steps` normally distributed steps, clamped to
/// `bounds`. Such walks cross themselves often.
#[allow(dead_code)]
pub fn random_walk<R: Rng>(rng: &mut R, bounds: Rect<f64>, steps: usize, step_dev: f64) -> LineString<f64> {
    let normal = Normal::new(0., step_dev).expect("step deviation must be finite");
    let (min, max) = (bounds.min(), bounds.max());

    let mut curr = uniform_point(rng, bounds);
    let mut coords = Vec::with_capacity(steps + 1);
    coords.push(curr);
    for _ in 0..steps {
        curr = Coordinate {
            x: (curr.x + normal.sample(rng)).max(min.x).min(max.x),
            y: (curr.y + normal.sample(rng)).max(min.y).min(max.y),
        };
        coords.push(curr);
    }
    coords.into()
}
