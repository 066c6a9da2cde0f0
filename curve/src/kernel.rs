//! Interpolation kernels that flatten control points into a
//! [`PolylinePath`] the sampler can walk.

use serde::{Deserialize, Serialize};

use crate::{CurveError, Point, PolylinePath};

/// Subdivisions per spline segment when flattening to a polyline.
const SEGMENT_SAMPLES: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interpolation {
    Basis,
    Linear,
    Step,
    #[serde(rename = "CatMullRom")]
    CatmullRom,
}

/// Renders control points through the chosen kernel. All kernels pass
/// through the first and last control point, so the curve's screen
/// width and anchor height are preserved.
pub fn render_path(points: &[Point], interpolation: Interpolation) -> Result<PolylinePath, CurveError> {
    if points.len() < 2 {
        return Err(CurveError::TooFewPoints);
    }
    let sampled = match interpolation {
        Interpolation::Linear => points.to_vec(),
        Interpolation::Step => step_points(points),
        Interpolation::Basis => sample_spline(&pad_control(points, 2), basis_point),
        Interpolation::CatmullRom => sample_spline(&pad_control(points, 1), catmull_rom_point),
    };
    PolylinePath::new(sampled)
}

/// Midpoint step: hold the current y until halfway to the next point,
/// then jump.
fn step_points(points: &[Point]) -> Vec<Point> {
    let mut out = Vec::with_capacity(points.len() * 3);
    out.push(points[0]);
    for pair in points.windows(2) {
        let mid_x = (pair[0].x + pair[1].x) / 2.0;
        out.push(Point::new(mid_x, pair[0].y));
        out.push(Point::new(mid_x, pair[1].y));
        out.push(pair[1]);
    }
    out
}

/// Repeats the endpoints so the spline interpolates them. One copy per
/// side for Catmull-Rom, two for the cubic basis spline.
fn pad_control(points: &[Point], copies: usize) -> Vec<Point> {
    let mut control = Vec::with_capacity(points.len() + 2 * copies);
    for _ in 0..copies {
        control.push(points[0]);
    }
    control.extend_from_slice(points);
    for _ in 0..copies {
        control.push(points[points.len() - 1]);
    }
    control
}

fn sample_spline(control: &[Point], eval: fn(&[Point; 4], f64) -> Point) -> Vec<Point> {
    let segments = control.len() - 3;
    let mut out = Vec::with_capacity(segments * SEGMENT_SAMPLES + 1);
    for segment in 0..segments {
        let window = [
            control[segment],
            control[segment + 1],
            control[segment + 2],
            control[segment + 3],
        ];
        let steps = if segment == segments - 1 {
            SEGMENT_SAMPLES + 1
        } else {
            SEGMENT_SAMPLES
        };
        for step in 0..steps {
            let t = step as f64 / SEGMENT_SAMPLES as f64;
            out.push(eval(&window, t));
        }
    }
    out
}

/// Uniform cubic B-spline segment.
fn basis_point(window: &[Point; 4], t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let w0 = (1.0 - t) * (1.0 - t) * (1.0 - t);
    let w1 = 3.0 * t3 - 6.0 * t2 + 4.0;
    let w2 = -3.0 * t3 + 3.0 * t2 + 3.0 * t + 1.0;
    let w3 = t3;
    Point::new(
        (w0 * window[0].x + w1 * window[1].x + w2 * window[2].x + w3 * window[3].x) / 6.0,
        (w0 * window[0].y + w1 * window[1].y + w2 * window[2].y + w3 * window[3].y) / 6.0,
    )
}

/// Uniform Catmull-Rom segment between the two middle control points.
fn catmull_rom_point(window: &[Point; 4], t: f64) -> Point {
    let t2 = t * t;
    let t3 = t2 * t;
    let component = |p0: f64, p1: f64, p2: f64, p3: f64| {
        0.5 * (2.0 * p1
            + (p2 - p0) * t
            + (2.0 * p0 - 5.0 * p1 + 4.0 * p2 - p3) * t2
            + (3.0 * p1 - p0 - 3.0 * p2 + p3) * t3)
    };
    Point::new(
        component(window[0].x, window[1].x, window[2].x, window[3].x),
        component(window[0].y, window[1].y, window[2].y, window[3].y),
    )
}
