use serde::{Deserialize, Serialize};

pub mod kernel;
pub use kernel::{render_path, Interpolation};

/// A point in the screen-space coordinates of the curve canvas.
/// y grows downward, so smaller y means a larger workload value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CurveError {
    #[error("a path needs at least two points")]
    TooFewPoints,
}

/// Arc-length view of a rendered curve. The sampler only ever asks for
/// the total length and for the point at a given length offset, so any
/// renderer that can answer those two questions can back it.
pub trait PathGeometry {
    fn total_length(&self) -> f64;

    /// Point at the given arc-length offset. Offsets outside
    /// `[0, total_length]` clamp to the nearest endpoint.
    fn point_at_length(&self, offset: f64) -> Point;
}

/// A curve flattened to line segments with precomputed cumulative
/// segment lengths.
#[derive(Debug, Clone)]
pub struct PolylinePath {
    points: Vec<Point>,
    lengths: Vec<f64>,
}

impl PolylinePath {
    pub fn new(points: Vec<Point>) -> Result<Self, CurveError> {
        if points.len() < 2 {
            return Err(CurveError::TooFewPoints);
        }
        let mut lengths = Vec::with_capacity(points.len());
        let mut total = 0.0;
        lengths.push(0.0);
        for pair in points.windows(2) {
            let dx = pair[1].x - pair[0].x;
            let dy = pair[1].y - pair[0].y;
            total += (dx * dx + dy * dy).sqrt();
            lengths.push(total);
        }
        Ok(Self { points, lengths })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

impl PathGeometry for PolylinePath {
    fn total_length(&self) -> f64 {
        self.lengths.last().copied().unwrap_or(0.0)
    }

    fn point_at_length(&self, offset: f64) -> Point {
        if offset <= 0.0 {
            return self.points[0];
        }
        if offset >= self.total_length() {
            return self.points[self.points.len() - 1];
        }
        let index = self.lengths.partition_point(|&len| len <= offset) - 1;
        let start = self.points[index];
        let end = self.points[index + 1];
        let segment = self.lengths[index + 1] - self.lengths[index];
        if segment == 0.0 {
            return start;
        }
        let t = (offset - self.lengths[index]) / segment;
        Point::new(start.x + (end.x - start.x) * t, start.y + (end.y - start.y) * t)
    }
}

/// Hard cap on bisection steps. Guarantees bounded latency per sample
/// even when the target x is never matched exactly (error of 0, or a
/// path that is not monotonic in x).
pub const BISECTION_ITERATIONS_MAX: usize = 50;

/// Finds the y coordinate of the path at the given x by bisecting over
/// arc length. Assumes the path is monotonically increasing in x over
/// the sampled region; if it is not, the cap still bounds the search
/// and the last evaluated point wins.
pub fn find_y_for_x(x: f64, path: &dyn PathGeometry, error: f64) -> f64 {
    let mut length_start = 0.0;
    let mut length_end = path.total_length();
    let mut point = path.point_at_length((length_start + length_end) / 2.0);
    let mut iterations = 0;

    while (point.x - x).abs() > error {
        if x < point.x {
            length_end = (length_start + length_end) / 2.0;
        } else {
            length_start = (length_start + length_end) / 2.0;
        }
        iterations += 1;
        if iterations > BISECTION_ITERATIONS_MAX {
            log::debug!("bisection stopped at the iteration cap for x={x}");
            break;
        }
        point = path.point_at_length((length_start + length_end) / 2.0);
    }
    point.y
}
