//! Turns a rendered workload curve into the discrete tick values the
//! backend replays: one sample per interval, evenly spaced across the
//! curve's screen width, rescaled from pixels to requests per second.

use curve::{find_y_for_x, PathGeometry, Point};

use crate::Time;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum SampleError {
    #[error("a workload curve needs at least two control points")]
    TooFewPoints,
    #[error("sampling interval must be longer than zero seconds")]
    NonPositiveInterval,
}

/// Number of ticks for a duration/interval pair, always rounded up so
/// the tail of the experiment is covered by a final partial interval.
pub fn tick_count(duration: &Time, interval: &Time) -> usize {
    (duration.to_seconds() / interval.to_seconds()).ceil() as usize
}

/// Samples the rendered curve at `tick_count` evenly spaced x
/// positions and rescales each screen-space y into `0..max_rps`.
///
/// The first control point is the anchor of the value axis: its y is
/// the screen row of zero requests per second, and y shrinks toward
/// the top of the canvas as the value grows. A zero-height anchor
/// would rescale to a non-finite value; those samples clamp to 0 so a
/// degenerate curve never leaks NaN or infinity into the payload.
pub fn sample_ticks(
    duration: &Time,
    interval: &Time,
    max_rps: f64,
    points: &[Point],
    path: &dyn PathGeometry,
) -> Result<Vec<i64>, SampleError> {
    if points.len() < 2 {
        return Err(SampleError::TooFewPoints);
    }
    if interval.to_seconds() <= 0.0 {
        return Err(SampleError::NonPositiveInterval);
    }

    let anchor = points[0];
    let width = points[points.len() - 1].x;
    let count = tick_count(duration, interval);
    let step = width / count as f64;

    let mut ticks = Vec::with_capacity(count);
    for index in 0..count {
        let x_screen = index as f64 * step;
        let y_screen = find_y_for_x(x_screen, path, 0.0);
        let value = (max_rps * (1.0 - y_screen / anchor.y)).ceil();
        ticks.push(if value.is_finite() { value as i64 } else { 0 });
    }
    Ok(ticks)
}
