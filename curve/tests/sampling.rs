use std::cell::Cell;

use curve::{find_y_for_x, PathGeometry, Point, PolylinePath, BISECTION_ITERATIONS_MAX};

fn line_path() -> PolylinePath {
    PolylinePath::new(vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)]).expect("path")
}

#[test]
fn line_total_length_matches_geometry() {
    let path = line_path();
    assert!((path.total_length() - (2.0f64).sqrt() * 100.0).abs() < 1e-9);
}

#[test]
fn point_at_length_clamps_to_endpoints() {
    let path = line_path();
    assert_eq!(path.point_at_length(-5.0), Point::new(0.0, 0.0));
    assert_eq!(path.point_at_length(1e9), Point::new(100.0, 100.0));
}

#[test]
fn point_at_length_interpolates_segments() {
    let path = PolylinePath::new(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
        Point::new(10.0, 10.0),
    ])
    .expect("path");
    let halfway = path.point_at_length(5.0);
    assert!((halfway.x - 5.0).abs() < 1e-9);
    assert!((halfway.y).abs() < 1e-9);
    let on_vertical = path.point_at_length(15.0);
    assert!((on_vertical.x - 10.0).abs() < 1e-9);
    assert!((on_vertical.y - 5.0).abs() < 1e-9);
}

#[test]
fn bisection_recovers_line_values() {
    let path = line_path();
    for x in [0.0, 10.0, 25.0, 50.0, 75.0, 99.0] {
        let y = find_y_for_x(x, &path, 0.0);
        assert!((y - x).abs() < 1e-6, "x={x} gave y={y}");
    }
}

#[test]
fn bisection_recovers_quadratic_values() {
    // y = x^2 / 100 flattened densely enough that the polyline is close
    // to the true parabola.
    let points: Vec<Point> = (0..=100)
        .map(|i| {
            let x = i as f64;
            Point::new(x, x * x / 100.0)
        })
        .collect();
    let path = PolylinePath::new(points).expect("path");
    for x in [10.0, 30.0, 55.0, 90.0] {
        let y = find_y_for_x(x, &path, 0.0);
        assert!((y - x * x / 100.0).abs() < 0.05, "x={x} gave y={y}");
    }
}

/// Geometry whose x never reaches the target, so the search can only
/// stop at the iteration cap.
struct UnreachablePath {
    calls: Cell<usize>,
}

impl PathGeometry for UnreachablePath {
    fn total_length(&self) -> f64 {
        100.0
    }

    fn point_at_length(&self, _offset: f64) -> Point {
        self.calls.set(self.calls.get() + 1);
        Point::new(1000.0, 5.0)
    }
}

#[test]
fn bisection_stops_at_iteration_cap() {
    let path = UnreachablePath { calls: Cell::new(0) };
    let y = find_y_for_x(0.0, &path, 0.0);
    assert_eq!(y, 5.0);
    assert!(
        path.calls.get() <= BISECTION_ITERATIONS_MAX + 2,
        "evaluated {} points",
        path.calls.get()
    );
}

#[test]
fn bisection_accepts_tolerance() {
    let path = line_path();
    let y = find_y_for_x(50.0, &path, 0.01);
    assert!((y - 50.0).abs() < 0.1);
}
