//! Planar measurements shared by the simplifier and the classifier.

use geo::{Area, EuclideanDistance, EuclideanLength};
use geo_types::{Coord, Line, LineString, Polygon};
use crate::types::Point;

/// Distance from `p` to the segment `a`-`b`, projecting onto the segment and
/// clamping to its endpoints
pub fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let point = geo_types::Point::from(p.to_coord());
    let segment = Line::new(a.to_coord(), b.to_coord());
    point.euclidean_distance(&segment)
}

fn to_line_string(points: &[Point]) -> LineString<f64> {
    points.iter().map(|p| p.to_coord()).collect::<Vec<Coord<f64>>>().into()
}

/// Shoelace area of the closed polygon through `points`
pub fn polygon_area(points: &[Point]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    Polygon::new(to_line_string(points), vec![]).unsigned_area()
}

/// Length of the closed ring through `points`, including the closing edge
pub fn perimeter(points: &[Point]) -> f64 {
    let mut ring = to_line_string(points);
    ring.close();
    ring.euclidean_length()
}

/// Cyclic edge lengths: edge `i` runs from vertex `i` to vertex `i + 1`
pub fn edge_lengths(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let (a, b) = (points[i], points[(i + 1) % n]);
            (a.distance_squared(&b) as f64).sqrt()
        })
        .collect()
}

/// Interior angle in degrees at every vertex, from the two edge vectors that
/// leave it. A vertex with a zero-length edge is reported as straight (180°).
pub fn vertex_angles(points: &[Point]) -> Vec<f64> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let prev = points[(i + n - 1) % n];
            let curr = points[i];
            let next = points[(i + 1) % n];

            let v1 = ((prev.x - curr.x) as f64, (prev.y - curr.y) as f64);
            let v2 = ((next.x - curr.x) as f64, (next.y - curr.y) as f64);
            let norm = (v1.0.hypot(v1.1)) * (v2.0.hypot(v2.1));
            if norm == 0.0 {
                return 180.0;
            }

            let cos = ((v1.0 * v2.0 + v1.1 * v2.1) / norm).clamp(-1.0, 1.0);
            cos.acos().to_degrees()
        })
        .collect()
}

/// Mean and population standard deviation; `(0, 0)` for an empty slice
pub fn mean_and_std(values: &[f64]) -> (f64, f64) {
    if values.is_empty() {
        return (0.0, 0.0);
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    (mean, variance.sqrt())
}
