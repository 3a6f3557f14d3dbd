use crate::{algorithms::geometry::distance_to_segment, traits::PolygonSimplifier, types::Point};

/// Douglas-Peucker simplifier.
///
/// Runs over an explicit work-list of index ranges rather than recursing, so
/// long near-linear contours cannot exhaust the stack. The result matches the
/// recursive formulation: the first farthest point splits a range when its
/// distance strictly exceeds the tolerance.
#[derive(Debug, Clone, Default)]
pub struct DouglasPeuckerSimplifier;

impl PolygonSimplifier for DouglasPeuckerSimplifier {
    fn simplify(&self, points: &[Point], tolerance: f64) -> Vec<Point> {
        if points.len() <= 2 {
            return points.to_vec();
        }

        let last = points.len() - 1;
        let mut keep = vec![false; points.len()];
        keep[0] = true;
        keep[last] = true;

        let mut ranges = vec![(0, last)];
        while let Some((start, end)) = ranges.pop() {
            if end - start < 2 {
                continue;
            }

            let (a, b) = (points[start], points[end]);
            let mut max_distance = 0.0;
            let mut split = start;
            for (i, &p) in points.iter().enumerate().take(end).skip(start + 1) {
                let d = distance_to_segment(p, a, b);
                if d > max_distance {
                    max_distance = d;
                    split = i;
                }
            }

            if max_distance > tolerance {
                keep[split] = true;
                ranges.push((split, end));
                ranges.push((start, split));
            }
        }

        points
            .iter()
            .zip(&keep)
            .filter_map(|(&p, &kept)| kept.then_some(p))
            .collect()
    }
}
