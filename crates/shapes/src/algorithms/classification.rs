use tracing::trace;
use crate::{
    algorithms::geometry::{edge_lengths, mean_and_std, perimeter, polygon_area, vertex_angles},
    traits::ShapeClassifier,
    types::{BoundingBox, DetectedShape, Point, ShapeType},
};

/// Geometric measurements of one simplified polygon
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDescriptors {
    pub vertex_count: usize,
    /// Shoelace area of the unsimplified contour
    pub area: f64,
    /// Closed perimeter of the simplified polygon
    pub perimeter: f64,
    /// `4π·area / perimeter²`, 0 when the perimeter is 0
    pub circularity: f64,
    /// Interior angle at each polygon vertex, in degrees
    pub angles: Vec<f64>,
    pub edge_mean: f64,
    pub edge_std: f64,
}

impl ShapeDescriptors {
    pub fn measure(polygon: &[Point], contour: &[Point]) -> Self {
        let area = polygon_area(contour);
        let perimeter = perimeter(polygon);
        let circularity = if perimeter > 0.0 {
            4.0 * std::f64::consts::PI * area / (perimeter * perimeter)
        } else {
            0.0
        };
        let (edge_mean, edge_std) = mean_and_std(&edge_lengths(polygon));

        Self {
            vertex_count: polygon.len(),
            area,
            perimeter,
            circularity,
            angles: vertex_angles(polygon),
            edge_mean,
            edge_std,
        }
    }

    /// Every vertex angle strictly between 20° and 160°
    pub fn is_triangle_like(&self) -> bool {
        !self.angles.is_empty() && self.angles.iter().all(|&a| a > 20.0 && a < 160.0)
    }

    /// At least two angles within 30° of a right angle
    pub fn is_rectangle_like(&self) -> bool {
        self.angles.iter().filter(|&&a| (a - 90.0).abs() < 30.0).count() >= 2
    }

    /// Edge lengths vary by less than 30% of their mean
    pub fn is_regular(&self) -> bool {
        self.edge_mean > 0.0 && self.edge_std / self.edge_mean < 0.3
    }

    /// At least half of the neighbouring vertex pairs differ in angle by more than 30°
    pub fn is_star_like(&self) -> bool {
        let n = self.angles.len();
        let alternations = (0..n)
            .filter(|&i| (self.angles[i] - self.angles[(i + 1) % n]).abs() > 30.0)
            .count();
        alternations as f64 >= n as f64 / 2.0
    }

    /// Label and raw confidence. Rules are tried in order and overlap on
    /// vertex counts; the first match wins.
    pub fn label(&self) -> Option<(ShapeType, f64)> {
        let n = self.vertex_count;

        if self.circularity > 0.85 && n >= 8 {
            return Some((ShapeType::Circle, (0.7 + self.circularity * 0.25).min(0.95)));
        }
        if n == 3 || ((3..=5).contains(&n) && self.is_triangle_like()) {
            return Some((ShapeType::Triangle, 0.85 + if n == 3 { 0.1 } else { -0.1 }));
        }
        if n == 4 || ((4..=6).contains(&n) && self.is_rectangle_like()) {
            return Some((ShapeType::Rectangle, 0.9 + if n == 4 { 0.08 } else { -0.1 }));
        }
        if n == 5 || ((5..=7).contains(&n) && self.is_regular()) {
            return Some((ShapeType::Pentagon, 0.85 + if n == 5 { 0.1 } else { -0.1 }));
        }
        if (8..=12).contains(&n) && self.is_star_like() {
            return Some((ShapeType::Star, 0.8));
        }
        // 6-8 vertices that passed none of the structural tests
        if (6..=8).contains(&n) {
            return Some((ShapeType::Pentagon, 0.75));
        }
        None
    }
}

/// Decision-tree classifier over [`ShapeDescriptors`]
#[derive(Debug, Clone, Default)]
pub struct GeometricClassifier;

impl ShapeClassifier for GeometricClassifier {
    fn classify(&self, polygon: &[Point], contour: &[Point]) -> Option<DetectedShape> {
        let bounding_box = BoundingBox::from_points(contour)?;
        let descriptors = ShapeDescriptors::measure(polygon, contour);

        let Some((shape_type, confidence)) = descriptors.label() else {
            trace!(
                vertices = descriptors.vertex_count,
                circularity = descriptors.circularity,
                "contour matched no shape rule"
            );
            return None;
        };

        Some(DetectedShape {
            shape_type,
            confidence: confidence.clamp(0.0, 1.0),
            center: bounding_box.center(),
            bounding_box,
            area: descriptors.area,
        })
    }
}
