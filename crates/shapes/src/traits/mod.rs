use crate::types::{BinaryMask, Component, Contour, DetectedShape, Point};

/// Trait for turning raw RGBA samples into a dark/light mask
pub trait Binarizer: Send + Sync {
    /// `pixels` holds `width * height` RGBA samples, already validated by the caller
    fn binarize(&self, pixels: &[u8], width: u32, height: u32) -> BinaryMask;
}

/// Trait for connected-component extraction algorithms
pub trait ComponentExtractor: Send + Sync {
    /// Extract the dark regions that survive noise filtering, in raster-scan order
    fn extract_components(&self, mask: &BinaryMask) -> Vec<Component>;
}

/// Trait for turning an unordered boundary pixel set into a traversal
pub trait BoundaryOrderer: Send + Sync {
    /// Order `boundary` into a contour. `pixels` is the full component, which
    /// tracing strategies use for membership tests.
    fn order(&self, boundary: &[Point], pixels: &[Point]) -> Contour;
}

/// Trait for polyline simplification algorithms
pub trait PolygonSimplifier: Send + Sync {
    /// Reduce `points` to a subset that stays within `tolerance` of the original
    fn simplify(&self, points: &[Point], tolerance: f64) -> Vec<Point>;
}

/// Trait for shape classification
pub trait ShapeClassifier: Send + Sync {
    /// Label a simplified polygon. `contour` is the unsimplified trace it came
    /// from and supplies area and bounds. `None` means the shape is discarded.
    fn classify(&self, polygon: &[Point], contour: &[Point]) -> Option<DetectedShape>;
}
