pub mod builder;

use std::time::Instant;
use image::RgbaImage;
use tracing::{debug, trace};
use crate::{
    error::{Result, ShapeError},
    types::{Contour, DetectionResult},
    traits::{Binarizer, ComponentExtractor, BoundaryOrderer, PolygonSimplifier, ShapeClassifier},
};

/// Shape detection pipeline: binarize, extract components, order their
/// boundaries, simplify, classify
pub struct Pipeline {
    binarizer: Box<dyn Binarizer>,
    component_extractor: Box<dyn ComponentExtractor>,
    boundary_orderer: Box<dyn BoundaryOrderer>,
    simplifier: Box<dyn PolygonSimplifier>,
    classifier: Box<dyn ShapeClassifier>,
    tolerance: f64,
}

impl Pipeline {
    /// Create a new pipeline builder
    pub fn builder() -> builder::PipelineBuilder {
        builder::PipelineBuilder::new()
    }

    /// Create a new pipeline with the given components
    pub fn new(
        binarizer: Box<dyn Binarizer>,
        component_extractor: Box<dyn ComponentExtractor>,
        boundary_orderer: Box<dyn BoundaryOrderer>,
        simplifier: Box<dyn PolygonSimplifier>,
        classifier: Box<dyn ShapeClassifier>,
        tolerance: f64,
    ) -> Self {
        Self {
            binarizer,
            component_extractor,
            boundary_orderer,
            simplifier,
            classifier,
            tolerance,
        }
    }

    /// Detect shapes in a row-major RGBA buffer of `width * height` pixels
    pub fn detect(&self, pixels: &[u8], width: u32, height: u32) -> Result<DetectionResult> {
        let started = Instant::now();

        let mut shapes = Vec::new();
        for contour in self.extract_contours(pixels, width, height)? {
            let polygon = self.simplifier.simplify(&contour, self.tolerance);
            if polygon.len() < 3 {
                trace!(points = contour.len(), "dropping degenerate polygon");
                continue;
            }

            if let Some(shape) = self.classifier.classify(&polygon, &contour) {
                trace!(shape = %shape.shape_type, confidence = shape.confidence, vertices = polygon.len(), "classified contour");
                shapes.push(shape);
            }
        }

        let processing_time_ms = started.elapsed().as_secs_f64() * 1000.0;
        debug!(shapes = shapes.len(), processing_time_ms, "detection finished");

        Ok(DetectionResult {
            shapes,
            processing_time_ms,
            image_width: width,
            image_height: height,
        })
    }

    /// Detect shapes in an RGBA image
    pub fn detect_image(&self, image: &RgbaImage) -> Result<DetectionResult> {
        self.detect(image.as_raw(), image.width(), image.height())
    }

    /// Ordered contours of every component that survives noise filtering,
    /// before simplification
    pub fn extract_contours(&self, pixels: &[u8], width: u32, height: u32) -> Result<Vec<Contour>> {
        validate_buffer(pixels, width, height)?;

        let mask = self.binarizer.binarize(pixels, width, height);
        let components = self.component_extractor.extract_components(&mask);
        debug!(width, height, dark_pixels = mask.dark_count(), components = components.len(), "extracted components");

        let contours = components
            .into_iter()
            .filter(|component| !component.is_empty())
            .map(|component| {
                if component.boundary.is_empty() {
                    component.pixels
                } else {
                    self.boundary_orderer.order(&component.boundary, &component.pixels)
                }
            })
            .collect();

        Ok(contours)
    }

    /// Get information about the pipeline configuration
    pub fn info(&self) -> String {
        format!("Pipeline: tolerance {:.2} px", self.tolerance)
    }
}

fn validate_buffer(pixels: &[u8], width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(ShapeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(4))
        .ok_or(ShapeError::InvalidDimensions { width, height })?;

    if pixels.len() != expected {
        return Err(ShapeError::InvalidBuffer { expected, actual: pixels.len() });
    }
    Ok(())
}
