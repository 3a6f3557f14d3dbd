use crate::{
    config::DetectorConfig,
    error::Result,
    pipeline::Pipeline,
    traits::{Binarizer, ComponentExtractor, BoundaryOrderer, PolygonSimplifier, ShapeClassifier},
    algorithms::{
        BoundaryStrategy,
        DouglasPeuckerSimplifier,
        FloodFillExtractor,
        GeometricClassifier,
        LuminanceBinarizer,
    },
};

/// Builder for creating detection pipelines with a fluent API
pub struct PipelineBuilder {
    binarizer: Option<Box<dyn Binarizer>>,
    component_extractor: Option<Box<dyn ComponentExtractor>>,
    boundary_orderer: Option<Box<dyn BoundaryOrderer>>,
    simplifier: Option<Box<dyn PolygonSimplifier>>,
    classifier: Option<Box<dyn ShapeClassifier>>,
    tolerance: f64,
}

impl PipelineBuilder {
    /// Create a new pipeline builder
    pub fn new() -> Self {
        Self {
            binarizer: None,
            component_extractor: None,
            boundary_orderer: None,
            simplifier: None,
            classifier: None,
            tolerance: DetectorConfig::default().tolerance,
        }
    }

    /// Start from a validated configuration
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::new()
            .with_threshold(config.threshold)
            .with_min_component_pixels(config.min_component_pixels)
            .with_boundary_strategy(config.boundary_strategy)
            .with_tolerance(config.tolerance))
    }

    /// Set the binarizer (replaces any existing one)
    pub fn set_binarizer<B>(mut self, binarizer: B) -> Self
    where
        B: Binarizer + 'static,
    {
        self.binarizer = Some(Box::new(binarizer));
        self
    }

    /// Set the component extractor (replaces any existing one)
    pub fn set_component_extractor<E>(mut self, extractor: E) -> Self
    where
        E: ComponentExtractor + 'static,
    {
        self.component_extractor = Some(Box::new(extractor));
        self
    }

    /// Set the boundary orderer (replaces any existing one)
    pub fn set_boundary_orderer<O>(mut self, orderer: O) -> Self
    where
        O: BoundaryOrderer + 'static,
    {
        self.boundary_orderer = Some(Box::new(orderer));
        self
    }

    /// Set the polygon simplifier (replaces any existing one)
    pub fn set_simplifier<S>(mut self, simplifier: S) -> Self
    where
        S: PolygonSimplifier + 'static,
    {
        self.simplifier = Some(Box::new(simplifier));
        self
    }

    /// Set the shape classifier (replaces any existing one)
    pub fn set_classifier<C>(mut self, classifier: C) -> Self
    where
        C: ShapeClassifier + 'static,
    {
        self.classifier = Some(Box::new(classifier));
        self
    }

    /// Use the luminance binarizer with a custom threshold
    pub fn with_threshold(self, threshold: u8) -> Self {
        self.set_binarizer(LuminanceBinarizer { threshold })
    }

    /// Use the flood-fill extractor with a custom noise floor
    pub fn with_min_component_pixels(self, min_component_pixels: usize) -> Self {
        self.set_component_extractor(FloodFillExtractor { min_component_pixels })
    }

    /// Select one of the built-in boundary ordering strategies
    pub fn with_boundary_strategy(self, strategy: BoundaryStrategy) -> Self {
        self.set_boundary_orderer(strategy)
    }

    /// Douglas-Peucker tolerance in pixels
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Build the pipeline with default components if not specified
    pub fn build(self) -> Pipeline {
        Pipeline::new(
            self.binarizer.unwrap_or_else(|| Box::new(LuminanceBinarizer::default())),
            self.component_extractor.unwrap_or_else(|| Box::new(FloodFillExtractor::default())),
            self.boundary_orderer.unwrap_or_else(|| Box::new(BoundaryStrategy::default())),
            self.simplifier.unwrap_or_else(|| Box::new(DouglasPeuckerSimplifier)),
            self.classifier.unwrap_or_else(|| Box::new(GeometricClassifier)),
            self.tolerance,
        )
    }
}

impl Default for PipelineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Pipeline {
    /// Build a pipeline from configuration
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        Ok(PipelineBuilder::from_config(config)?.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::ShapeError, types::{BinaryMask, Component, Point}};

    /// Reports every dark pixel as its own component, ignoring the noise floor
    struct EveryPixelExtractor;

    impl ComponentExtractor for EveryPixelExtractor {
        fn extract_components(&self, mask: &BinaryMask) -> Vec<Component> {
            let mut components = Vec::new();
            for y in 0..mask.height() as i32 {
                for x in 0..mask.width() as i32 {
                    if mask.is_dark(x, y) {
                        let p = Point::new(x, y);
                        components.push(Component { pixels: vec![p], boundary: vec![p] });
                    }
                }
            }
            components
        }
    }

    #[test]
    fn test_custom_stage_is_used() {
        let pipeline = Pipeline::builder().set_component_extractor(EveryPixelExtractor).build();
        let mut pixels = vec![255u8; 4 * 4 * 4];
        pixels[..4].copy_from_slice(&[0, 0, 0, 255]);

        let contours = pipeline.extract_contours(&pixels, 4, 4).unwrap();
        assert_eq!(contours, vec![vec![Point::new(0, 0)]]);

        // single-point contours never reach the classifier
        assert!(pipeline.detect(&pixels, 4, 4).unwrap().shapes.is_empty());
    }

    /// Reports a single component with no pixels
    struct EmptyExtractor;

    impl ComponentExtractor for EmptyExtractor {
        fn extract_components(&self, _mask: &BinaryMask) -> Vec<Component> {
            vec![Component::default()]
        }
    }

    #[test]
    fn test_empty_components_skipped() {
        let pipeline = Pipeline::builder().set_component_extractor(EmptyExtractor).build();
        let pixels = vec![0u8; 4 * 4 * 4];
        assert!(pipeline.extract_contours(&pixels, 4, 4).unwrap().is_empty());
    }

    #[test]
    fn test_from_config_rejects_invalid_tolerance() {
        let config = DetectorConfig { tolerance: -0.5, ..Default::default() };
        assert!(matches!(Pipeline::from_config(&config), Err(ShapeError::InvalidConfig(_))));
    }

    #[test]
    fn test_threshold_changes_what_is_dark() {
        // a 6x6 mid-gray block on white
        let mut pixels = vec![255u8; 20 * 20 * 4];
        for y in 5..11 {
            for x in 5..11 {
                let i = (y * 20 + x) * 4;
                pixels[i..i + 4].copy_from_slice(&[100, 100, 100, 255]);
            }
        }

        let default = Pipeline::builder().build();
        assert_eq!(default.extract_contours(&pixels, 20, 20).unwrap().len(), 1);

        let strict = Pipeline::builder().with_threshold(64).build();
        assert!(strict.extract_contours(&pixels, 20, 20).unwrap().is_empty());
    }

    #[test]
    fn test_info_mentions_tolerance() {
        let pipeline = Pipeline::builder().with_tolerance(1.5).build();
        assert!(pipeline.info().contains("1.50"));
    }
}
