//! # Shape Detection Library
//!
//! Finds dark shapes on a light background in raw RGBA buffers and labels
//! each one as a circle, triangle, rectangle, pentagon or star.
//!
//! Detection runs as a composable pipeline of stages, each behind a trait:
//!
//! 1. **Binarize**: a pixel is dark when its mean RGB value is below a threshold
//! 2. **Extract components**: 8-connected flood fill, dropping specks of noise
//! 3. **Order boundaries**: turn boundary pixels into a walk around the shape
//! 4. **Simplify**: Douglas-Peucker reduction of the walk to a polygon
//! 5. **Classify**: a geometric decision tree over the polygon
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! let image = image::open("shapes.png")?.to_rgba8();
//! let result = shapes::detect(image.as_raw(), image.width(), image.height())?;
//!
//! for shape in &result.shapes {
//!     println!("{} at ({}, {})", shape.shape_type, shape.center.x, shape.center.y);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Custom Pipeline
//!
//! ```rust,no_run
//! use shapes::{Pipeline, algorithms::*};
//!
//! let pipeline = Pipeline::builder()
//!     .with_threshold(100)
//!     .with_boundary_strategy(BoundaryStrategy::GreedyNearest)
//!     .with_tolerance(1.5)
//!     .build();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod error;
pub mod types;
pub mod traits;
pub mod algorithms;
pub mod pipeline;
pub mod config;
pub mod io;

pub use error::{Result, ShapeError};
pub use types::{BoundingBox, Center, DetectedShape, DetectionResult, Point, ShapeType};
pub use traits::*;
pub use algorithms::*;
pub use pipeline::{Pipeline, builder::PipelineBuilder};
pub use config::DetectorConfig;

/// Detect shapes with the default pipeline.
///
/// `pixels` is a row-major RGBA buffer of exactly `width * height * 4` bytes.
pub fn detect(pixels: &[u8], width: u32, height: u32) -> Result<DetectionResult> {
    Pipeline::builder().build().detect(pixels, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};
    use imageproc::{
        drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut},
        point::Point as Vertex,
        rect::Rect,
    };

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn canvas(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]))
    }

    fn square(side: u32) -> RgbaImage {
        let mut img = canvas(side + 40, side + 40);
        draw_filled_rect_mut(&mut img, Rect::at(20, 20).of_size(side, side), BLACK);
        img
    }

    fn disk(radius: i32) -> RgbaImage {
        let size = (radius * 2 + 40) as u32;
        let mut img = canvas(size, size);
        draw_filled_circle_mut(&mut img, (radius + 20, radius + 20), radius, BLACK);
        img
    }

    fn polygon(vertices: &[(i32, i32)]) -> RgbaImage {
        let poly: Vec<Vertex<i32>> = vertices.iter().map(|&(x, y)| Vertex::new(x, y)).collect();
        let mut img = canvas(120, 120);
        draw_polygon_mut(&mut img, &poly, BLACK);
        img
    }

    fn run(img: &RgbaImage) -> DetectionResult {
        detect(img.as_raw(), img.width(), img.height()).unwrap()
    }

    #[test]
    fn test_blank_image_has_no_shapes() {
        let result = run(&canvas(50, 50));
        assert!(result.shapes.is_empty());
        assert_eq!((result.image_width, result.image_height), (50, 50));
    }

    #[test]
    fn test_squares_are_rectangles() {
        for side in [20, 33, 48, 60] {
            let result = run(&square(side));
            assert_eq!(result.shapes.len(), 1, "side {side}");

            let shape = &result.shapes[0];
            assert_eq!(shape.shape_type, ShapeType::Rectangle, "side {side}");
            assert_eq!(shape.bounding_box.width, side);
            assert_eq!(shape.bounding_box.height, side);

            let expected = (side * side) as f64;
            assert!((shape.area - expected).abs() / expected < 0.15, "side {side}: area {}", shape.area);
        }
    }

    #[test]
    fn test_disks_are_circles() {
        for radius in [15, 22, 30, 40] {
            let result = run(&disk(radius));
            assert_eq!(result.shapes.len(), 1, "radius {radius}");
            assert_eq!(result.shapes[0].shape_type, ShapeType::Circle, "radius {radius}");
            assert!(result.shapes[0].confidence >= 0.7);
        }
    }

    #[test]
    fn test_filled_triangle_is_triangle() {
        // the trace closes beside its start, so the polygon has four vertices
        // and is labelled by the angle test
        let img = polygon(&[(30, 20), (110, 60), (20, 100)]);

        for strategy in [BoundaryStrategy::BorderFollowing, BoundaryStrategy::GreedyNearest] {
            let result = Pipeline::builder().with_boundary_strategy(strategy).build().detect_image(&img).unwrap();
            assert_eq!(result.shapes.len(), 1, "{strategy}");

            let shape = &result.shapes[0];
            assert_eq!(shape.shape_type, ShapeType::Triangle, "{strategy}");
            assert!((shape.confidence - 0.75).abs() < 1e-9, "{strategy}");
            assert_eq!(shape.bounding_box, BoundingBox { x: 20, y: 20, width: 91, height: 81 });
        }
    }

    #[test]
    fn test_filled_pentagon_matches_rectangle_rule() {
        // six traced vertices, two of them close to right angles
        let img = polygon(&[(60, 30), (89, 51), (78, 84), (42, 84), (31, 51)]);

        let result = run(&img);
        assert_eq!(result.shapes.len(), 1);
        assert_eq!(result.shapes[0].shape_type, ShapeType::Rectangle);
        assert!((result.shapes[0].confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_two_squares() {
        let mut img = canvas(200, 100);
        draw_filled_rect_mut(&mut img, Rect::at(10, 20).of_size(40, 40), BLACK);
        draw_filled_rect_mut(&mut img, Rect::at(120, 30).of_size(50, 50), BLACK);

        let result = run(&img);
        assert_eq!(result.count_of(ShapeType::Rectangle), 2);
        assert_eq!(result.shapes.len(), 2);
    }

    #[test]
    fn test_speckle_ignored() {
        let mut img = canvas(30, 30);
        draw_filled_rect_mut(&mut img, Rect::at(10, 10).of_size(2, 2), BLACK);
        assert!(run(&img).shapes.is_empty());
    }

    #[test]
    fn test_detection_is_repeatable() {
        let img = disk(25);
        let first = run(&img);
        let second = run(&img);
        assert_eq!(first.shapes, second.shapes);
    }

    #[test]
    fn test_shape_invariants() {
        let mut img = canvas(240, 120);
        draw_filled_rect_mut(&mut img, Rect::at(10, 10).of_size(45, 30), BLACK);
        draw_filled_circle_mut(&mut img, (120, 60), 30, BLACK);
        draw_filled_rect_mut(&mut img, Rect::at(180, 70).of_size(4, 4), BLACK);

        for strategy in [BoundaryStrategy::BorderFollowing, BoundaryStrategy::GreedyNearest] {
            let pipeline = Pipeline::builder().with_boundary_strategy(strategy).build();
            let result = pipeline.detect_image(&img).unwrap();
            assert!(!result.shapes.is_empty(), "{strategy}");

            for shape in &result.shapes {
                let bbox = shape.bounding_box;
                assert!((0.0..=1.0).contains(&shape.confidence));
                let (max_x, max_y) = ((bbox.x + bbox.width as i32 - 1) as f64, (bbox.y + bbox.height as i32 - 1) as f64);
                assert!(shape.center.x >= bbox.x as f64 && shape.center.x <= max_x, "{strategy}: {shape:?}");
                assert!(shape.center.y >= bbox.y as f64 && shape.center.y <= max_y, "{strategy}: {shape:?}");
                assert!(shape.area >= 0.0);
                assert!(shape.area <= (bbox.width as f64) * (bbox.height as f64));
                assert!(bbox.x >= 0 && bbox.y >= 0);
                assert!(bbox.x as u32 + bbox.width <= img.width());
                assert!(bbox.y as u32 + bbox.height <= img.height());
            }
        }
    }

    #[test]
    fn test_malformed_buffer_rejected() {
        assert!(matches!(detect(&[0u8; 10], 2, 2), Err(ShapeError::InvalidBuffer { .. })));
    }
}
