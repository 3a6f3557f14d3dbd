//! Boundary ordering: turn a component's unordered boundary pixels into a
//! contour that walks around the shape.
//!
//! Two strategies sit behind [`BoundaryOrderer`]:
//!
//! - [`BorderFollower`] follows the outer boundary pixel by pixel in
//!   8-connected order. Linear in the component size.
//! - [`GreedyNearestOrderer`] chains boundary pixels by nearest neighbour.
//!   Quadratic, and may jump across gaps, but needs nothing beyond the
//!   boundary set itself.

use image::{GrayImage, Luma};
use imageproc::contours::{find_contours, BorderType};
use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};
use crate::{
    traits::BoundaryOrderer,
    types::{BoundingBox, Contour, Point},
};

/// Selects the boundary ordering strategy at runtime
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BoundaryStrategy {
    /// Suzuki-Abe outer border following
    #[default]
    BorderFollowing,
    /// Greedy nearest-neighbour chaining of boundary pixels
    GreedyNearest,
}

impl BoundaryStrategy {
    pub fn description(&self) -> &'static str {
        match self {
            Self::BorderFollowing => "Follow the outer border in 8-connected order (linear time)",
            Self::GreedyNearest => "Chain boundary pixels by nearest neighbour (quadratic, heuristic)",
        }
    }
}

impl BoundaryOrderer for BoundaryStrategy {
    fn order(&self, boundary: &[Point], pixels: &[Point]) -> Contour {
        match self {
            Self::BorderFollowing => BorderFollower.order(boundary, pixels),
            Self::GreedyNearest => GreedyNearestOrderer.order(boundary, pixels),
        }
    }
}

/// Greedy nearest-neighbour chain over the boundary set.
///
/// From the current pixel, the next one is the closest remaining pixel by
/// Manhattan distance if that distance is at most 2, otherwise the closest by
/// Euclidean distance. Ties go to the earliest remaining pixel.
#[derive(Debug, Clone, Default)]
pub struct GreedyNearestOrderer;

impl GreedyNearestOrderer {
    const MAX_STEP: i32 = 2;
}

impl BoundaryOrderer for GreedyNearestOrderer {
    fn order(&self, boundary: &[Point], _pixels: &[Point]) -> Contour {
        let Some((&first, rest)) = boundary.split_first() else {
            return Vec::new();
        };

        let mut remaining = rest.to_vec();
        let mut contour = Vec::with_capacity(boundary.len());
        let mut current = first;
        contour.push(current);

        while !remaining.is_empty() {
            let idx = nearest_within_step(&current, &remaining)
                .unwrap_or_else(|| nearest_euclidean(&current, &remaining));
            current = remaining.remove(idx);
            contour.push(current);
        }

        contour
    }
}

fn nearest_within_step(from: &Point, candidates: &[Point]) -> Option<usize> {
    let mut best: Option<(usize, i32)> = None;
    for (i, p) in candidates.iter().enumerate() {
        let d = from.manhattan_distance(p);
        if d <= GreedyNearestOrderer::MAX_STEP && best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the closest candidate; `candidates` must be non-empty
fn nearest_euclidean(from: &Point, candidates: &[Point]) -> usize {
    let mut best = (0, i64::MAX);
    for (i, p) in candidates.iter().enumerate() {
        let d = from.distance_squared(p);
        if d < best.1 {
            best = (i, d);
        }
    }
    best.0
}

/// Border-following tracer backed by `imageproc::contours::find_contours`
/// (Suzuki and Abe).
///
/// The component is rendered into a padded mask and the first outer border
/// is returned. It starts at the topmost-leftmost pixel, heads down the left
/// side, and ends on the neighbour it returns to the start from.
#[derive(Debug, Clone, Default)]
pub struct BorderFollower;

impl BoundaryOrderer for BorderFollower {
    fn order(&self, boundary: &[Point], pixels: &[Point]) -> Contour {
        let Some(bbox) = BoundingBox::from_points(pixels) else {
            return boundary.to_vec();
        };

        // one pixel of background on every side
        let origin = Point::new(bbox.x - 1, bbox.y - 1);
        let mut region = GrayImage::new(bbox.width + 2, bbox.height + 2);
        for p in pixels {
            region.put_pixel((p.x - origin.x) as u32, (p.y - origin.y) as u32, Luma([255u8]));
        }

        find_contours::<i32>(&region)
            .into_iter()
            .find(|contour| contour.border_type == BorderType::Outer)
            .map(|contour| {
                contour
                    .points
                    .into_iter()
                    .map(|p| Point::new(p.x + origin.x, p.y + origin.y))
                    .collect()
            })
            .unwrap_or_else(|| boundary.to_vec())
    }
}
