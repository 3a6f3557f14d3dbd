use tracing::trace;
use crate::{
    traits::ComponentExtractor,
    types::{BinaryMask, Component, Point},
};

/// Offsets of the 8-connected neighbourhood
const NEIGHBOURS_8: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0),           (1, 0),
    (-1, 1),  (0, 1),  (1, 1),
];

/// Flood-fill component extractor with 8-connectivity.
///
/// Components with `min_component_pixels` pixels or fewer are treated as
/// noise and dropped.
#[derive(Debug, Clone)]
pub struct FloodFillExtractor {
    pub min_component_pixels: usize,
}

impl Default for FloodFillExtractor {
    fn default() -> Self {
        Self { min_component_pixels: 10 }
    }
}

impl ComponentExtractor for FloodFillExtractor {
    fn extract_components(&self, mask: &BinaryMask) -> Vec<Component> {
        let width = mask.width() as usize;
        let height = mask.height() as usize;
        let mut visited = vec![false; width * height];
        let mut stack = Vec::new();
        let mut components = Vec::new();

        for y in 0..height {
            for x in 0..width {
                if visited[y * width + x] || !mask.is_dark(x as i32, y as i32) {
                    continue;
                }

                let component = flood_fill(mask, Point::new(x as i32, y as i32), &mut visited, &mut stack);
                if component.len() <= self.min_component_pixels {
                    trace!(x, y, pixels = component.len(), "dropping component below noise floor");
                    continue;
                }
                components.push(component);
            }
        }

        components
    }
}

/// Grow the component containing `seed`, marking its pixels in `visited`.
///
/// `stack` is a reusable work buffer; it is empty on return.
fn flood_fill(
    mask: &BinaryMask,
    seed: Point,
    visited: &mut [bool],
    stack: &mut Vec<Point>,
) -> Component {
    let width = mask.width() as usize;
    let mut component = Component::default();

    visited[seed.y as usize * width + seed.x as usize] = true;
    stack.push(seed);

    while let Some(p) = stack.pop() {
        let mut on_boundary = false;

        for (dx, dy) in NEIGHBOURS_8 {
            let (nx, ny) = (p.x + dx, p.y + dy);
            if !mask.is_dark(nx, ny) {
                on_boundary = true;
                continue;
            }

            let idx = ny as usize * width + nx as usize;
            if !visited[idx] {
                visited[idx] = true;
                stack.push(Point::new(nx, ny));
            }
        }

        if on_boundary {
            component.boundary.push(p);
        }
        component.pixels.push(p);
    }

    component
}
