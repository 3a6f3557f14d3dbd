use serde::{Deserialize, Serialize};
use schemars::JsonSchema;
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use geo_types::Coord;

/// Integer pixel coordinate in image space (x to the right, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn manhattan_distance(&self, other: &Point) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Squared Euclidean distance, exact in integer arithmetic
    pub fn distance_squared(&self, other: &Point) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    pub fn to_coord(self) -> Coord<f64> {
        Coord { x: self.x as f64, y: self.y as f64 }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Ordered boundary trace of one component
pub type Contour = Vec<Point>;

/// Dark/light mask derived from the input pixels, `true` = dark
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryMask {
    width: u32,
    height: u32,
    data: Vec<bool>,
}

impl BinaryMask {
    pub fn new(width: u32, height: u32, data: Vec<bool>) -> Self {
        debug_assert_eq!(data.len(), width as usize * height as usize);
        Self { width, height, data }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at `(x, y)` is dark. Out-of-bounds reads as light.
    pub fn is_dark(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    pub fn dark_count(&self) -> usize {
        self.data.iter().filter(|&&dark| dark).count()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.data
    }
}

/// Maximal 8-connected set of dark pixels, with the subset that touches light pixels
#[derive(Debug, Clone, Default)]
pub struct Component {
    /// Every pixel of the region, in flood-fill visitation order
    pub pixels: Vec<Point>,
    /// Pixels with at least one light or out-of-bounds 8-neighbour
    pub boundary: Vec<Point>,
}

impl Component {
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash,
    Serialize, Deserialize, JsonSchema,
    Display, EnumString, EnumIter, IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShapeType {
    Circle,
    Triangle,
    Rectangle,
    Pentagon,
    Star,
}

/// Inclusive pixel extents; width and height are always at least 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl BoundingBox {
    /// Bounding box of a point set, `None` when the set is empty
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Self {
            x: min_x,
            y: min_y,
            width: (max_x - min_x + 1) as u32,
            height: (max_y - min_y + 1) as u32,
        })
    }

    /// Midpoint of the covered pixel range
    pub fn center(&self) -> Center {
        Center {
            x: self.x as f64 + (self.width - 1) as f64 / 2.0,
            y: self.y as f64 + (self.height - 1) as f64 / 2.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Center {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedShape {
    #[serde(rename = "type")]
    pub shape_type: ShapeType,
    /// Always within [0, 1]
    pub confidence: f64,
    pub bounding_box: BoundingBox,
    pub center: Center,
    pub area: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionResult {
    pub shapes: Vec<DetectedShape>,
    /// Wall-clock time spent in the detection call
    pub processing_time_ms: f64,
    pub image_width: u32,
    pub image_height: u32,
}

impl DetectionResult {
    pub fn count_of(&self, shape_type: ShapeType) -> usize {
        self.shapes.iter().filter(|s| s.shape_type == shape_type).count()
    }
}
