//! Geometry primitives shared by the crop editor, drag sources and renderers.
//!
//! Coordinates are floating-point pixels. Crop pane rectangles are relative
//! to their parent bounds; pointer positions and parent bounds are in page
//! space.

#[cfg(not(feature = "std"))]
use num_traits::Float;

/// A pointer or corner position.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by `other`.
    pub fn offset(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

/// Movement between two consecutive pointer positions.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

impl Delta {
    /// Create a new delta.
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }

    /// Delta from `from` to `to`.
    pub fn between(from: Point, to: Point) -> Self {
        Self::new(to.x - from.x, to.y - from.y)
    }
}

/// Width × height in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect of the given size at the origin.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Same rect, moved by `origin`. Converts a parent-relative rect to
    /// the parent's coordinate space.
    pub fn translate(self, origin: Point) -> Self {
        Self::new(self.x + origin.x, self.y + origin.y, self.width, self.height)
    }

    /// Whether `point` lies inside this rect. Edges count as inside.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Square of side `size` centered on `center`.
    pub fn centered_square(center: Point, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(center.x - half, center.y - half, size, size)
    }

    /// The four corners in NE, SE, NW, SW order.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.y),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Round to whole pixels and clamp into a `max_w` × `max_h` frame.
    ///
    /// Negative coordinates clamp to zero. The result may be empty.
    pub fn to_pixels(&self, max_w: u32, max_h: u32) -> PixelRect {
        let x = round_px(self.x).min(max_w);
        let y = round_px(self.y).min(max_h);
        let right = round_px(self.right()).clamp(x, max_w);
        let bottom = round_px(self.bottom()).clamp(y, max_h);
        PixelRect::new(x, y, right - x, bottom - y)
    }
}

/// Axis-aligned rectangle in whole pixels, used to address still frames.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    /// Create a new pixel rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

fn round_px(v: f64) -> u32 {
    if v.is_nan() || v <= 0.0 {
        0
    } else {
        v.round() as u32
    }
}
