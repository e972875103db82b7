//! Geometry value types shared by every part of the crop engine.
//!
//! All coordinates are in canvas space: the pixel coordinate system of the
//! drawing surface the crop rectangle lives in, with (0, 0) at the top-left
//! corner. Canvas space is distinct from the source image's native pixel
//! grid; the mapping between the two only happens at extraction time.

use serde::{Deserialize, Serialize};

/// A point in canvas coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// The origin (0, 0).
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The point translated by (dx, dy).
    pub fn offset_by(&self, dx: f32, dy: f32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The smaller of the two dimensions.
    pub fn min_side(&self) -> f32 {
        self.width.min(self.height)
    }
}

/// The pixel size of the drawing surface the crop rectangle lives in.
///
/// Set exactly once per layout pass via [`crate::CropEditor::canvas_size_changed`]
/// and immutable between notifications. A zero-sized canvas means the view
/// has not been measured yet; extraction treats that as a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CanvasSize {
    /// Canvas width in pixels.
    pub width: f32,
    /// Canvas height in pixels.
    pub height: f32,
}

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// The canvas center, used as the pivot for all zoom transforms.
    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// True when the canvas has not been measured yet.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle described by its top-left corner and size.
///
/// The crop engine's single source of truth for the crop region is a `Rect`
/// in canvas coordinates; every mutation re-establishes the invariant that
/// the rectangle lies fully inside the canvas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner of the rectangle.
    pub top_left: Point,
    /// Width and height of the rectangle.
    pub size: Size,
}

impl Rect {
    pub fn new(top_left: Point, size: Size) -> Self {
        Self { top_left, size }
    }

    /// Construct from edge coordinates. `right >= left` and `bottom >= top`
    /// are the caller's responsibility.
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            top_left: Point::new(left, top),
            size: Size::new(right - left, bottom - top),
        }
    }

    pub fn left(&self) -> f32 {
        self.top_left.x
    }

    pub fn top(&self) -> f32 {
        self.top_left.y
    }

    pub fn right(&self) -> f32 {
        self.top_left.x + self.size.width
    }

    pub fn bottom(&self) -> f32 {
        self.top_left.y + self.size.height
    }

    pub fn top_right(&self) -> Point {
        Point::new(self.right(), self.top())
    }

    pub fn bottom_left(&self) -> Point {
        Point::new(self.left(), self.bottom())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new(self.right(), self.bottom())
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.top_left.x + self.size.width / 2.0,
            self.top_left.y + self.size.height / 2.0,
        )
    }

    /// Interval containment on both axes, edges inclusive.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left()
            && point.x <= self.right()
            && point.y >= self.top()
            && point.y <= self.bottom()
    }

    /// The rectangle shrunk by `pad` on all four sides.
    ///
    /// Used to derive the touch rectangle that classifies a whole-rectangle
    /// move. A negative `pad` expands instead, which is how the interactive
    /// area (rectangle plus corner hit zones) is built.
    pub fn inset(&self, pad: f32) -> Rect {
        Rect {
            top_left: Point::new(self.top_left.x + pad, self.top_left.y + pad),
            size: Size::new(self.size.width - 2.0 * pad, self.size.height - 2.0 * pad),
        }
    }

    /// Evenly spaced guide-line segments inside the rectangle.
    ///
    /// Returns `count` horizontal segments followed by `count` vertical
    /// segments, spaced `size / (count + 1)` apart; `count = 2` yields the
    /// rule-of-thirds grid. Recomputed from the current rectangle each call,
    /// so the renderer can pull fresh lines after any mutation.
    pub fn guidelines(&self, count: u32) -> Vec<GuideLine> {
        let mut lines = Vec::with_capacity(2 * count as usize);
        let h_step = self.size.height / (count + 1) as f32;
        let v_step = self.size.width / (count + 1) as f32;

        for i in 1..=count {
            let y = self.top() + h_step * i as f32;
            lines.push(GuideLine {
                start: Point::new(self.left(), y),
                end: Point::new(self.right(), y),
            });
        }
        for i in 1..=count {
            let x = self.left() + v_step * i as f32;
            lines.push(GuideLine {
                start: Point::new(x, self.top()),
                end: Point::new(x, self.bottom()),
            });
        }
        lines
    }
}

/// One guide-line segment, in canvas coordinates.
///
/// Pure data for the renderer; the engine recomputes these from the crop
/// rectangle whenever it changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GuideLine {
    /// Segment start point.
    pub start: Point,
    /// Segment end point.
    pub end: Point,
}
