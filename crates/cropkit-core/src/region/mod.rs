//! The crop-region engine.
//!
//! Owns the crop rectangle and the canvas size, and implements every
//! rectangle mutation: reset to the canonical default, whole-rectangle
//! drag with edge-slide, and constrained corner resizing. The rectangle is
//! the single source of truth; the touch rectangle used for move
//! classification is derived state, recomputed after every mutation.
//!
//! # Invariants
//!
//! After every public operation:
//! - the rectangle lies fully inside the canvas;
//! - both sides are at least [`MIN_SIDE`];
//! - the touch rectangle is the crop rectangle inset by [`TOUCH_PAD`].

mod hit;
mod resize;

pub use hit::{Corner, TouchTarget};

use crate::geometry::{CanvasSize, GuideLine, Point, Rect, Size};
use crate::shape::CropShape;

/// Padding between the crop rectangle and its inner move-detection zone.
pub const TOUCH_PAD: f32 = 70.0;

/// Minimum side length of the crop rectangle, and the half-side of each
/// corner hit zone.
pub const MIN_SIDE: f32 = TOUCH_PAD * 3.0;

/// Margin subtracted from the shorter canvas dimension for the default
/// centered square.
pub const SQUARE_MARGIN: f32 = 100.0;

/// State of an in-progress drag gesture on the rectangle.
#[derive(Debug, Clone, Copy)]
struct DragState {
    /// What the initial touch grabbed; `None` drags nothing but still
    /// tracks the pointer.
    target: Option<TouchTarget>,
    /// Last pointer position, for delta accumulation.
    last_point: Point,
}

/// The crop-region engine. See the module docs for the invariants.
#[derive(Debug, Clone)]
pub struct CropRegion {
    canvas: CanvasSize,
    shape: CropShape,
    rect: Rect,
    touch_rect: Rect,
    /// Fixed side length for 1:1 exports, captured at reset time.
    square_export_side: f32,
    drag: Option<DragState>,
}

impl CropRegion {
    /// Create an engine with the given shape constraint and an unmeasured
    /// canvas. The rectangle stays zero-sized until the first
    /// [`on_canvas_size_changed`](Self::on_canvas_size_changed).
    pub fn new(shape: CropShape) -> Self {
        let mut region = Self {
            canvas: CanvasSize::default(),
            shape,
            rect: Rect::default(),
            touch_rect: Rect::default(),
            square_export_side: 0.0,
            drag: None,
        };
        region.reset();
        region
    }

    /// Current canvas size snapshot.
    pub fn canvas_size(&self) -> CanvasSize {
        self.canvas
    }

    /// Current crop rectangle snapshot.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Current shape constraint.
    pub fn shape(&self) -> CropShape {
        self.shape
    }

    /// Side length for the fixed square export of 1:1 shapes.
    pub fn square_export_side(&self) -> f32 {
        self.square_export_side
    }

    /// Guide-line segments for the current rectangle.
    pub fn guidelines(&self, count: u32) -> Vec<GuideLine> {
        self.rect.guidelines(count)
    }

    /// Store the new canvas size and rebuild the rectangle from scratch.
    ///
    /// Called once per layout pass. Any in-progress drag is abandoned; the
    /// rectangle is recreated, not patched.
    pub fn on_canvas_size_changed(&mut self, size: CanvasSize) {
        self.canvas = size;
        self.drag = None;
        self.reset();
    }

    /// Replace the shape constraint and rebuild the rectangle.
    pub fn set_shape(&mut self, shape: CropShape) {
        self.shape = shape;
        self.reset();
    }

    /// Rebuild the rectangle to the canonical default for the current
    /// shape: a centered square of side `min(w, h) - SQUARE_MARGIN` for
    /// 1:1 shapes, the full canvas otherwise.
    pub fn reset(&mut self) {
        if self.canvas.is_empty() {
            self.rect = Rect::default();
            self.square_export_side = 0.0;
            self.update_touch_rect();
            return;
        }

        if self.shape.is_unit_square() {
            let side = self.canvas.width.min(self.canvas.height) - SQUARE_MARGIN;
            self.square_export_side = side + SQUARE_MARGIN;
            self.rect = Rect::new(
                Point::new(
                    (self.canvas.width - side) / 2.0,
                    (self.canvas.height - side) / 2.0,
                ),
                Size::new(side, side),
            );
        } else {
            self.square_export_side = 0.0;
            self.rect = Rect::new(Point::ZERO, Size::new(self.canvas.width, self.canvas.height));
        }

        self.update_touch_rect();
    }

    /// Classify a touch point against the current rectangle.
    ///
    /// Inside the touch rectangle means a whole-rectangle move; otherwise
    /// the corner hit zones are tested in the fixed priority order
    /// bottom-right, bottom-left, top-right, top-left.
    pub fn classify_touch(&self, point: Point) -> Option<TouchTarget> {
        hit::classify(point, &self.rect, &self.touch_rect)
    }

    /// True if the point lies within the interactive area of the
    /// rectangle: the rectangle expanded by the corner hit-zone margin on
    /// all sides. Points outside this area pan the image when zoomed.
    pub fn is_in_interactive_area(&self, point: Point) -> bool {
        self.rect.inset(-MIN_SIDE).contains(point)
    }

    /// Record the classification and starting point of a drag gesture.
    pub fn begin_drag(&mut self, point: Point) {
        self.drag = Some(DragState {
            target: self.classify_touch(point),
            last_point: point,
        });
    }

    /// Apply the next pointer position of an in-progress drag.
    ///
    /// A move with no prior [`begin_drag`](Self::begin_drag) is silently
    /// ignored. The classification recorded at gesture start decides
    /// between a whole-rectangle translation and a corner resize.
    pub fn continue_drag(&mut self, point: Point) {
        let Some(drag) = self.drag.as_mut() else {
            return;
        };
        if drag.last_point == point {
            return;
        }

        let delta = Point::new(point.x - drag.last_point.x, point.y - drag.last_point.y);
        drag.last_point = point;
        let target = drag.target;

        match target {
            Some(TouchTarget::MoveWhole) => self.move_whole(delta),
            Some(TouchTarget::ResizeCorner(corner)) => {
                self.rect =
                    resize::resize_from_corner(&self.rect, corner, delta, self.canvas, self.shape);
                self.update_touch_rect();
            }
            None => {}
        }
    }

    /// Clear transient drag state.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Translate the whole rectangle, clamping each axis independently so
    /// the rectangle slides along a canvas edge instead of freezing when
    /// the perpendicular axis saturates.
    fn move_whole(&mut self, delta: Point) {
        let max_x = self.canvas.width - self.rect.size.width;
        let max_y = self.canvas.height - self.rect.size.height;
        let candidate = self.rect.top_left.offset_by(delta.x, delta.y);

        self.rect.top_left = Point::new(
            candidate.x.clamp(0.0, max_x.max(0.0)),
            candidate.y.clamp(0.0, max_y.max(0.0)),
        );
        self.update_touch_rect();
    }

    /// Recompute the derived touch rectangle after any rectangle mutation.
    fn update_touch_rect(&mut self) {
        self.touch_rect = self.rect.inset(TOUCH_PAD);
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
