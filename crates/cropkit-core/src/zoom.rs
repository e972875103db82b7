//! The zoom/pan engine.
//!
//! Owns the scale and pan offset of the image underneath the crop
//! rectangle. The forward transform applied by the renderer is
//! `screen = pivot + scale * (image_point - pivot) + offset` with the
//! pivot at the canvas center; this module implements the state updates
//! (pinch, double-tap, single-finger pan) and the single clamp they all
//! share.
//!
//! # Cover invariant
//!
//! At scale `s` the image extends `canvas * s / 2` from the canvas center,
//! so the offset may reach at most `(canvas / 2) * (s - 1)` per axis
//! before empty canvas would show. Every update path funnels through
//! [`ZoomPan::clamp_offset`], so the invariant holds at all times.

use serde::{Deserialize, Serialize};

use crate::geometry::{CanvasSize, Point};

/// Minimum zoom scale (rest).
pub const MIN_ZOOM: f32 = 1.0;

/// Maximum zoom scale.
pub const MAX_ZOOM: f32 = 5.0;

/// Scale a double-tap jumps to from rest.
pub const DOUBLE_TAP_ZOOM: f32 = 2.0;

/// Immutable zoom snapshot handed to the renderer.
///
/// `scale == 1.0` with a zero offset is the rest state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomState {
    /// Current scale factor, within `[MIN_ZOOM, MAX_ZOOM]`.
    pub scale: f32,
    /// Current pan offset in canvas coordinates.
    pub offset: Point,
}

impl Default for ZoomState {
    fn default() -> Self {
        Self {
            scale: MIN_ZOOM,
            offset: Point::ZERO,
        }
    }
}

/// The zoom/pan engine.
#[derive(Debug, Clone)]
pub struct ZoomPan {
    canvas: CanvasSize,
    scale: f32,
    offset: Point,
    last_pan_point: Option<Point>,
}

impl ZoomPan {
    /// Create an engine at rest over an unmeasured canvas.
    pub fn new() -> Self {
        Self {
            canvas: CanvasSize::default(),
            scale: MIN_ZOOM,
            offset: Point::ZERO,
            last_pan_point: None,
        }
    }

    /// Current state snapshot.
    pub fn state(&self) -> ZoomState {
        ZoomState {
            scale: self.scale,
            offset: self.offset,
        }
    }

    /// Current scale factor.
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// True when zoomed in past rest.
    pub fn is_zoomed(&self) -> bool {
        self.scale > MIN_ZOOM
    }

    /// Store the new canvas size and reset to rest. The offset clamp
    /// depends on the canvas, so a stale offset cannot survive a layout
    /// change.
    pub fn on_canvas_size_changed(&mut self, size: CanvasSize) {
        self.canvas = size;
        self.reset();
    }

    /// Back to rest: scale 1, zero offset, no pan in progress.
    pub fn reset(&mut self) {
        self.scale = MIN_ZOOM;
        self.offset = Point::ZERO;
        self.last_pan_point = None;
    }

    /// Apply one frame of a pinch gesture.
    ///
    /// `scale_multiplier` is the per-frame spread ratio, `pan_delta` the
    /// centroid movement since the previous frame. The offset update keeps
    /// the pinch centroid visually stationary while scaling:
    ///
    /// `new_offset = (centroid - pivot) * (1 - f) + old_offset * f + pan`
    ///
    /// where `f = new_scale / old_scale` and the pivot is the canvas
    /// center. A pivot-only scale would make the image jump under the
    /// fingers whenever the centroid is off-center.
    pub fn on_pinch_update(&mut self, centroid: Point, scale_multiplier: f32, pan_delta: Point) {
        let new_scale = (self.scale * scale_multiplier).clamp(MIN_ZOOM, MAX_ZOOM);
        let factor = new_scale / self.scale;
        let pivot = self.canvas.center();

        let offset = Point::new(
            (centroid.x - pivot.x) * (1.0 - factor) + self.offset.x * factor + pan_delta.x,
            (centroid.y - pivot.y) * (1.0 - factor) + self.offset.y * factor + pan_delta.y,
        );

        self.scale = new_scale;
        self.offset = self.clamp_offset(offset, new_scale);
    }

    /// Toggle zoom on a double-tap: back to rest when zoomed in, else jump
    /// to [`DOUBLE_TAP_ZOOM`] anchored on the tap point.
    pub fn on_double_tap(&mut self, tap_point: Point) {
        if self.is_zoomed() {
            self.scale = MIN_ZOOM;
            self.offset = Point::ZERO;
        } else {
            let pivot = self.canvas.center();
            let offset = Point::new(
                (tap_point.x - pivot.x) * (1.0 - DOUBLE_TAP_ZOOM),
                (tap_point.y - pivot.y) * (1.0 - DOUBLE_TAP_ZOOM),
            );
            self.scale = DOUBLE_TAP_ZOOM;
            self.offset = self.clamp_offset(offset, DOUBLE_TAP_ZOOM);
        }
    }

    /// Start a single-finger image pan at `point`.
    pub fn on_pan_start(&mut self, point: Point) {
        self.last_pan_point = Some(point);
    }

    /// Continue a single-finger pan: the raw pointer delta translates the
    /// offset, no scale change. Ignored without a prior
    /// [`on_pan_start`](Self::on_pan_start).
    pub fn on_pan_drag(&mut self, point: Point) {
        if let Some(last) = self.last_pan_point {
            if last != point {
                let offset = Point::new(
                    self.offset.x + (point.x - last.x),
                    self.offset.y + (point.y - last.y),
                );
                self.offset = self.clamp_offset(offset, self.scale);
            }
        }
        self.last_pan_point = Some(point);
    }

    /// End a single-finger pan.
    pub fn on_pan_end(&mut self) {
        self.last_pan_point = None;
    }

    /// Map a canvas point into the un-zoomed image coordinate space.
    ///
    /// Inverse of the renderer's transform:
    /// `image_point = pivot + (canvas_point - offset - pivot) / scale`.
    pub fn canvas_to_image(&self, canvas_point: Point) -> Point {
        let pivot = self.canvas.center();
        Point::new(
            pivot.x + (canvas_point.x - self.offset.x - pivot.x) / self.scale,
            pivot.y + (canvas_point.y - self.offset.y - pivot.y) / self.scale,
        )
    }

    /// The shared cover-invariant clamp (see module docs).
    fn clamp_offset(&self, offset: Point, scale: f32) -> Point {
        let max_x = (self.canvas.width / 2.0) * (scale - 1.0);
        let max_y = (self.canvas.height / 2.0) * (scale - 1.0);
        Point::new(offset.x.clamp(-max_x, max_x), offset.y.clamp(-max_y, max_y))
    }
}

impl Default for ZoomPan {
    fn default() -> Self {
        Self::new()
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn cover_limit(canvas: f32, scale: f32) -> f32 {
        (canvas / 2.0) * (scale - 1.0)
    }

    proptest! {
        /// Property: scale stays in range and the offset satisfies the
        /// cover invariant after any pinch sequence.
        #[test]
        fn prop_pinch_sequence_respects_invariants(
            steps in prop::collection::vec(
                (0.0f32..=800.0, 0.0f32..=600.0, 0.5f32..=2.0, -50.0f32..=50.0, -50.0f32..=50.0),
                1..20,
            ),
        ) {
            let mut zoom = ZoomPan::new();
            zoom.on_canvas_size_changed(CanvasSize::new(800.0, 600.0));

            for (cx, cy, mult, dx, dy) in steps {
                zoom.on_pinch_update(Point::new(cx, cy), mult, Point::new(dx, dy));

                let state = zoom.state();
                prop_assert!(state.scale >= MIN_ZOOM && state.scale <= MAX_ZOOM);
                prop_assert!(state.offset.x.abs() <= cover_limit(800.0, state.scale) + 1e-3);
                prop_assert!(state.offset.y.abs() <= cover_limit(600.0, state.scale) + 1e-3);
            }
        }

        /// Property: pans can never expose empty canvas either.
        #[test]
        fn prop_pan_respects_cover_invariant(
            start_scale in 1.0f32..=5.0,
            points in prop::collection::vec(
                (-1000.0f32..=2000.0, -1000.0f32..=2000.0),
                2..20,
            ),
        ) {
            let mut zoom = ZoomPan::new();
            zoom.on_canvas_size_changed(CanvasSize::new(800.0, 600.0));
            zoom.on_pinch_update(Point::new(400.0, 300.0), start_scale, Point::ZERO);

            let scale = zoom.scale();
            zoom.on_pan_start(Point::new(points[0].0, points[0].1));
            for (x, y) in &points[1..] {
                zoom.on_pan_drag(Point::new(*x, *y));
                let offset = zoom.state().offset;
                prop_assert!(offset.x.abs() <= cover_limit(800.0, scale) + 1e-3);
                prop_assert!(offset.y.abs() <= cover_limit(600.0, scale) + 1e-3);
            }
        }

        /// Property: a double-tap pair is a no-op on the zoom state.
        #[test]
        fn prop_double_tap_toggle_returns_to_rest(
            x in 0.0f32..=800.0,
            y in 0.0f32..=600.0,
        ) {
            let mut zoom = ZoomPan::new();
            zoom.on_canvas_size_changed(CanvasSize::new(800.0, 600.0));

            zoom.on_double_tap(Point::new(x, y));
            prop_assert_eq!(zoom.scale(), DOUBLE_TAP_ZOOM);
            zoom.on_double_tap(Point::new(x, y));
            prop_assert_eq!(zoom.state(), ZoomState::default());
        }
    }
}
