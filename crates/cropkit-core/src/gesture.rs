//! The gesture dispatcher.
//!
//! Classifies a raw multi-pointer stream into one of four modes and routes
//! events to the region and zoom engines. The mode is an explicit state
//! machine driven by pointer-count transition edges; within one gesture
//! exactly one mode is active at a time, and mode switches happen only
//! when the pointer count changes, never mid-frame while it is stable.
//!
//! # Transitions
//!
//! - First touch-down inside the rectangle's interactive area starts
//!   `RectDrag`; outside it while zoomed starts `ImagePan`; outside at
//!   rest zoom the gesture is `Idle` (tap detection only).
//! - A second pointer ends any single-finger operation and enters `Zoom`
//!   with a fresh centroid/spread baseline. The baseline is recaptured on
//!   every upward crossing through two pointers, so no stale baseline
//!   survives a brief one-finger moment.
//! - Dropping from `Zoom` to one pointer discards that pointer's frames
//!   and invalidates the baseline; the gesture does not fall back into a
//!   single-finger mode.
//! - Releasing all pointers ends the gesture; a motionless, non-zoom
//!   gesture feeds double-tap detection.
//!
//! The dispatcher never reads a clock: each batch carries a host-supplied
//! timestamp in milliseconds, which keeps tap detection deterministic.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;
use crate::region::CropRegion;
use crate::zoom::ZoomPan;

/// Maximum time between two taps (and within one tap) to count as a
/// double-tap, in milliseconds.
pub const DOUBLE_TAP_WINDOW_MS: f64 = 300.0;

/// Maximum distance between two taps to count as a double-tap.
pub const DOUBLE_TAP_RADIUS: f32 = 80.0;

/// One pointer of a batch. A batch is the full set of currently tracked
/// pointers each frame; pointers lift by arriving with `pressed: false`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerInput {
    /// Host-assigned pointer id, stable for the life of the contact.
    pub id: u64,
    /// Position in canvas coordinates.
    pub position: Point,
    /// Whether the pointer is currently down.
    pub pressed: bool,
}

/// What the current gesture is doing. Live only for the duration of one
/// multi-pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GestureMode {
    /// No gesture, or a touch outside everything at rest zoom.
    #[default]
    Idle,
    /// Single finger moving or resizing the crop rectangle.
    RectDrag,
    /// Single finger panning the zoomed image.
    ImagePan,
    /// Two or more fingers pinching/panning the image.
    Zoom,
}

/// Centroid and spread captured at a two-finger contact, the reference
/// for per-frame pinch deltas.
#[derive(Debug, Clone, Copy)]
struct PinchBaseline {
    centroid: Point,
    spread: f32,
}

/// A released tap waiting for its potential second half.
#[derive(Debug, Clone, Copy)]
struct TapCandidate {
    time_ms: f64,
    position: Point,
}

/// The gesture state machine. See the module docs for the transition
/// table.
#[derive(Debug, Default)]
pub struct GestureDispatcher {
    mode: GestureMode,
    gesture_active: bool,
    down_time_ms: f64,
    down_position: Point,
    last_single_point: Point,
    has_moved: bool,
    baseline: Option<PinchBaseline>,
    last_tap: Option<TapCandidate>,
}

impl GestureDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active mode.
    pub fn mode(&self) -> GestureMode {
        self.mode
    }

    /// Feed one pointer batch into the state machine, routing to the
    /// region and zoom engines as the current mode dictates.
    ///
    /// `time_ms` is the host's timestamp for this batch; it only needs to
    /// be monotonic within and across gestures.
    pub fn process(
        &mut self,
        pointers: &[PointerInput],
        time_ms: f64,
        region: &mut CropRegion,
        zoom: &mut ZoomPan,
    ) {
        let active: Vec<Point> = pointers
            .iter()
            .filter(|p| p.pressed)
            .map(|p| p.position)
            .collect();

        if active.is_empty() {
            self.finish_gesture(time_ms, region, zoom);
            return;
        }

        if !self.gesture_active {
            self.begin_gesture(active[0], time_ms, region, zoom);
        }

        if active.len() >= 2 {
            self.process_pinch(&active, zoom, region);
        } else {
            self.process_single(active[0], region, zoom);
        }
    }

    /// First touch-down: classify the initial mode from the touch
    /// position.
    fn begin_gesture(
        &mut self,
        point: Point,
        time_ms: f64,
        region: &mut CropRegion,
        zoom: &mut ZoomPan,
    ) {
        self.gesture_active = true;
        self.down_time_ms = time_ms;
        self.down_position = point;
        self.last_single_point = point;
        self.has_moved = false;
        self.baseline = None;

        self.mode = if region.is_in_interactive_area(point) {
            region.begin_drag(point);
            GestureMode::RectDrag
        } else if zoom.is_zoomed() {
            zoom.on_pan_start(point);
            GestureMode::ImagePan
        } else {
            GestureMode::Idle
        };
    }

    /// Two or more pointers: enter (or continue) zoom mode.
    fn process_pinch(&mut self, active: &[Point], zoom: &mut ZoomPan, region: &mut CropRegion) {
        match self.mode {
            GestureMode::RectDrag => region.end_drag(),
            GestureMode::ImagePan => zoom.on_pan_end(),
            _ => {}
        }
        self.mode = GestureMode::Zoom;

        let current_centroid = centroid(active);
        let current_spread = average_spread(active, current_centroid);

        match self.baseline {
            None => {
                // First frame with two fingers (or first after dropping to
                // one): capture the reference, apply nothing.
                self.baseline = Some(PinchBaseline {
                    centroid: current_centroid,
                    spread: current_spread,
                });
            }
            Some(base) => {
                let multiplier = if base.spread > 0.0 {
                    current_spread / base.spread
                } else {
                    1.0
                };
                let pan_delta = Point::new(
                    current_centroid.x - base.centroid.x,
                    current_centroid.y - base.centroid.y,
                );
                zoom.on_pinch_update(current_centroid, multiplier, pan_delta);
                self.baseline = Some(PinchBaseline {
                    centroid: current_centroid,
                    spread: current_spread,
                });
            }
        }
    }

    /// Exactly one pointer: route to the single-finger mode, or discard
    /// the frame when falling out of a pinch.
    fn process_single(&mut self, point: Point, region: &mut CropRegion, zoom: &mut ZoomPan) {
        if self.mode == GestureMode::Zoom {
            // The finger that remains after a pinch would cause a
            // positional jump if it started driving anything; ignore it
            // and wait for either release or a fresh two-finger contact.
            self.baseline = None;
            return;
        }

        if point != self.last_single_point {
            self.has_moved = true;
            self.last_single_point = point;
            match self.mode {
                GestureMode::RectDrag => region.continue_drag(point),
                GestureMode::ImagePan => zoom.on_pan_drag(point),
                // Touch outside everything at rest zoom: nothing to drive.
                GestureMode::Idle | GestureMode::Zoom => {}
            }
        }
    }

    /// All pointers released: end the active mode and run tap detection.
    fn finish_gesture(&mut self, time_ms: f64, region: &mut CropRegion, zoom: &mut ZoomPan) {
        if !self.gesture_active {
            // A release with no tracked gesture (e.g. events delivered out
            // of order) is silently ignored.
            return;
        }

        match self.mode {
            GestureMode::RectDrag => region.end_drag(),
            GestureMode::ImagePan => zoom.on_pan_end(),
            _ => {}
        }

        if !self.has_moved
            && self.mode != GestureMode::Zoom
            && (time_ms - self.down_time_ms) < DOUBLE_TAP_WINDOW_MS
        {
            self.detect_double_tap(time_ms, zoom);
        }

        self.mode = GestureMode::Idle;
        self.gesture_active = false;
        self.baseline = None;
    }

    /// Compare this tap against the previous one; fire the zoom toggle on
    /// a match, otherwise remember it as the new candidate.
    fn detect_double_tap(&mut self, up_time_ms: f64, zoom: &mut ZoomPan) {
        let matches_last = self.last_tap.is_some_and(|tap| {
            (up_time_ms - tap.time_ms) < DOUBLE_TAP_WINDOW_MS
                && self.down_position.distance_to(tap.position) < DOUBLE_TAP_RADIUS
        });

        if matches_last {
            zoom.on_double_tap(self.down_position);
            self.last_tap = None;
        } else {
            self.last_tap = Some(TapCandidate {
                time_ms: up_time_ms,
                position: self.down_position,
            });
        }
    }
}

/// Mean position of the active pointers.
fn centroid(positions: &[Point]) -> Point {
    if positions.is_empty() {
        return Point::ZERO;
    }
    let (sum_x, sum_y) = positions
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Point::new(sum_x / positions.len() as f32, sum_y / positions.len() as f32)
}

/// Mean distance of the active pointers from their centroid; the frame-
/// over-frame ratio of this is the pinch scale multiplier.
fn average_spread(positions: &[Point], centroid: Point) -> f32 {
    if positions.len() < 2 {
        return 0.0;
    }
    let total: f32 = positions.iter().map(|p| p.distance_to(centroid)).sum();
    total / positions.len() as f32
}
