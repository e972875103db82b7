//! Cropkit Core - Interactive crop geometry engine
//!
//! This crate implements the geometry and interaction engine behind an
//! on-screen image-cropping control: a rectangle (or circle) the user can
//! drag, resize by corner and constrain to an aspect ratio, over an image
//! that pans and zooms underneath, finally extracted as a sub-region of
//! the source raster.
//!
//! The engine is pure and single-threaded: the host feeds it canvas-size
//! notifications and pointer-event batches on its input thread, pulls
//! immutable [`Rect`]/[`ZoomState`] snapshots for rendering, and calls
//! [`CropEditor::request_crop`] when the user confirms. Rendering, image
//! decoding and persistence live entirely in the host.

pub mod extract;
pub mod geometry;
pub mod gesture;
pub mod raster;
pub mod region;
pub mod shape;
pub mod zoom;

pub use extract::{crop_at_canvas_resolution, crop_at_source_resolution};
pub use geometry::{CanvasSize, GuideLine, Point, Rect, Size};
pub use gesture::{GestureDispatcher, GestureMode, PointerInput};
pub use raster::{Raster, RasterError, ResampleFilter};
pub use region::{Corner, CropRegion, TouchTarget, MIN_SIDE, SQUARE_MARGIN, TOUCH_PAD};
pub use shape::CropShape;
pub use zoom::{ZoomPan, ZoomState, DOUBLE_TAP_ZOOM, MAX_ZOOM, MIN_ZOOM};

/// The engine facade: one crop session over one source raster.
///
/// Owns the three engines (crop region, zoom/pan, gesture dispatcher) and
/// wires them together. All mutation goes through these methods; callers
/// only ever see value snapshots.
///
/// # Example
///
/// ```ignore
/// use cropkit_core::{CropEditor, CropShape, PointerInput, Raster};
///
/// let source = Raster::new(width, height, pixels)?;
/// let mut editor = CropEditor::new(source, CropShape::Square);
/// editor.canvas_size_changed(800.0, 600.0);
///
/// // Feed pointer batches as they arrive...
/// editor.handle_pointers(&batch, time_ms);
///
/// // ...render from snapshots...
/// let rect = editor.rect();
///
/// // ...and extract when the user confirms.
/// let cropped = editor.request_crop(true)?;
/// ```
#[derive(Debug)]
pub struct CropEditor {
    source: Raster,
    region: CropRegion,
    zoom: ZoomPan,
    dispatcher: GestureDispatcher,
}

impl CropEditor {
    /// Create an editor over `source` with the given shape constraint.
    ///
    /// The crop rectangle stays zero-sized until the first
    /// [`canvas_size_changed`](Self::canvas_size_changed).
    pub fn new(source: Raster, shape: CropShape) -> Self {
        Self {
            source,
            region: CropRegion::new(shape),
            zoom: ZoomPan::new(),
            dispatcher: GestureDispatcher::new(),
        }
    }

    /// Layout notification: store the canvas size, reset zoom to rest and
    /// rebuild the crop rectangle to its canonical default.
    pub fn canvas_size_changed(&mut self, width: f32, height: f32) {
        let size = CanvasSize::new(width, height);
        self.region.on_canvas_size_changed(size);
        self.zoom.on_canvas_size_changed(size);
    }

    /// Feed one pointer batch with its host timestamp into the gesture
    /// state machine.
    pub fn handle_pointers(&mut self, pointers: &[PointerInput], time_ms: f64) {
        self.dispatcher
            .process(pointers, time_ms, &mut self.region, &mut self.zoom);
    }

    /// Replace the shape constraint; the rectangle resets to the new
    /// shape's default.
    pub fn set_shape(&mut self, shape: CropShape) {
        self.region.set_shape(shape);
    }

    /// Reset the crop rectangle to its canonical default without touching
    /// canvas size or zoom.
    pub fn reset_region(&mut self) {
        self.region.reset();
    }

    /// Reset zoom and pan to rest.
    pub fn reset_zoom(&mut self) {
        self.zoom.reset();
    }

    /// Swap in a new source raster. Rect and zoom are untouched; the next
    /// extraction reads the new pixels.
    pub fn replace_source(&mut self, source: Raster) {
        self.source = source;
    }

    /// Extract the current crop.
    ///
    /// With `use_source_resolution` the bounds land directly in the source
    /// raster's native grid (higher fidelity); otherwise the source is
    /// first scaled to canvas size and the output re-scaled to its export
    /// size. Before the canvas is measured, both return the source
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Returns a [`RasterError`] if a resampling step fails on an
    /// inconsistent raster.
    pub fn request_crop(&self, use_source_resolution: bool) -> Result<Raster, RasterError> {
        if use_source_resolution {
            extract::crop_at_source_resolution(&self.source, &self.region, &self.zoom)
        } else {
            extract::crop_at_canvas_resolution(&self.source, &self.region, &self.zoom)
        }
    }

    /// Current crop rectangle snapshot.
    pub fn rect(&self) -> Rect {
        self.region.rect()
    }

    /// Current zoom snapshot.
    pub fn zoom(&self) -> ZoomState {
        self.zoom.state()
    }

    /// Current canvas size snapshot.
    pub fn canvas_size(&self) -> CanvasSize {
        self.region.canvas_size()
    }

    /// Current shape constraint.
    pub fn shape(&self) -> CropShape {
        self.region.shape()
    }

    /// Guide-line segments for the current rectangle.
    pub fn guidelines(&self, count: u32) -> Vec<GuideLine> {
        self.region.guidelines(count)
    }

    /// The mode of the in-flight gesture, if any.
    pub fn gesture_mode(&self) -> GestureMode {
        self.dispatcher.mode()
    }

    /// The current source raster.
    pub fn source(&self) -> &Raster {
        &self.source
    }
}
