//! WASM bindings for the crop editor.
//!
//! This module exposes the core `CropEditor` facade to a JavaScript
//! canvas host: pointer batches flow in as flat arrays, rectangle and
//! zoom snapshots flow out as plain JS objects for the render loop, and
//! extraction returns a [`JsRaster`].

use cropkit_core::CropEditor;
use wasm_bindgen::prelude::*;

use crate::types::{parse_pointer_batch, shape_from_code, JsRaster};

/// One crop session over one source raster, driven from JavaScript.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const editor = new JsCropEditor(raster, 1 /* Square */, 0, 0);
/// editor.canvas_size_changed(canvas.width, canvas.height);
///
/// canvas.onpointermove = () => {
///   // [id, x, y, pressed] per tracked pointer
///   editor.handle_pointers(new Float64Array(flat), performance.now());
///   const rect = editor.rect(); // { top_left: {x, y}, size: {...} }
///   draw(rect, editor.zoom());
/// };
///
/// const cropped = editor.request_crop(true);
/// ```
#[wasm_bindgen]
pub struct JsCropEditor {
    inner: CropEditor,
}

#[wasm_bindgen]
impl JsCropEditor {
    /// Create an editor over `source` with the given shape constraint.
    ///
    /// `shape_code` follows the same encoding as [`set_shape`]:
    /// 0 = FreeStyle, 1 = Square, 2 = ProfileCircle, 3 = fixed
    /// `ratio_w : ratio_h`.
    ///
    /// [`set_shape`]: JsCropEditor::set_shape
    #[wasm_bindgen(constructor)]
    pub fn new(source: &JsRaster, shape_code: u8, ratio_w: u32, ratio_h: u32) -> JsCropEditor {
        let shape = shape_from_code(shape_code, ratio_w, ratio_h);
        JsCropEditor {
            inner: CropEditor::new(source.to_raster(), shape),
        }
    }

    /// Layout notification: store the canvas size, reset zoom and rebuild
    /// the crop rectangle.
    pub fn canvas_size_changed(&mut self, width: f32, height: f32) {
        self.inner.canvas_size_changed(width, height);
    }

    /// Feed one pointer batch.
    ///
    /// `data` is a flat array of `[id, x, y, pressed]` quads, one per
    /// tracked pointer, with `pressed` nonzero for a finger that is down.
    /// `time_ms` is the host's timestamp for the batch (e.g.
    /// `performance.now()`).
    pub fn handle_pointers(&mut self, data: &[f64], time_ms: f64) {
        let batch = parse_pointer_batch(data);
        self.inner.handle_pointers(&batch, time_ms);
    }

    /// Replace the shape constraint; the rectangle resets to the new
    /// shape's default.
    pub fn set_shape(&mut self, shape_code: u8, ratio_w: u32, ratio_h: u32) {
        self.inner
            .set_shape(shape_from_code(shape_code, ratio_w, ratio_h));
    }

    /// Reset the crop rectangle without touching canvas size or zoom.
    pub fn reset_region(&mut self) {
        self.inner.reset_region();
    }

    /// Reset zoom and pan to rest.
    pub fn reset_zoom(&mut self) {
        self.inner.reset_zoom();
    }

    /// Swap in a new source raster, keeping rect and zoom.
    pub fn replace_source(&mut self, source: &JsRaster) {
        self.inner.replace_source(source.to_raster());
    }

    /// Extract the current crop.
    ///
    /// With `use_source_resolution` the crop is cut from the source's
    /// native pixel grid; otherwise it goes through the canvas-resolution
    /// path. Before the first layout both return the source unchanged.
    pub fn request_crop(&self, use_source_resolution: bool) -> Result<JsRaster, JsValue> {
        self.inner
            .request_crop(use_source_resolution)
            .map(JsRaster::from_raster)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Current crop rectangle as `{ top_left: {x, y}, size: {width,
    /// height} }`.
    pub fn rect(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.rect()).map_err(Into::into)
    }

    /// Current zoom state as `{ scale, offset: {x, y} }`.
    pub fn zoom(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.zoom()).map_err(Into::into)
    }

    /// Current canvas size as `{ width, height }`.
    pub fn canvas_size(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.canvas_size()).map_err(Into::into)
    }

    /// Guide-line segments for the current rectangle as an array of
    /// `{ start: {x, y}, end: {x, y} }`.
    pub fn guidelines(&self, count: u32) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.guidelines(count)).map_err(Into::into)
    }

    /// The mode of the in-flight gesture, as its name (e.g. `"RectDrag"`).
    pub fn gesture_mode(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.gesture_mode()).map_err(Into::into)
    }
}
