//! WASM-compatible wrapper types for raster data.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! Cropkit types, handling the conversion between Rust and JavaScript
//! data representations.

use cropkit_core::{CropShape, Point, PointerInput, Raster};
use wasm_bindgen::prelude::*;

/// A raster wrapper for JavaScript.
///
/// Wraps the core `Raster` type and provides a JavaScript-friendly
/// interface for accessing dimensions and pixel data.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a
/// copy is made to JavaScript memory as a `Uint8Array`. For
/// performance-critical code, keep the raster in WASM memory and only
/// extract pixels when needed.
#[wasm_bindgen]
pub struct JsRaster {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRaster {
    /// Create a new JsRaster from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Raster width in pixels
    /// * `height` - Raster height in pixels
    /// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
    ///
    /// # Errors
    ///
    /// Throws if the buffer length does not match `width * height * 3`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsRaster, JsValue> {
        // Validate through the core constructor so JS gets the same error
        // the core would raise.
        let raster =
            Raster::new(width, height, pixels).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_raster(raster))
    }

    /// Get the raster width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the raster height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup
    /// automatically.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsRaster {
    /// Create a JsRaster from a core Raster.
    pub(crate) fn from_raster(raster: Raster) -> Self {
        Self {
            width: raster.width,
            height: raster.height,
            pixels: raster.pixels,
        }
    }

    /// Convert back to a core Raster.
    ///
    /// Note: This clones the pixel data.
    pub(crate) fn to_raster(&self) -> Raster {
        Raster {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Convert a u8 shape code (plus ratio terms) to the core CropShape enum.
///
/// Values:
/// - 0 = FreeStyle (no constraint)
/// - 1 = Square (1:1)
/// - 2 = ProfileCircle (1:1 with circular overlay)
/// - 3 = Ratio (fixed `ratio_w : ratio_h`, zero terms coerced to 1)
///
/// Any other value defaults to FreeStyle.
pub(crate) fn shape_from_code(code: u8, ratio_w: u32, ratio_h: u32) -> CropShape {
    match code {
        1 => CropShape::Square,
        2 => CropShape::ProfileCircle,
        3 => CropShape::Ratio {
            width: ratio_w.max(1),
            height: ratio_h.max(1),
        },
        _ => CropShape::FreeStyle,
    }
}

/// Parse a flat pointer batch.
///
/// JavaScript passes pointers as a `Float64Array` of `[id, x, y, pressed]`
/// quads, one per tracked pointer; `pressed` is nonzero for a finger that
/// is down. A trailing partial quad is ignored.
pub(crate) fn parse_pointer_batch(data: &[f64]) -> Vec<PointerInput> {
    data.chunks_exact(4)
        .map(|quad| PointerInput {
            id: quad[0] as u64,
            position: Point::new(quad[1] as f32, quad[2] as f32),
            pressed: quad[3] != 0.0,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_round_trip() {
        let js = JsRaster::new(4, 2, vec![7u8; 4 * 2 * 3]).unwrap();
        assert_eq!(js.width(), 4);
        assert_eq!(js.height(), 2);
        assert_eq!(js.byte_length(), 24);

        let core = js.to_raster();
        assert_eq!(core.width, 4);
        assert_eq!(core.pixels, js.pixels());
    }

    #[test]
    fn test_raster_rejects_bad_buffer() {
        assert!(JsRaster::new(4, 2, vec![0u8; 23]).is_err());
    }

    #[test]
    fn test_shape_codes() {
        assert_eq!(shape_from_code(0, 0, 0), CropShape::FreeStyle);
        assert_eq!(shape_from_code(1, 0, 0), CropShape::Square);
        assert_eq!(shape_from_code(2, 0, 0), CropShape::ProfileCircle);
        assert_eq!(
            shape_from_code(3, 16, 9),
            CropShape::Ratio {
                width: 16,
                height: 9
            }
        );
        // Zero ratio terms are coerced rather than producing a degenerate
        // constraint.
        assert_eq!(
            shape_from_code(3, 0, 0),
            CropShape::Ratio {
                width: 1,
                height: 1
            }
        );
        assert_eq!(shape_from_code(99, 0, 0), CropShape::FreeStyle);
    }

    #[test]
    fn test_parse_pointer_batch() {
        let data = [1.0, 100.0, 200.0, 1.0, 2.0, 300.0, 400.0, 0.0];
        let batch = parse_pointer_batch(&data);

        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, 1);
        assert_eq!(batch[0].position, Point::new(100.0, 200.0));
        assert!(batch[0].pressed);
        assert_eq!(batch[1].id, 2);
        assert!(!batch[1].pressed);
    }

    #[test]
    fn test_parse_pointer_batch_ignores_partial_quad() {
        let data = [1.0, 100.0, 200.0, 1.0, 2.0, 300.0];
        assert_eq!(parse_pointer_batch(&data).len(), 1);
    }

    #[test]
    fn test_parse_pointer_batch_empty() {
        assert!(parse_pointer_batch(&[]).is_empty());
    }
}
