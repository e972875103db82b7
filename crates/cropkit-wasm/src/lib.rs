//! Cropkit WASM - WebAssembly bindings for the Cropkit crop engine
//!
//! This crate exposes the cropkit-core engine to JavaScript/TypeScript
//! canvas hosts.
//!
//! # Module Structure
//!
//! - `editor` - The crop-editor session binding (pointer input, snapshots,
//!   extraction)
//! - `types` - WASM-compatible wrapper types for raster data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropEditor, JsRaster } from '@cropkit/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const raster = new JsRaster(width, height, rgbPixels);
//! const editor = new JsCropEditor(raster, 0, 0, 0);
//! editor.canvas_size_changed(canvas.width, canvas.height);
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod types;

// Re-export public types
pub use editor::JsCropEditor;
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    // Future: Set up panic hook for better error messages in browser console
    // when console_error_panic_hook feature is added
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
