//! Crop extraction: from an on-screen rectangle to source pixels.
//!
//! Both algorithms map the four corners of the crop rectangle through the
//! inverse zoom transform (`image_point = pivot + (canvas_point - offset -
//! pivot) / scale`) and then land in a pixel grid - but they land in
//! *different* grids and truncate in a different order:
//!
//! - [`crop_at_canvas_resolution`] works in the canvas-scaled bitmap's
//!   grid: the source is first resampled to the canvas size, the mapped
//!   bounds are truncated there, and the output is rescaled to its export
//!   size.
//! - [`crop_at_source_resolution`] rescales the mapped bounds by
//!   `source / canvas` per axis before truncating, and cuts directly from
//!   the untouched source raster with no intermediate resampling - the
//!   higher-fidelity path.
//!
//! The two deliberately stay separate: their rounding differs near region
//! edges and callers may depend on either's exact pixels.
//!
//! Both return the unmodified source when the canvas has not been measured
//! yet (zero-sized) or the mapped region degenerates to zero area.

use crate::raster::{Raster, RasterError, ResampleFilter};
use crate::region::CropRegion;
use crate::zoom::ZoomPan;

/// Extract the crop at canvas resolution.
///
/// The source is scaled to the canvas size, the crop bounds are computed
/// in that scaled grid, and the extracted region is rescaled: 1:1 shapes
/// to their fixed square export side, all others back to the full canvas
/// size.
///
/// # Errors
///
/// Returns a [`RasterError`] only if a resampling step fails on an
/// inconsistent raster; geometry alone cannot produce an error.
pub fn crop_at_canvas_resolution(
    source: &Raster,
    region: &CropRegion,
    zoom: &ZoomPan,
) -> Result<Raster, RasterError> {
    let canvas = region.canvas_size();
    let canvas_w = canvas.width as i64;
    let canvas_h = canvas.height as i64;

    // Canvas not measured yet: nothing sensible to crop against.
    if canvas_w <= 0 || canvas_h <= 0 {
        return Ok(source.clone());
    }

    let scaled = source.resize(canvas_w as u32, canvas_h as u32, ResampleFilter::Bilinear)?;

    let rect = region.rect();
    let top_left = zoom.canvas_to_image(rect.top_left);
    let bottom_right = zoom.canvas_to_image(rect.bottom_right());

    let crop_left = (top_left.x as i64).max(0);
    let crop_top = (top_left.y as i64).max(0);
    let mut crop_w = ((bottom_right.x - top_left.x) as i64).clamp(1, canvas_w);
    let mut crop_h = ((bottom_right.y - top_left.y) as i64).clamp(1, canvas_h);

    if crop_left + crop_w > canvas_w {
        crop_w = canvas_w - crop_left;
    }
    if crop_top + crop_h > canvas_h {
        crop_h = canvas_h - crop_top;
    }
    let crop_w = crop_w.max(1);
    let crop_h = crop_h.max(1);

    let cropped = scaled.extract(
        crop_left as u32,
        crop_top as u32,
        crop_w as u32,
        crop_h as u32,
    )?;

    if region.shape().is_unit_square() {
        let side = region.square_export_side() as u32;
        cropped.resize(side, side, ResampleFilter::Bilinear)
    } else {
        cropped.resize(canvas_w as u32, canvas_h as u32, ResampleFilter::Bilinear)
    }
}

/// Extract the crop at native source resolution.
///
/// The mapped bounds are rescaled from canvas coordinates into the source
/// pixel grid (`source_dimension / canvas_dimension` per axis) and the
/// region is cut directly from the source raster. No resampling touches
/// the output pixels.
///
/// # Errors
///
/// Returns a [`RasterError`] only if the final extraction reads an
/// inconsistent raster; degenerate geometry falls back to the source.
pub fn crop_at_source_resolution(
    source: &Raster,
    region: &CropRegion,
    zoom: &ZoomPan,
) -> Result<Raster, RasterError> {
    let canvas = region.canvas_size();
    if canvas.is_empty() {
        return Ok(source.clone());
    }

    let rect = region.rect();
    let top_left = zoom.canvas_to_image(rect.top_left);
    let bottom_right = zoom.canvas_to_image(rect.bottom_right());

    let scale_x = source.width as f32 / canvas.width;
    let scale_y = source.height as f32 / canvas.height;

    let crop_left = ((top_left.x * scale_x) as i64).max(0);
    let crop_top = ((top_left.y * scale_y) as i64).max(0);
    let mut crop_w = ((bottom_right.x - top_left.x) * scale_x) as i64;
    let mut crop_h = ((bottom_right.y - top_left.y) * scale_y) as i64;

    crop_w = crop_w.min(source.width as i64 - crop_left);
    crop_h = crop_h.min(source.height as i64 - crop_top);

    if crop_w <= 0 || crop_h <= 0 {
        return Ok(source.clone());
    }

    source.extract(
        crop_left as u32,
        crop_top as u32,
        crop_w as u32,
        crop_h as u32,
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::{CanvasSize, Point};
    use crate::shape::CropShape;
    use proptest::prelude::*;

    fn flat_raster(width: u32, height: u32) -> Raster {
        Raster::new(width, height, vec![128u8; (width * height * 3) as usize]).unwrap()
    }

    proptest! {
        /// Property: source-resolution output always fits in the source.
        #[test]
        fn prop_source_res_within_source(
            tap_x in 0.0f32..=800.0,
            tap_y in 0.0f32..=600.0,
            drag_x in 360.0f32..=795.0,
            drag_y in 260.0f32..=595.0,
        ) {
            let source = flat_raster(97, 61);
            let mut region = CropRegion::new(CropShape::FreeStyle);
            region.on_canvas_size_changed(CanvasSize::new(800.0, 600.0));
            let mut zoom = ZoomPan::new();
            zoom.on_canvas_size_changed(CanvasSize::new(800.0, 600.0));

            zoom.on_double_tap(Point::new(tap_x, tap_y));
            region.begin_drag(Point::new(795.0, 595.0));
            region.continue_drag(Point::new(drag_x, drag_y));
            region.end_drag();

            let out = crop_at_source_resolution(&source, &region, &zoom).unwrap();
            prop_assert!(out.width >= 1);
            prop_assert!(out.height >= 1);
            prop_assert!(out.width <= source.width);
            prop_assert!(out.height <= source.height);
        }

        /// Property: canvas-resolution output size depends only on the
        /// shape, never on the rect or zoom.
        #[test]
        fn prop_canvas_res_output_size_fixed(
            tap_x in 0.0f32..=300.0,
            tap_y in 0.0f32..=240.0,
        ) {
            let source = flat_raster(50, 40);
            let mut region = CropRegion::new(CropShape::Square);
            region.on_canvas_size_changed(CanvasSize::new(300.0, 240.0));
            let mut zoom = ZoomPan::new();
            zoom.on_canvas_size_changed(CanvasSize::new(300.0, 240.0));
            zoom.on_double_tap(Point::new(tap_x, tap_y));

            let out = crop_at_canvas_resolution(&source, &region, &zoom).unwrap();
            prop_assert_eq!(out.width, 240);
            prop_assert_eq!(out.height, 240);
        }
    }
}
