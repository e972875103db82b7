//! The source-image raster type.
//!
//! The engine never decodes or encodes files; the host hands it an already
//! decoded RGB buffer and gets RGB buffers back. A [`Raster`] is that
//! buffer plus its pixel dimensions, with conversions to and from the
//! `image` crate's `RgbImage` for the resampling steps of extraction.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error types for raster operations.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The pixel buffer length does not match `width * height * 3`.
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch {
        /// Expected byte count for the stated dimensions.
        expected: usize,
        /// Actual length of the supplied buffer.
        actual: usize,
    },

    /// A resize or extraction target had a zero dimension.
    #[error("Invalid raster dimensions: {0}x{1}")]
    InvalidDimensions(u32, u32),

    /// The buffer could not be converted to an `image::RgbImage`.
    #[error("Failed to convert raster to an RGB image")]
    ConversionFailed,
}

/// Filter used when extraction has to resample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ResampleFilter {
    /// Nearest neighbor (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 (slower, highest quality).
    Lanczos3,
}

impl ResampleFilter {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            ResampleFilter::Nearest => image::imageops::FilterType::Nearest,
            ResampleFilter::Bilinear => image::imageops::FilterType::Triangle,
            ResampleFilter::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// An immutable RGB raster with its own pixel dimensions.
///
/// This is the source image the crop rectangle is ultimately applied to.
/// Its dimensions are independent of the canvas size; the two coordinate
/// spaces only meet inside the extraction functions.
#[derive(Debug, Clone)]
pub struct Raster {
    /// Raster width in pixels.
    pub width: u32,
    /// Raster height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    /// Length is width * height * 3.
    pub pixels: Vec<u8>,
}

impl Raster {
    /// Create a new raster, validating the buffer length.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::BufferSizeMismatch`] if `pixels` is not
    /// exactly `width * height * 3` bytes long.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        let expected = (width as usize) * (height as usize) * 3;
        if pixels.len() != expected {
            return Err(RasterError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Create a raster from an `image::RgbImage`.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Convert to an `image::RgbImage` for resampling.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::ConversionFailed`] if the buffer cannot back
    /// an `RgbImage` of the stated dimensions.
    pub fn to_rgb_image(&self) -> Result<image::RgbImage, RasterError> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or(RasterError::ConversionFailed)
    }

    /// Resample to exact dimensions.
    ///
    /// Returns a clone when the dimensions already match.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidDimensions`] for a zero target, or
    /// [`RasterError::ConversionFailed`] if the buffer is inconsistent.
    pub fn resize(
        &self,
        width: u32,
        height: u32,
        filter: ResampleFilter,
    ) -> Result<Raster, RasterError> {
        if width == 0 || height == 0 {
            return Err(RasterError::InvalidDimensions(width, height));
        }
        if self.width == width && self.height == height {
            return Ok(self.clone());
        }

        let rgb = self.to_rgb_image()?;
        let resized = image::imageops::resize(&rgb, width, height, filter.to_image_filter());
        Ok(Raster::from_rgb_image(resized))
    }

    /// Copy out the sub-raster at (`left`, `top`) with the given size.
    ///
    /// The caller is responsible for clamping the region to the raster
    /// extent first; both extraction algorithms do their own clamping with
    /// their own rounding, so this stays a plain row copy.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidDimensions`] if the region is empty or
    /// reaches outside the raster.
    pub fn extract(
        &self,
        left: u32,
        top: u32,
        width: u32,
        height: u32,
    ) -> Result<Raster, RasterError> {
        if width == 0 || height == 0 || left + width > self.width || top + height > self.height {
            return Err(RasterError::InvalidDimensions(width, height));
        }

        let mut output = vec![0u8; (width as usize) * (height as usize) * 3];

        // Copy pixel data row by row for efficiency
        for y in 0..height {
            let src_start = (((top + y) * self.width + left) * 3) as usize;
            let src_end = src_start + (width * 3) as usize;
            let dst_start = (y * width * 3) as usize;
            let dst_end = dst_start + (width * 3) as usize;
            output[dst_start..dst_end].copy_from_slice(&self.pixels[src_start..src_end]);
        }

        Ok(Raster {
            width,
            height,
            pixels: output,
        })
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Check if this is an empty/invalid raster.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.pixels.is_empty()
    }
}
