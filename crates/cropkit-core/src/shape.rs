//! Crop shape constraints.
//!
//! The shape constraint governs two things: the canonical default rectangle
//! after a reset, and whether a corner resize preserves an aspect ratio.
//! Every resize path consumes the constraint through exhaustive matching,
//! so adding a variant surfaces every call site that needs a decision.

use serde::{Deserialize, Serialize};

/// Aspect-ratio constraint applied to the crop rectangle.
///
/// - [`FreeStyle`](CropShape::FreeStyle) - no constraint; any proportion.
/// - [`Square`](CropShape::Square) - locked to 1:1.
/// - [`ProfileCircle`](CropShape::ProfileCircle) - 1:1 like `Square`; the
///   renderer draws a circular overlay but the geometry is identical.
/// - [`Ratio`](CropShape::Ratio) - locked to a fixed width:height ratio,
///   e.g. 3:2 or 16:9.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CropShape {
    /// No ratio constraint.
    #[default]
    FreeStyle,
    /// Locked to a 1:1 aspect ratio.
    Square,
    /// 1:1 with a circular overlay mask drawn by the renderer.
    ProfileCircle,
    /// Locked to a fixed width:height ratio.
    Ratio {
        /// Ratio numerator (width units).
        width: u32,
        /// Ratio denominator (height units).
        height: u32,
    },
}

impl CropShape {
    /// 3:2 landscape preset.
    pub const RATIO_3_2: CropShape = CropShape::Ratio {
        width: 3,
        height: 2,
    };
    /// 4:3 standard preset.
    pub const RATIO_4_3: CropShape = CropShape::Ratio {
        width: 4,
        height: 3,
    };
    /// 16:9 widescreen preset.
    pub const RATIO_16_9: CropShape = CropShape::Ratio {
        width: 16,
        height: 9,
    };
    /// 9:16 portrait / stories preset.
    pub const RATIO_9_16: CropShape = CropShape::Ratio {
        width: 9,
        height: 16,
    };

    /// The width-to-height ratio this shape enforces, or `None` for
    /// free-style.
    ///
    /// `Square` and `ProfileCircle` report `1.0`. A degenerate
    /// `Ratio { height: 0, .. }` reports `None` rather than dividing by
    /// zero, which makes it behave as free-style.
    pub fn aspect_ratio(&self) -> Option<f32> {
        match self {
            CropShape::FreeStyle => None,
            CropShape::Square | CropShape::ProfileCircle => Some(1.0),
            CropShape::Ratio { width, height } => {
                if *width == 0 || *height == 0 {
                    None
                } else {
                    Some(*width as f32 / *height as f32)
                }
            }
        }
    }

    /// True for the 1:1 shapes, which get a centered-square default
    /// rectangle and a fixed square export size.
    pub fn is_unit_square(&self) -> bool {
        matches!(self, CropShape::Square | CropShape::ProfileCircle)
    }
}
