//! Constrained corner resizing.
//!
//! One shared routine handles all four corners. The corner diagonally
//! opposite the dragged one is the anchor: it never moves during the
//! gesture, even when clamping kicks in on the dragged corner, which is
//! what keeps corner drags from visibly jumping.
//!
//! # Clamp order
//!
//! The candidate position of the dragged corner passes through three steps
//! in a fixed order:
//!
//! 1. canvas bounds - the corner cannot leave the canvas;
//! 2. minimum size - the corner stays at least [`MIN_SIDE`] away from the
//!    anchor on each axis;
//! 3. ratio lock - for constrained shapes the two dimensions collapse to a
//!    ratio-consistent pair, shrunk if needed to the largest size that
//!    still fits between the anchor and the canvas edge.

use crate::geometry::{CanvasSize, Point, Rect};
use crate::shape::CropShape;

use super::hit::Corner;
use super::MIN_SIDE;

/// Resize `rect` by moving `corner` by `delta`, holding the opposite
/// corner fixed.
pub(super) fn resize_from_corner(
    rect: &Rect,
    corner: Corner,
    delta: Point,
    canvas: CanvasSize,
    shape: CropShape,
) -> Rect {
    let fixed = corner.opposite().point_of(rect);
    let mut moving = corner.point_of(rect).offset_by(delta.x, delta.y);

    // Direction from the anchor toward the dragged corner, per axis.
    let sx: f32 = match corner {
        Corner::TopRight | Corner::BottomRight => 1.0,
        Corner::TopLeft | Corner::BottomLeft => -1.0,
    };
    let sy: f32 = match corner {
        Corner::BottomLeft | Corner::BottomRight => 1.0,
        Corner::TopLeft | Corner::TopRight => -1.0,
    };

    // 1. Canvas bounds.
    moving.x = moving.x.clamp(0.0, canvas.width);
    moving.y = moving.y.clamp(0.0, canvas.height);

    // 2. Minimum size, measured from the anchor.
    if sx > 0.0 {
        moving.x = moving.x.max(fixed.x + MIN_SIDE);
    } else {
        moving.x = moving.x.min(fixed.x - MIN_SIDE);
    }
    if sy > 0.0 {
        moving.y = moving.y.max(fixed.y + MIN_SIDE);
    } else {
        moving.y = moving.y.min(fixed.y - MIN_SIDE);
    }

    // Room between the anchor and the canvas edge on the moving side.
    let avail_w = if sx > 0.0 {
        canvas.width - fixed.x
    } else {
        fixed.x
    };
    let avail_h = if sy > 0.0 {
        canvas.height - fixed.y
    } else {
        fixed.y
    };

    let mut width = (moving.x - fixed.x).abs();
    let mut height = (moving.y - fixed.y).abs();

    // 3. Ratio lock.
    if let Some(ratio) = shape.aspect_ratio() {
        if shape.is_unit_square() {
            // The smaller candidate dimension wins, then shrink to fit.
            let side = width.min(height).max(MIN_SIDE).min(avail_w).min(avail_h);
            width = side;
            height = side;
        } else {
            // Height follows width through the ratio. Width first gets a
            // floor so neither derived side drops below the minimum, then
            // the pair is scaled down to the largest ratio-consistent size
            // that fits from the anchor.
            width = width.max(MIN_SIDE).max(MIN_SIDE * ratio);
            height = width / ratio;
            let fit = (avail_w / width).min(avail_h / height).min(1.0);
            width *= fit;
            height *= fit;
        }
    }

    let moving = Point::new(fixed.x + sx * width, fixed.y + sy * height);
    Rect::from_edges(
        fixed.x.min(moving.x),
        fixed.y.min(moving.y),
        fixed.x.max(moving.x),
        fixed.y.max(moving.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    const CANVAS: CanvasSize = CanvasSize {
        width: 800.0,
        height: 600.0,
    };

    fn rect(l: f32, t: f32, w: f32, h: f32) -> Rect {
        Rect::new(Point::new(l, t), Size::new(w, h))
    }

    #[test]
    fn test_bottom_right_expand() {
        let r = rect(100.0, 100.0, 400.0, 300.0);
        let out = resize_from_corner(
            &r,
            Corner::BottomRight,
            Point::new(50.0, 50.0),
            CANVAS,
            CropShape::FreeStyle,
        );

        assert_eq!(out.top_left, Point::new(100.0, 100.0));
        assert_eq!(out.bottom_right(), Point::new(550.0, 450.0));
    }

    #[test]
    fn test_anchor_never_moves() {
        let r = rect(100.0, 100.0, 400.0, 300.0);

        for (corner, anchor) in [
            (Corner::TopLeft, r.bottom_right()),
            (Corner::TopRight, r.bottom_left()),
            (Corner::BottomLeft, r.top_right()),
            (Corner::BottomRight, r.top_left),
        ] {
            let out = resize_from_corner(
                &r,
                corner,
                Point::new(-900.0, 700.0),
                CANVAS,
                CropShape::FreeStyle,
            );
            assert_eq!(
                corner.opposite().point_of(&out),
                anchor,
                "anchor moved for {corner:?}"
            );
        }
    }

    #[test]
    fn test_clamps_to_canvas_edge() {
        // BR corner at (700, 500) dragged (+50, +50) on an 800x600 canvas
        // lands on (750, 550); dragged further it pins to the canvas
        // corner.
        let r = rect(100.0, 100.0, 600.0, 400.0);
        let out = resize_from_corner(
            &r,
            Corner::BottomRight,
            Point::new(50.0, 50.0),
            CANVAS,
            CropShape::FreeStyle,
        );
        assert_eq!(out.bottom_right(), Point::new(750.0, 550.0));

        // Dragged much further, clamps to the canvas corner.
        let out = resize_from_corner(
            &r,
            Corner::BottomRight,
            Point::new(500.0, 500.0),
            CANVAS,
            CropShape::FreeStyle,
        );
        assert_eq!(out.bottom_right(), Point::new(800.0, 600.0));
    }

    #[test]
    fn test_minimum_size_enforced() {
        let r = rect(100.0, 100.0, 400.0, 300.0);

        // Collapse attempt from the top-left: stops MIN_SIDE away from the
        // fixed bottom-right corner.
        let out = resize_from_corner(
            &r,
            Corner::TopLeft,
            Point::new(1000.0, 1000.0),
            CANVAS,
            CropShape::FreeStyle,
        );
        assert_eq!(out.size.width, MIN_SIDE);
        assert_eq!(out.size.height, MIN_SIDE);
        assert_eq!(out.bottom_right(), Point::new(500.0, 400.0));
    }

    #[test]
    fn test_square_takes_smaller_dimension() {
        let r = rect(150.0, 50.0, 500.0, 500.0);

        // Drag BR corner left more than up: width shrinks more, square
        // follows the smaller dimension.
        let out = resize_from_corner(
            &r,
            Corner::BottomRight,
            Point::new(-100.0, -40.0),
            CANVAS,
            CropShape::Square,
        );
        assert_eq!(out.size.width, out.size.height);
        assert_eq!(out.size.width, 400.0);
        assert_eq!(out.top_left, Point::new(150.0, 50.0));
    }

    #[test]
    fn test_square_shrinks_to_fit_canvas() {
        // Anchor near the right edge: expanding the top-left corner beyond
        // what fits forces the square down to the available room.
        let r = rect(550.0, 100.0, 210.0, 210.0);
        let out = resize_from_corner(
            &r,
            Corner::TopLeft,
            Point::new(-400.0, -90.0),
            CANVAS,
            CropShape::Square,
        );

        // Anchor (760, 310) stays; only 310 units of height above it, but
        // the dragged corner clamped at y = 10 gives side 300.
        assert_eq!(out.bottom_right(), Point::new(760.0, 310.0));
        assert_eq!(out.size.width, out.size.height);
        assert!(out.left() >= 0.0 && out.top() >= 0.0);
        assert_eq!(out.size.width, 300.0);
    }

    #[test]
    fn test_ratio_locks_proportion() {
        let r = rect(0.0, 0.0, 800.0, 600.0);
        let out = resize_from_corner(
            &r,
            Corner::BottomRight,
            Point::new(-200.0, -100.0),
            CANVAS,
            CropShape::RATIO_3_2,
        );

        let ratio = out.size.width / out.size.height;
        assert!((ratio - 1.5).abs() < 1e-4, "ratio drifted: {ratio}");
        assert_eq!(out.top_left, Point::ZERO);
        assert_eq!(out.size.width, 600.0);
        assert_eq!(out.size.height, 400.0);
    }

    #[test]
    fn test_ratio_shrinks_to_fit() {
        // Width-derived height would poke past the bottom edge; the pair
        // shrinks together, staying ratio-consistent.
        let r = rect(0.0, 0.0, 300.0, 400.0);
        let out = resize_from_corner(
            &r,
            Corner::BottomRight,
            Point::new(500.0, 300.0),
            CANVAS,
            CropShape::Ratio {
                width: 1,
                height: 1,
            },
        );

        assert!((out.size.width - out.size.height).abs() < 1e-3);
        assert!(out.bottom() <= CANVAS.height + 1e-3);
        assert!(out.right() <= CANVAS.width + 1e-3);
        assert_eq!(out.size.height, 600.0);
    }

    #[test]
    fn test_ratio_minimum_keeps_both_sides_legal() {
        // A wide ratio collapsed as far as it will go: the short side would
        // drop below the minimum, so the width floor holds it up.
        let r = rect(0.0, 0.0, 800.0, 450.0);
        let out = resize_from_corner(
            &r,
            Corner::BottomRight,
            Point::new(-790.0, -440.0),
            CANVAS,
            CropShape::RATIO_16_9,
        );

        assert!(out.size.height >= MIN_SIDE - 1e-3);
        assert!(out.size.width >= MIN_SIDE - 1e-3);
        let ratio = out.size.width / out.size.height;
        assert!((ratio - 16.0 / 9.0).abs() < 1e-3);
    }

    #[test]
    fn test_top_right_drag() {
        let r = rect(200.0, 200.0, 300.0, 300.0);
        let out = resize_from_corner(
            &r,
            Corner::TopRight,
            Point::new(60.0, -80.0),
            CANVAS,
            CropShape::FreeStyle,
        );

        assert_eq!(out.bottom_left(), Point::new(200.0, 500.0));
        assert_eq!(out.top_right(), Point::new(560.0, 120.0));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
