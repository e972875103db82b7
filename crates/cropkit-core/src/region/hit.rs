//! Touch classification for the crop rectangle.
//!
//! A touch either moves the whole rectangle, grabs a corner to resize, or
//! misses. Classification happens once at gesture start and is held for the
//! whole drag, so a finger sliding off a corner mid-gesture keeps resizing
//! that corner.

use crate::geometry::{Point, Rect};

use super::MIN_SIDE;

/// One corner of the crop rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// The diagonally opposite corner - the anchor that stays fixed while
    /// this corner is dragged.
    pub fn opposite(self) -> Corner {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    /// This corner's position on the given rectangle.
    pub fn point_of(self, rect: &Rect) -> Point {
        match self {
            Corner::TopLeft => rect.top_left,
            Corner::TopRight => rect.top_right(),
            Corner::BottomLeft => rect.bottom_left(),
            Corner::BottomRight => rect.bottom_right(),
        }
    }
}

/// What a touch on the crop rectangle means.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchTarget {
    /// Drag translates the whole rectangle.
    MoveWhole,
    /// Drag resizes by moving this corner; the opposite corner is anchored.
    ResizeCorner(Corner),
}

/// Corner hit zones are tested in this fixed order; the first match wins.
/// Bottom corners take priority so that on a minimum-size rectangle, where
/// all four zones overlap, the tie-break is deterministic.
const CORNER_PRIORITY: [Corner; 4] = [
    Corner::BottomRight,
    Corner::BottomLeft,
    Corner::TopRight,
    Corner::TopLeft,
];

/// The square hit zone of side `2 * MIN_SIDE` centered on a corner.
fn corner_zone(rect: &Rect, corner: Corner) -> Rect {
    let center = corner.point_of(rect);
    Rect::from_edges(
        center.x - MIN_SIDE,
        center.y - MIN_SIDE,
        center.x + MIN_SIDE,
        center.y + MIN_SIDE,
    )
}

/// Classify a touch against the crop rectangle.
///
/// A point inside `touch_rect` (the rectangle inset by the touch padding)
/// means the whole rectangle moves. Otherwise the corner zones are tested
/// in priority order. A miss returns `None`.
pub(crate) fn classify(point: Point, rect: &Rect, touch_rect: &Rect) -> Option<TouchTarget> {
    if touch_rect.contains(point) {
        return Some(TouchTarget::MoveWhole);
    }

    CORNER_PRIORITY
        .iter()
        .find(|corner| corner_zone(rect, **corner).contains(point))
        .map(|corner| TouchTarget::ResizeCorner(*corner))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;
    use crate::region::TOUCH_PAD;

    fn rect_800_600() -> (Rect, Rect) {
        let rect = Rect::new(Point::new(0.0, 0.0), Size::new(800.0, 600.0));
        let touch_rect = rect.inset(TOUCH_PAD);
        (rect, touch_rect)
    }

    #[test]
    fn test_center_moves_whole() {
        let (rect, touch_rect) = rect_800_600();
        assert_eq!(
            classify(Point::new(400.0, 300.0), &rect, &touch_rect),
            Some(TouchTarget::MoveWhole)
        );
    }

    #[test]
    fn test_each_corner_hits() {
        let (rect, touch_rect) = rect_800_600();

        assert_eq!(
            classify(Point::new(5.0, 5.0), &rect, &touch_rect),
            Some(TouchTarget::ResizeCorner(Corner::TopLeft))
        );
        assert_eq!(
            classify(Point::new(795.0, 5.0), &rect, &touch_rect),
            Some(TouchTarget::ResizeCorner(Corner::TopRight))
        );
        assert_eq!(
            classify(Point::new(5.0, 595.0), &rect, &touch_rect),
            Some(TouchTarget::ResizeCorner(Corner::BottomLeft))
        );
        assert_eq!(
            classify(Point::new(795.0, 595.0), &rect, &touch_rect),
            Some(TouchTarget::ResizeCorner(Corner::BottomRight))
        );
    }

    #[test]
    fn test_corner_zone_extends_outside_rect() {
        let rect = Rect::new(Point::new(200.0, 200.0), Size::new(300.0, 300.0));
        let touch_rect = rect.inset(TOUCH_PAD);

        // Just outside the rect, still within the corner zone
        let hit = classify(Point::new(160.0, 160.0), &rect, &touch_rect);
        assert_eq!(hit, Some(TouchTarget::ResizeCorner(Corner::TopLeft)));
    }

    #[test]
    fn test_far_outside_misses() {
        let rect = Rect::new(Point::new(300.0, 300.0), Size::new(250.0, 250.0));
        let touch_rect = rect.inset(TOUCH_PAD);

        assert_eq!(classify(Point::new(10.0, 10.0), &rect, &touch_rect), None);
    }

    #[test]
    fn test_move_zone_wins_over_corner_zone() {
        // On a large rect the touch rect and the corner zones overlap near
        // the inset boundary; containment in the touch rect must win.
        let (rect, touch_rect) = rect_800_600();
        let point = Point::new(TOUCH_PAD + 1.0, TOUCH_PAD + 1.0);

        assert!(touch_rect.contains(point));
        assert_eq!(
            classify(point, &rect, &touch_rect),
            Some(TouchTarget::MoveWhole)
        );
    }

    #[test]
    fn test_overlapping_zones_tie_break() {
        // A rect of minimum height: the top and bottom zones of each side
        // overlap, and near the right edge so do BR and TR. Priority
        // order resolves every overlap the same way.
        let rect = Rect::new(Point::new(100.0, 100.0), Size::new(300.0, MIN_SIDE));
        let touch_rect = rect.inset(TOUCH_PAD);

        // In both the BR and TR zones: BOTTOM_RIGHT wins.
        let hit = classify(Point::new(350.0, 150.0), &rect, &touch_rect);
        assert_eq!(hit, Some(TouchTarget::ResizeCorner(Corner::BottomRight)));

        // In both the BL and TL zones: BOTTOM_LEFT wins.
        let hit = classify(Point::new(150.0, 200.0), &rect, &touch_rect);
        assert_eq!(hit, Some(TouchTarget::ResizeCorner(Corner::BottomLeft)));
    }

    #[test]
    fn test_opposite_corners() {
        assert_eq!(Corner::TopLeft.opposite(), Corner::BottomRight);
        assert_eq!(Corner::TopRight.opposite(), Corner::BottomLeft);
        assert_eq!(Corner::BottomLeft.opposite(), Corner::TopRight);
        assert_eq!(Corner::BottomRight.opposite(), Corner::TopLeft);
    }

    #[test]
    fn test_corner_points() {
        let rect = Rect::new(Point::new(10.0, 20.0), Size::new(100.0, 50.0));
        assert_eq!(Corner::TopLeft.point_of(&rect), Point::new(10.0, 20.0));
        assert_eq!(Corner::TopRight.point_of(&rect), Point::new(110.0, 20.0));
        assert_eq!(Corner::BottomLeft.point_of(&rect), Point::new(10.0, 70.0));
        assert_eq!(
            Corner::BottomRight.point_of(&rect),
            Point::new(110.0, 70.0)
        );
    }
}
