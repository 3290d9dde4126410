#![forbid(unsafe_code)]

//! Geometric primitives for overlay placement.
//!
//! Positions use the overlay coordinate model: offsets from the screen center
//! in `f32` pixels, `+y` pointing down. Display and view dimensions are whole
//! pixels (`u32`), matching what a window system reports.
//!
//! # Invariants
//!
//! 1. [`HalfExtents`] are never negative: an icon larger than the display
//!    collapses the corresponding half-extent to zero.
//! 2. [`snap_target`] moves along exactly one axis; the other coordinate of
//!    the returned point equals the input coordinate bit-for-bit.
//! 3. [`CaptureBox::contains`] is strict on every edge.

/// A point in overlay space (center-origin, `+y` down).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// The committed top-level position of an overlay.
pub type OverlayPosition = Point;

impl Point {
    /// The screen center.
    pub const ORIGIN: Self = Self::new(0.0, 0.0);

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// This point shifted by `(dx, dy)`.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Euclidean distance to `other`.
    #[inline]
    #[must_use]
    pub fn distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x as f32, y as f32)
    }
}

/// Display dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenBounds {
    pub width: u32,
    pub height: u32,
}

impl ScreenBounds {
    /// Create new bounds.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// The bottom-center point of the display.
    ///
    /// Uses whole-pixel halving, so odd heights round down.
    #[inline]
    #[must_use]
    pub fn bottom_center(&self) -> Point {
        Point::new(0.0, (self.height / 2) as f32)
    }
}

/// Measured size of the icon view in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayExtent {
    pub width: u32,
    pub height: u32,
}

impl OverlayExtent {
    /// Create a new extent.
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// How far the overlay may travel from the center before touching a wall.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HalfExtents {
    pub half_width: f32,
    pub half_height: f32,
}

impl HalfExtents {
    /// Create half-extents directly.
    #[inline]
    pub const fn new(half_width: f32, half_height: f32) -> Self {
        Self {
            half_width,
            half_height,
        }
    }

    /// Travel range for an icon of `icon` size on a display of `screen` size.
    #[must_use]
    pub fn between(screen: ScreenBounds, icon: OverlayExtent) -> Self {
        Self {
            half_width: (screen.width.saturating_sub(icon.width) / 2) as f32,
            half_height: (screen.height.saturating_sub(icon.height) / 2) as f32,
        }
    }
}

/// Pick the wall-snap destination for `position`.
///
/// The nearer vertical wall is `+half_width` when `x >= 0`, otherwise
/// `-half_width`. The nearer horizontal wall is `+half_height` when `y > 0`,
/// otherwise `-half_height`. Only the axis with the shorter required travel
/// moves; on a tie, y moves.
#[must_use]
pub fn snap_target(position: Point, half: HalfExtents) -> Point {
    let wall_x = if position.x >= 0.0 {
        half.half_width
    } else {
        -half.half_width
    };
    let wall_y = if position.y > 0.0 {
        half.half_height
    } else {
        -half.half_height
    };

    if (position.x - wall_x).abs() < (position.y - wall_y).abs() {
        Point::new(wall_x, position.y)
    } else {
        Point::new(position.x, wall_y)
    }
}

/// An axis-aligned box around a center, used for capture hit tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CaptureBox {
    pub center: Point,
    pub half_width: f32,
    pub half_height: f32,
}

impl CaptureBox {
    /// Create a capture box.
    #[inline]
    pub const fn new(center: Point, half_width: f32, half_height: f32) -> Self {
        Self {
            center,
            half_width,
            half_height,
        }
    }

    /// Check if `point` lies strictly inside the box.
    #[inline]
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (point.x - self.center.x).abs() < self.half_width
            && (point.y - self.center.y).abs() < self.half_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_adds_exactly() {
        let p = Point::new(10.0, -4.5).offset(2.5, 4.5);
        assert_eq!(p, Point::new(12.5, 0.0));
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn half_extents_subtract_icon_then_halve() {
        let half = HalfExtents::between(ScreenBounds::new(1080, 1920), OverlayExtent::new(80, 120));
        assert_eq!(half, HalfExtents::new(500.0, 900.0));
    }

    #[test]
    fn half_extents_round_down_and_saturate() {
        let half = HalfExtents::between(ScreenBounds::new(101, 50), OverlayExtent::new(0, 80));
        assert_eq!(half, HalfExtents::new(50.0, 0.0));
    }

    #[test]
    fn bottom_center_halves_height() {
        assert_eq!(ScreenBounds::new(720, 1281).bottom_center(), Point::new(0.0, 640.0));
    }

    #[test]
    fn snap_moves_horizontally_when_x_travel_is_shorter() {
        // |10 - 500| = 490 < |5 - 800| = 795
        let target = snap_target(Point::new(10.0, 5.0), HalfExtents::new(500.0, 800.0));
        assert_eq!(target, Point::new(500.0, 5.0));
    }

    #[test]
    fn snap_axis_follows_shorter_travel() {
        // |300 - 400| = 100 vs |50 - 800| = 750 -> x moves
        let target = snap_target(Point::new(300.0, 50.0), HalfExtents::new(400.0, 800.0));
        assert_eq!(target, Point::new(400.0, 50.0));

        // |10 - 400| = 390 vs |700 - 800| = 100 -> y moves
        let target = snap_target(Point::new(10.0, 700.0), HalfExtents::new(400.0, 800.0));
        assert_eq!(target, Point::new(10.0, 800.0));
    }

    #[test]
    fn snap_picks_negative_walls() {
        let target = snap_target(Point::new(-350.0, -10.0), HalfExtents::new(400.0, 800.0));
        assert_eq!(target, Point::new(-400.0, -10.0));

        let target = snap_target(Point::new(-10.0, -790.0), HalfExtents::new(400.0, 800.0));
        assert_eq!(target, Point::new(-10.0, -800.0));
    }

    #[test]
    fn snap_at_zero_y_targets_top_wall() {
        let target = snap_target(Point::new(0.0, 0.0), HalfExtents::new(400.0, 300.0));
        assert_eq!(target, Point::new(0.0, -300.0));
    }

    #[test]
    fn snap_tie_moves_y() {
        let target = snap_target(Point::new(0.0, 0.0), HalfExtents::new(300.0, 300.0));
        assert_eq!(target, Point::new(0.0, -300.0));
    }

    #[test]
    fn capture_box_is_strict() {
        let zone = CaptureBox::new(Point::new(0.0, 960.0), 50.0, 250.0);
        assert!(zone.contains(Point::new(0.0, 960.0)));
        assert!(zone.contains(Point::new(-49.9, 711.0)));
        assert!(!zone.contains(Point::new(50.0, 960.0)));
        assert!(!zone.contains(Point::new(0.0, 710.0)));
    }
}
