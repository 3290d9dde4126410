#![forbid(unsafe_code)]

//! Canonical pointer event types.
//!
//! A host window system translates its native touch or mouse callbacks into
//! [`PointerEvent`] values. Coordinates are raw screen coordinates of the
//! pointer (not overlay-relative); only their frame-to-frame differences
//! matter to the drag path, so the host may use any consistent origin.
//!
//! # Design Notes
//!
//! - Timestamps are milliseconds on the host's monotonic clock.
//! - Only a single pointer is modelled; secondary pointers are the host's
//!   concern and should not be forwarded.

use crate::geometry::Point;

/// What happened to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerAction {
    /// Pointer pressed on the overlay.
    Down,
    /// Pointer moved while pressed.
    Move,
    /// Pointer released.
    Up,
}

/// A single raw pointer sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// The kind of pointer transition.
    pub action: PointerAction,
    /// Raw screen X of the pointer.
    pub raw_x: f32,
    /// Raw screen Y of the pointer.
    pub raw_y: f32,
    /// Host timestamp in milliseconds.
    pub timestamp_ms: i64,
}

impl PointerEvent {
    /// Create a new pointer event.
    #[inline]
    pub const fn new(action: PointerAction, raw_x: f32, raw_y: f32, timestamp_ms: i64) -> Self {
        Self {
            action,
            raw_x,
            raw_y,
            timestamp_ms,
        }
    }

    /// Shorthand for a [`PointerAction::Down`] event.
    #[inline]
    pub const fn down(raw_x: f32, raw_y: f32, timestamp_ms: i64) -> Self {
        Self::new(PointerAction::Down, raw_x, raw_y, timestamp_ms)
    }

    /// Shorthand for a [`PointerAction::Move`] event.
    #[inline]
    pub const fn moved(raw_x: f32, raw_y: f32, timestamp_ms: i64) -> Self {
        Self::new(PointerAction::Move, raw_x, raw_y, timestamp_ms)
    }

    /// Shorthand for a [`PointerAction::Up`] event.
    #[inline]
    pub const fn up(raw_x: f32, raw_y: f32, timestamp_ms: i64) -> Self {
        Self::new(PointerAction::Up, raw_x, raw_y, timestamp_ms)
    }

    /// The raw pointer location as a point.
    #[inline]
    #[must_use]
    pub fn raw(&self) -> Point {
        Point::new(self.raw_x, self.raw_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shorthands_set_action() {
        assert_eq!(PointerEvent::down(1.0, 2.0, 3).action, PointerAction::Down);
        assert_eq!(PointerEvent::moved(1.0, 2.0, 3).action, PointerAction::Move);
        assert_eq!(PointerEvent::up(1.0, 2.0, 3).action, PointerAction::Up);
    }

    #[test]
    fn raw_point_matches_fields() {
        let ev = PointerEvent::moved(12.5, -3.0, 40);
        assert_eq!(ev.raw(), Point::new(12.5, -3.0));
        assert_eq!(ev.timestamp_ms, 40);
    }
}
