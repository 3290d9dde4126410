#![forbid(unsafe_code)]

//! Position animation primitives.
//!
//! The overlay moves toward its destination with a time-boxed ease: every
//! tick closes a `progress` fraction of the *remaining* gap, where `progress`
//! grows linearly from 0 to 1 over the animation window. Because the gap
//! shrinks as the overlay moves, the motion decelerates on approach and lands
//! exactly on the target at `progress == 1`.
//!
//! [`PositionAnimator`] owns the single animation of an overlay and hands out
//! generation-stamped [`TickToken`]s. Whoever schedules the ticks presents the
//! token back on every firing; a token from a superseded or stopped animation
//! is rejected, so a stale tick can never apply its delta.

mod position;

pub use position::{AnimationStep, AnimationTask, AnimatorStats, PositionAnimator, TickToken};

use crate::geometry::Point;

/// Timing for position animations.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnimationConfig {
    /// Length of the easing window (default: 400ms).
    pub duration_ms: i64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { duration_ms: 400 }
    }
}

/// Fraction of the window elapsed at `now_ms`, clamped to `[0.0, 1.0]`.
///
/// A non-positive duration is treated as already elapsed.
#[must_use]
pub fn progress(start_ms: i64, now_ms: i64, duration_ms: i64) -> f32 {
    if duration_ms <= 0 {
        return 1.0;
    }
    let elapsed = (now_ms - start_ms).max(0) as f32;
    (elapsed / duration_ms as f32).min(1.0)
}

/// One step of the ease recurrence: `(target - current) * progress`.
#[inline]
#[must_use]
pub fn ease_delta(current: Point, target: Point, progress: f32) -> (f32, f32) {
    (
        (target.x - current.x) * progress,
        (target.y - current.y) * progress,
    )
}
