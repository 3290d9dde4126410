#![forbid(unsafe_code)]

//! Gesture classification: turns raw pointer samples into drag signals.
//!
//! [`GestureClassifier`] is a stateful processor that labels each
//! [`PointerEvent`] as a down, a frame-to-frame move, a release (flagged as a
//! tap when short enough), or a fling.
//!
//! # State Machine
//!
//! ```text
//!   Idle --Down--> Dragging --Move--> Dragging
//!                     |
//!                     +--Up (fast, downward)--> Fling   (fling enabled only)
//!                     +--Up-------------------> Idle    (tap if < tap timeout)
//! ```
//!
//! # Invariants
//!
//! 1. `is_dragging()` is true only between a Down and its matching Up.
//! 2. Move deltas are measured from the previous sample of any kind, not from
//!    the Down point, so summing the deltas of a drag yields its total travel.
//! 3. A Fling replaces the Up signal of that release; the caller never sees
//!    both for the same gesture.
//! 4. With fling disabled the velocity tracker is never fed or consulted.
//!
//! # Failure Modes
//!
//! - Up without a prior Down, or a repeated Up: reported as a non-tap Up.
//! - Samples with identical timestamps: velocity is zero, so no fling.

use std::collections::VecDeque;

use crate::event::{PointerAction, PointerEvent};
use crate::geometry::Point;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Thresholds for tap and fling recognition.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GestureConfig {
    /// A release sooner than this after the press is a tap (default: 200ms).
    pub tap_timeout_ms: i64,
    /// Fling heuristics.
    pub fling: FlingConfig,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_timeout_ms: 200,
            fling: FlingConfig::default(),
        }
    }
}

/// Velocity heuristics for a downward fling.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FlingConfig {
    /// Minimum downward release velocity in px/s (default: 1500).
    pub min_velocity: f32,
    /// Velocities are clamped to ±this in px/s (default: 8000).
    pub max_velocity: f32,
    /// Minimum downward travel from the press point in px (default: 120).
    pub min_distance: f32,
    /// Only samples this recent contribute to the velocity (default: 100ms).
    pub velocity_window_ms: i64,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            min_velocity: 1500.0,
            max_velocity: 8000.0,
            min_distance: 120.0,
            velocity_window_ms: 100,
        }
    }
}

// ---------------------------------------------------------------------------
// Signals
// ---------------------------------------------------------------------------

/// A classified pointer signal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureSignal {
    /// Pointer pressed at a raw position.
    Down { x: f32, y: f32 },
    /// Pointer moved by a delta since the previous sample.
    Move { dx: f32, dy: f32 },
    /// Pointer released. `tap` is set when the press was shorter than the
    /// tap timeout.
    Up { x: f32, y: f32, tap: bool },
    /// Release recognized as a downward fling (px/s).
    Fling { velocity_x: f32, velocity_y: f32 },
}

// ---------------------------------------------------------------------------
// Velocity tracking
// ---------------------------------------------------------------------------

/// Windowed two-point velocity estimate over recent samples.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<(Point, i64)>,
}

impl VelocityTracker {
    /// Create an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(16),
        }
    }

    /// Forget all samples.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Record a sample, dropping any more than `window_ms` older than it.
    pub fn push(&mut self, point: Point, timestamp_ms: i64, window_ms: i64) {
        self.samples.push_back((point, timestamp_ms));
        while let Some(&(_, t)) = self.samples.front() {
            if timestamp_ms.saturating_sub(t) > window_ms {
                self.samples.pop_front();
            } else {
                break;
            }
        }
    }

    /// Velocity in px/s between the oldest and newest retained samples,
    /// clamped to `±max`. Zero with fewer than two samples or no elapsed time.
    #[must_use]
    pub fn velocity(&self, max: f32) -> (f32, f32) {
        let (Some(&(first, t0)), Some(&(last, t1))) = (self.samples.front(), self.samples.back())
        else {
            return (0.0, 0.0);
        };
        let dt_ms = t1.saturating_sub(t0);
        if dt_ms <= 0 {
            return (0.0, 0.0);
        }
        let dt_ms = dt_ms as f32;
        (
            ((last.x - first.x) * 1000.0 / dt_ms).clamp(-max, max),
            ((last.y - first.y) * 1000.0 / dt_ms).clamp(-max, max),
        )
    }
}

// ---------------------------------------------------------------------------
// GestureClassifier
// ---------------------------------------------------------------------------

/// Stateful classifier for single-pointer overlay gestures.
///
/// Call [`process`](GestureClassifier::process) for each pointer event in
/// delivery order.
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: GestureConfig,
    fling_enabled: bool,
    dragging: bool,
    touch_down_ms: Option<i64>,
    down_pos: Point,
    last_pos: Point,
    velocity: VelocityTracker,
}

impl GestureClassifier {
    /// Create a classifier. With `fling_enabled == false` it never emits
    /// [`GestureSignal::Fling`].
    #[must_use]
    pub fn new(config: GestureConfig, fling_enabled: bool) -> Self {
        Self {
            config,
            fling_enabled,
            dragging: false,
            touch_down_ms: None,
            down_pos: Point::ORIGIN,
            last_pos: Point::ORIGIN,
            velocity: VelocityTracker::new(),
        }
    }

    /// Classify one pointer event.
    ///
    /// Returns `None` for moves outside a drag.
    pub fn process(&mut self, event: &PointerEvent) -> Option<GestureSignal> {
        let pos = event.raw();

        if self.fling_enabled
            && let Some(fling) = self.detect_fling(event)
        {
            return Some(fling);
        }

        let signal = match event.action {
            PointerAction::Down => {
                self.touch_down_ms = Some(event.timestamp_ms);
                self.down_pos = pos;
                self.dragging = true;
                Some(GestureSignal::Down { x: pos.x, y: pos.y })
            }
            PointerAction::Up => {
                let tap = self.touch_down_ms.take().is_some_and(|down| {
                    event.timestamp_ms.saturating_sub(down) < self.config.tap_timeout_ms
                });
                self.dragging = false;
                #[cfg(feature = "tracing")]
                {
                    if tap {
                        tracing::trace!(target: "magnet.gesture", x = pos.x, y = pos.y, "tap");
                    }
                }
                Some(GestureSignal::Up {
                    x: pos.x,
                    y: pos.y,
                    tap,
                })
            }
            PointerAction::Move => self.dragging.then(|| GestureSignal::Move {
                dx: pos.x - self.last_pos.x,
                dy: pos.y - self.last_pos.y,
            }),
        };

        self.last_pos = pos;
        signal
    }

    /// Whether a press is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Timestamp of the press in progress, if any.
    #[inline]
    #[must_use]
    pub fn touch_down_ms(&self) -> Option<i64> {
        self.touch_down_ms
    }

    /// Whether fling recognition is active.
    #[inline]
    #[must_use]
    pub fn fling_enabled(&self) -> bool {
        self.fling_enabled
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Reset all gesture state to idle.
    pub fn reset(&mut self) {
        self.dragging = false;
        self.touch_down_ms = None;
        self.velocity.clear();
    }

    fn detect_fling(&mut self, event: &PointerEvent) -> Option<GestureSignal> {
        let fling = &self.config.fling;
        let pos = event.raw();
        match event.action {
            PointerAction::Down => {
                self.velocity.clear();
                self.velocity
                    .push(pos, event.timestamp_ms, fling.velocity_window_ms);
                None
            }
            PointerAction::Move => {
                self.velocity
                    .push(pos, event.timestamp_ms, fling.velocity_window_ms);
                None
            }
            PointerAction::Up => {
                if !self.dragging {
                    return None;
                }
                self.velocity
                    .push(pos, event.timestamp_ms, fling.velocity_window_ms);
                let (velocity_x, velocity_y) = self.velocity.velocity(fling.max_velocity);
                let travel = pos.y - self.down_pos.y;
                if velocity_y < fling.min_velocity || travel < fling.min_distance {
                    return None;
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    target: "magnet.gesture",
                    velocity_x,
                    velocity_y,
                    travel,
                    "fling recognized"
                );
                self.dragging = false;
                self.touch_down_ms = None;
                self.velocity.clear();
                self.last_pos = pos;
                Some(GestureSignal::Fling {
                    velocity_x,
                    velocity_y,
                })
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
