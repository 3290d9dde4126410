#![forbid(unsafe_code)]

//! Core: geometry, pointer gestures, and easing animation for Magnet overlays.
//!
//! # Role in Magnet
//! `magnet-core` holds the host-independent pieces. It knows nothing about
//! window systems: it classifies pointer samples, computes wall-snap and
//! capture geometry, and produces easing deltas for generation-stamped ticks.
//!
//! # Primary responsibilities
//! - **Geometry**: center-origin points, half-extents, wall-snap targets,
//!   capture boxes.
//! - **PointerEvent**: canonical single-pointer input.
//! - **GestureClassifier**: down / move / up (tap) / fling signals.
//! - **PositionAnimator**: the 400ms ease with supersedable ticks.
//! - **Clock**: millisecond time for animation ticks.
//!
//! # How it fits in the system
//! The `magnet` crate owns a classifier and an animator per overlay, feeds
//! the classifier host events, and applies animator steps through its move
//! path.

pub mod animation;
pub mod clock;
pub mod event;
pub mod geometry;
pub mod gesture;

pub use animation::{AnimationConfig, AnimatorStats, PositionAnimator, TickToken};
pub use clock::{Clock, ManualClock, SystemClock};
pub use event::{PointerAction, PointerEvent};
pub use geometry::{
    CaptureBox, HalfExtents, OverlayExtent, OverlayPosition, Point, ScreenBounds, snap_target,
};
pub use gesture::{FlingConfig, GestureClassifier, GestureConfig, GestureSignal, VelocityTracker};
