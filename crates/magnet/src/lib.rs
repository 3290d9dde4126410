#![forbid(unsafe_code)]

//! Magnet: a draggable overlay icon that snaps to screen walls and can be
//! flung away.
//!
//! # Role
//! `magnet` is the orchestration layer. It combines the primitives of
//! `magnet-core` (gesture classification, easing animation, geometry) with
//! host-supplied window and presentation seams:
//!
//! - [`WindowSurface`]: adds, moves, and removes the overlay.
//! - [`RemovalView`]: draws the dismissal target.
//! - [`IconCallback`]: receives click, move, and dismissal notifications.
//!
//! # Threading
//! A [`Magnet`] is confined to the thread that owns the host UI. It is not
//! `Send`: pointer events and frame ticks must be delivered on that thread.
//!
//! # Driving a magnet
//!
//! ```ignore
//! let mut magnet = MagnetBuilder::new(surface).icon_view(icon).build()?;
//! magnet.show();
//! // on every pointer event:
//! magnet.on_pointer_event(&event);
//! // on every display refresh:
//! while magnet.has_pending_frame() { magnet.run_frame(); /* wait vsync */ }
//! ```

pub mod builder;
pub mod callback;
pub mod config;
pub mod controller;
pub mod error;
pub mod removal_zone;
pub mod scheduler;
pub mod window;

pub use builder::MagnetBuilder;
pub use callback::IconCallback;
pub use config::{MagnetConfig, RemovalZoneConfig};
pub use controller::{Lifecycle, Magnet};
pub use error::{ConfigError, DegradationAction, LifecycleError, MagnetError, Result, WindowError};
pub use removal_zone::{
    NullRemovalView, Proximity, RemovalView, RemovalZone, RemovalZoneStyle, ResourceId,
};
pub use scheduler::FrameScheduler;
pub use window::{OverlayLayout, SurfaceHandle, ViewId, WindowSurface};

pub use magnet_core::{
    AnimationConfig, AnimatorStats, Clock, FlingConfig, GestureConfig, ManualClock, OverlayExtent,
    OverlayPosition, Point, PointerAction, PointerEvent, ScreenBounds, SystemClock,
};
