#![forbid(unsafe_code)]

//! The window-layer seam.
//!
//! A magnet never reaches for ambient window state. The host injects a
//! [`WindowSurface`] at build time; the magnet drives it to add, move, and
//! remove the overlay, and drops it on destroy.
//!
//! All calls are synchronous and happen on the thread that owns the magnet.

use magnet_core::{OverlayExtent, OverlayPosition, ScreenBounds};

use crate::error::WindowError;

/// Opaque identifier of a host view (the icon, usually).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewId(pub u64);

/// Opaque handle to an overlay the window layer accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub u64);

/// Layout requested when the overlay is first added.
///
/// The overlay floats above all content, sizes itself to its view, is
/// centered-gravity (so [`OverlayPosition`] is an offset from the screen
/// center), and never takes input focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayLayout {
    pub position: OverlayPosition,
    pub focusable: bool,
}

impl OverlayLayout {
    /// A non-focusable floating layout at `position`.
    #[must_use]
    pub const fn floating_at(position: OverlayPosition) -> Self {
        Self {
            position,
            focusable: false,
        }
    }
}

/// Host window system operations a magnet needs.
pub trait WindowSurface {
    /// Add `view` as an overlay. May be refused (e.g. no draw-over permission).
    fn add_overlay(
        &mut self,
        view: ViewId,
        layout: OverlayLayout,
    ) -> Result<SurfaceHandle, WindowError>;

    /// Move an accepted overlay.
    fn update_overlay_layout(&mut self, handle: SurfaceHandle, position: OverlayPosition);

    /// Remove an accepted overlay.
    fn remove_overlay(&mut self, handle: SurfaceHandle);

    /// Current display size.
    fn display_metrics(&self) -> ScreenBounds;

    /// Measured size of `view`.
    fn measure_view(&self, view: ViewId) -> OverlayExtent;

    /// Whether the overlay is still attached to the window layer.
    fn is_attached(&self, handle: SurfaceHandle) -> bool;
}
