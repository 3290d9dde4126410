#![forbid(unsafe_code)]

//! Listener notifications.

use crate::window::ViewId;

/// Receives magnet notifications. Every method defaults to a no-op.
pub trait IconCallback {
    /// The icon was tapped; `x`/`y` are the raw release coordinates.
    fn on_icon_click(&mut self, _view: ViewId, _x: f32, _y: f32) {}

    /// A position change was committed (drag, animation, or `set_position`).
    fn on_move(&mut self, _x: f32, _y: f32) {}

    /// Dismissal started. Fired once, before destruction.
    fn on_fling_away(&mut self) {}

    /// The magnet was destroyed. Fired once.
    fn on_icon_destroyed(&mut self) {}
}
