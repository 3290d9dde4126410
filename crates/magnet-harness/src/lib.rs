#![forbid(unsafe_code)]

//! Headless harness for Magnet.
//!
//! - [`doubles`]: recording window surface, removal view, and listener.
//! - [`script`]: fluent builders for timestamped pointer gestures.
//! - [`fixture`]: a magnet wired to the doubles on a phone-sized display,
//!   driven by a manual clock.
//! - [`replay`]: canned scenarios with JSON reports, used by the
//!   `magnet-harness` binary.

pub mod doubles;
pub mod fixture;
pub mod replay;
pub mod script;

pub use doubles::{
    CallbackLog, IconEvent, RecordingCallback, RecordingRemovalView, RecordingSurface,
    RemovalCall, RemovalProbe, SurfaceCall, SurfaceProbe,
};
pub use fixture::{FRAME_MS, Fixture, ICON};
pub use replay::{ReplayReport, Scenario};
