#![forbid(unsafe_code)]

//! A fully wired magnet on a recording phone-sized display.
//!
//! The fixture owns a [`ManualClock`] shared with the magnet. Feeding events
//! moves the clock forward to each event's timestamp; pumping frames advances
//! it by one frame period per frame.

use magnet::{Clock as _, Magnet, MagnetBuilder, ManualClock, PointerEvent, ViewId};

use crate::doubles::{
    CallbackLog, RecordingCallback, RecordingRemovalView, RecordingSurface, RemovalProbe,
    SurfaceProbe,
};

/// Frame period used by [`Fixture::settle`] (~60 Hz).
pub const FRAME_MS: i64 = 16;

/// Upper bound on frames pumped by [`Fixture::settle`].
pub const MAX_SETTLE_FRAMES: usize = 240;

/// The icon view every fixture magnet floats.
pub const ICON: ViewId = ViewId(7);

/// A magnet plus probes into every seam.
#[derive(Debug)]
pub struct Fixture {
    pub magnet: Magnet,
    pub clock: ManualClock,
    pub surface: SurfaceProbe,
    pub removal: RemovalProbe,
    pub log: CallbackLog,
}

impl Fixture {
    /// Default options on a 1080 × 1920 display with a 100 × 100 icon.
    #[must_use]
    pub fn phone() -> Self {
        Self::phone_with(|builder| builder)
    }

    /// Like [`phone`](Self::phone), with extra builder options.
    ///
    /// # Panics
    ///
    /// If the configured builder fails to build.
    #[must_use]
    pub fn phone_with(configure: impl FnOnce(MagnetBuilder) -> MagnetBuilder) -> Self {
        let (surface, surface_probe) = RecordingSurface::phone();
        Self::with_surface(surface, surface_probe, configure)
    }

    /// Wire a magnet around an explicit surface.
    ///
    /// # Panics
    ///
    /// If the configured builder fails to build.
    #[must_use]
    pub fn with_surface(
        surface: RecordingSurface,
        surface_probe: SurfaceProbe,
        configure: impl FnOnce(MagnetBuilder) -> MagnetBuilder,
    ) -> Self {
        let clock = ManualClock::new(0);
        let (removal_view, removal) = RecordingRemovalView::new();
        let (callback, log) = RecordingCallback::new();
        let builder = MagnetBuilder::new(surface)
            .icon_view(ICON)
            .clock(clock.clone())
            .removal_view(removal_view)
            .icon_callback(callback);
        let magnet = match configure(builder).build() {
            Ok(magnet) => magnet,
            Err(err) => panic!("fixture magnet failed to build: {err}"),
        };
        Self {
            magnet,
            clock,
            surface: surface_probe,
            removal,
            log,
        }
    }

    /// Show the magnet and run its placement animation to completion.
    /// Returns frames run.
    pub fn show_settled(&mut self) -> usize {
        self.magnet.show();
        self.settle()
    }

    /// Current fixture time.
    #[must_use]
    pub fn now_ms(&self) -> i64 {
        self.clock.now_ms()
    }

    /// Deliver `events` in order, moving the clock to each timestamp.
    pub fn feed(&mut self, events: &[PointerEvent]) {
        for event in events {
            if event.timestamp_ms > self.clock.now_ms() {
                self.clock.set(event.timestamp_ms);
            }
            self.magnet.on_pointer_event(event);
        }
    }

    /// Advance one frame period and run the frame. Returns applied ticks.
    pub fn frame(&mut self) -> usize {
        self.clock.advance(FRAME_MS);
        self.magnet.run_frame()
    }

    /// Pump frames until no work is pending. Returns frames run.
    pub fn settle(&mut self) -> usize {
        let mut frames = 0;
        while self.magnet.has_pending_frame() && frames < MAX_SETTLE_FRAMES {
            self.frame();
            frames += 1;
        }
        frames
    }
}
