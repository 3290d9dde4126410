#![forbid(unsafe_code)]

//! The magnet controller.
//!
//! [`Magnet`] owns everything about one overlay icon: its committed position,
//! the gesture classifier, the position animator, the removal zone, and the
//! injected window surface. The host forwards pointer events to
//! [`Magnet::on_pointer_event`] and calls [`Magnet::run_frame`] once per
//! display refresh while [`Magnet::has_pending_frame`] is true.
//!
//! # Lifecycle
//!
//! ```text
//! Created ──show()──▶ Attached ──destroy() / dismissal──▶ Destroyed
//!    │                                                        ▲
//!    └──show() refused──▶ Refused ─────────destroy()──────────┘
//! ```
//!
//! # Invariants
//!
//! 1. Every position change goes through one commit path: the window layer
//!    is updated, then the listener is notified.
//! 2. At most one animation is in flight. Ticks from a superseded or stopped
//!    animation never apply a delta.
//! 3. A tick that fires after the overlay left the window layer stops the
//!    animation and is dropped.
//! 4. The removal zone is visible only during a press with fling-away on.
//!
//! # Failure Modes
//!
//! - **Overlay refused**: the magnet enters `Refused`; every later call is a
//!   no-op and [`Magnet::refusal`] reports why.
//! - **Use before `show()`**: [`Magnet::set_position`] returns
//!   [`LifecycleError::NotShown`]; other calls are ignored.
//! - **Use after destroy**: every call is a no-op. `on_icon_destroyed` fires
//!   exactly once.
//!
//! # Automatic dismissal
//!
//! Any committed move that is not part of a press and lands strictly inside
//! the capture box around the bottom-center dismisses the magnet. This
//! includes animated moves, so a wall snap or `set_position(.., true)` whose
//! path crosses the box ends in dismissal.

use magnet_core::{
    AnimatorStats, Clock, GestureClassifier, GestureSignal, HalfExtents, OverlayExtent,
    OverlayPosition, Point, PointerEvent, PositionAnimator, ScreenBounds, TickToken, snap_target,
};
use tracing::{debug, debug_span, trace, warn};

use crate::callback::IconCallback;
use crate::config::MagnetConfig;
use crate::error::{LifecycleError, Result, WindowError};
use crate::removal_zone::RemovalZone;
use crate::scheduler::FrameScheduler;
use crate::window::{OverlayLayout, SurfaceHandle, ViewId, WindowSurface};

/// Where a magnet is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Built, not yet shown.
    Created,
    /// Hosted by the window layer.
    Attached(SurfaceHandle),
    /// The window layer refused the overlay.
    Refused,
    /// Torn down; terminal.
    Destroyed,
}

/// A draggable, wall-snapping overlay icon.
///
/// Built with [`MagnetBuilder`](crate::MagnetBuilder). Confined to the thread
/// that owns the host UI.
pub struct Magnet {
    config: MagnetConfig,
    icon_view: ViewId,
    window: Option<Box<dyn WindowSurface>>,
    callback: Option<Box<dyn IconCallback>>,
    clock: Box<dyn Clock>,
    removal_zone: RemovalZone,
    classifier: GestureClassifier,
    animator: PositionAnimator,
    frames: FrameScheduler<TickToken>,
    position: OverlayPosition,
    bounds: ScreenBounds,
    extent: OverlayExtent,
    half: HalfExtents,
    lifecycle: Lifecycle,
    refusal: Option<WindowError>,
}

impl Magnet {
    pub(crate) fn new(
        config: MagnetConfig,
        icon_view: ViewId,
        window: Box<dyn WindowSurface>,
        callback: Option<Box<dyn IconCallback>>,
        clock: Box<dyn Clock>,
        removal_zone: RemovalZone,
    ) -> Self {
        let classifier = GestureClassifier::new(config.gesture.clone(), config.fling_away);
        let animator = PositionAnimator::new(config.animation.clone());
        Self {
            config,
            icon_view,
            window: Some(window),
            callback,
            clock,
            removal_zone,
            classifier,
            animator,
            frames: FrameScheduler::new(),
            position: Point::ORIGIN,
            bounds: ScreenBounds::default(),
            extent: OverlayExtent::default(),
            half: HalfExtents::default(),
            lifecycle: Lifecycle::Created,
            refusal: None,
        }
    }

    // -----------------------------------------------------------------------
    // Lifecycle
    // -----------------------------------------------------------------------

    /// Add the icon to the window layer and move it to its first spot.
    ///
    /// A refused overlay is not reported as an error: the magnet degrades to
    /// a silent no-op. Calling `show()` again has no effect.
    pub fn show(&mut self) {
        if self.lifecycle != Lifecycle::Created {
            return;
        }
        let _span = debug_span!("magnet.show", view = self.icon_view.0).entered();
        let Some(window) = self.window.as_mut() else {
            return;
        };

        match window.add_overlay(self.icon_view, OverlayLayout::floating_at(self.position)) {
            Ok(handle) => {
                self.lifecycle = Lifecycle::Attached(handle);
                debug!(target: "magnet.controller", handle = handle.0, "overlay attached");
            }
            Err(err) => {
                warn!(target: "magnet.controller", error = %err, "overlay refused; magnet stays hidden");
                self.lifecycle = Lifecycle::Refused;
                self.refusal = Some(err);
                return;
            }
        }

        self.update_size();
        match self.config.initial_position {
            Some(initial) => self.animate_to(initial.into()),
            None => self.go_to_wall(),
        }
    }

    /// Remove the icon and release everything the magnet holds.
    ///
    /// Fires `on_icon_destroyed` once; later calls do nothing.
    pub fn destroy(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        let _span = debug_span!("magnet.destroy").entered();

        self.animator.stop();
        if let (Lifecycle::Attached(handle), Some(window)) = (self.lifecycle, self.window.as_mut())
        {
            window.remove_overlay(handle);
        }
        self.removal_zone.destroy();
        self.classifier.reset();
        self.lifecycle = Lifecycle::Destroyed;
        self.window = None;
        debug!(target: "magnet.controller", "magnet destroyed");

        if let Some(mut callback) = self.callback.take() {
            callback.on_icon_destroyed();
        }
    }

    /// Dismiss the icon: aim at the bottom-center, notify, then destroy.
    ///
    /// Does nothing unless fling-away is enabled. The dismissal animation is
    /// started before destruction, so its ticks fire against a detached
    /// overlay and are dropped.
    pub fn fling_away(&mut self) {
        if !self.config.fling_away || self.surface().is_none() {
            return;
        }
        let _span = debug_span!("magnet.fling_away").entered();

        let target = self.bounds.bottom_center();
        self.animate_to(target);
        if let Some(callback) = self.callback.as_mut() {
            callback.on_fling_away();
        }
        self.destroy();
    }

    // -----------------------------------------------------------------------
    // Input
    // -----------------------------------------------------------------------

    /// Handle one pointer event. Returns whether the event was consumed.
    ///
    /// Events are ignored unless the overlay is attached.
    pub fn on_pointer_event(&mut self, event: &PointerEvent) -> bool {
        if self.surface().is_none() {
            return false;
        }
        let Some(signal) = self.classifier.process(event) else {
            return true;
        };

        match signal {
            GestureSignal::Fling { .. } => self.fling_away(),
            GestureSignal::Down { .. } => {
                if self.config.fling_away {
                    self.removal_zone.show();
                }
                self.cancel_animation();
                self.update_size();
            }
            GestureSignal::Move { dx, dy } => self.move_by(dx, dy),
            GestureSignal::Up { x, y, tap } => {
                if tap && let Some(callback) = self.callback.as_mut() {
                    callback.on_icon_click(self.icon_view, x, y);
                }
                if self.config.fling_away {
                    self.removal_zone.hide();
                }
                self.go_to_wall();
            }
        }
        true
    }

    // -----------------------------------------------------------------------
    // Motion
    // -----------------------------------------------------------------------

    /// Shift the icon by `(dx, dy)` and commit.
    ///
    /// Outside a press, landing inside the capture box dismisses the magnet.
    pub fn move_by(&mut self, dx: f32, dy: f32) {
        if self.surface().is_none() {
            return;
        }
        self.position = self.position.offset(dx, dy);
        if self.removal_zone.is_visible() {
            self.removal_zone.on_move(self.position);
        }
        self.commit();

        if self.config.fling_away
            && !self.classifier.is_dragging()
            && self.removal_zone.hit_test(self.position)
        {
            debug!(
                target: "magnet.controller",
                x = self.position.x,
                y = self.position.y,
                "entered capture zone"
            );
            self.fling_away();
        }
    }

    /// Animate to the nearer wall along the axis needing less travel.
    ///
    /// Does nothing when wall-sticking is off.
    pub fn go_to_wall(&mut self) {
        if !self.config.stick_to_wall || self.surface().is_none() {
            return;
        }
        let target = snap_target(self.position, self.half);
        self.animate_to(target);
    }

    /// Place the icon, optionally animating there.
    ///
    /// Must follow [`show`](Self::show). On a refused or destroyed magnet
    /// this is a no-op.
    pub fn set_position(&mut self, position: impl Into<Point>, animate: bool) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Created => return Err(LifecycleError::NotShown.into()),
            Lifecycle::Refused | Lifecycle::Destroyed => return Ok(()),
            Lifecycle::Attached(_) => {}
        }
        let position = position.into();
        if animate {
            self.animate_to(position);
        } else {
            self.position = position;
            self.commit();
        }
        Ok(())
    }

    /// Recompute display-derived geometry and re-snap to a wall.
    ///
    /// Call after a rotation or any other display change.
    pub fn on_display_changed(&mut self) {
        if self.surface().is_none() {
            return;
        }
        self.update_size();
        debug!(
            target: "magnet.controller",
            width = self.bounds.width,
            height = self.bounds.height,
            "display changed"
        );
        if !self.classifier.is_dragging() {
            self.go_to_wall();
        }
    }

    // -----------------------------------------------------------------------
    // Frame pump
    // -----------------------------------------------------------------------

    /// Run the animation ticks due this frame. Returns how many moved the icon.
    ///
    /// Ticks re-armed while running wait for the next call.
    pub fn run_frame(&mut self) -> usize {
        let mut applied = 0;
        for token in self.frames.take_frame() {
            if self.surface().is_none() {
                self.animator.stop();
                self.animator.note_dropped();
                trace!(target: "magnet.animator", generation = token.generation(), "tick dropped: overlay detached");
                continue;
            }
            let now = self.clock.now_ms();
            let Some(step) = self.animator.step(token, self.position, now) else {
                continue;
            };
            self.move_by(step.dx, step.dy);
            applied += 1;
            if step.finished {
                trace!(target: "magnet.animator", generation = token.generation(), "animation completed");
            } else if self.animator.is_current(token) {
                self.frames.post(token);
            }
        }
        applied
    }

    /// Whether [`run_frame`](Self::run_frame) has work queued.
    #[inline]
    #[must_use]
    pub fn has_pending_frame(&self) -> bool {
        self.frames.has_pending()
    }

    // -----------------------------------------------------------------------
    // Readback
    // -----------------------------------------------------------------------

    /// Committed position (center-origin).
    #[inline]
    #[must_use]
    pub fn position(&self) -> OverlayPosition {
        self.position
    }

    /// Display size as of the last refresh.
    #[inline]
    #[must_use]
    pub fn screen_bounds(&self) -> ScreenBounds {
        self.bounds
    }

    /// Wall distances as of the last refresh.
    #[inline]
    #[must_use]
    pub fn half_extents(&self) -> HalfExtents {
        self.half
    }

    /// Whether the overlay is currently hosted by the window layer.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.surface().is_some()
    }

    /// Whether [`destroy`](Self::destroy) has run.
    #[inline]
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    /// Whether a press is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.classifier.is_dragging()
    }

    /// Current lifecycle phase.
    #[inline]
    #[must_use]
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Why the window layer refused the overlay, if it did.
    #[inline]
    #[must_use]
    pub fn refusal(&self) -> Option<&WindowError> {
        self.refusal.as_ref()
    }

    /// Animation counters.
    #[inline]
    #[must_use]
    pub fn animator_stats(&self) -> AnimatorStats {
        self.animator.stats()
    }

    /// Whether an animation is in flight.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
    }

    /// The removal zone.
    #[inline]
    #[must_use]
    pub fn removal_zone(&self) -> &RemovalZone {
        &self.removal_zone
    }

    /// The icon view this magnet positions.
    #[inline]
    #[must_use]
    pub fn icon_view(&self) -> ViewId {
        self.icon_view
    }

    /// Get a reference to the configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MagnetConfig {
        &self.config
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn surface(&self) -> Option<SurfaceHandle> {
        match (self.lifecycle, self.window.as_ref()) {
            (Lifecycle::Attached(handle), Some(window)) if window.is_attached(handle) => {
                Some(handle)
            }
            _ => None,
        }
    }

    fn commit(&mut self) {
        let Some(handle) = self.surface() else {
            return;
        };
        if let Some(window) = self.window.as_mut() {
            window.update_overlay_layout(handle, self.position);
        }
        trace!(
            target: "magnet.controller",
            x = self.position.x,
            y = self.position.y,
            "position committed"
        );
        if let Some(callback) = self.callback.as_mut() {
            callback.on_move(self.position.x, self.position.y);
        }
    }

    fn animate_to(&mut self, target: Point) {
        let token = self.animator.start(target, self.clock.now_ms());
        self.frames.clear();
        self.frames.post(token);
        trace!(
            target: "magnet.animator",
            generation = token.generation(),
            x = target.x,
            y = target.y,
            "animation armed"
        );
    }

    fn cancel_animation(&mut self) {
        self.animator.stop();
        self.frames.clear();
    }

    fn update_size(&mut self) {
        let Some(window) = self.window.as_ref() else {
            return;
        };
        self.bounds = window.display_metrics();
        self.extent = window.measure_view(self.icon_view);
        self.half = HalfExtents::between(self.bounds, self.extent);
        self.removal_zone.set_anchor(self.bounds.bottom_center());
    }
}

impl std::fmt::Debug for Magnet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Magnet")
            .field("icon_view", &self.icon_view)
            .field("lifecycle", &self.lifecycle)
            .field("position", &self.position)
            .field("bounds", &self.bounds)
            .field("extent", &self.extent)
            .field("dragging", &self.classifier.is_dragging())
            .field("animating", &self.animator.is_active())
            .field("removal_zone", &self.removal_zone)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MagnetBuilder;
    use magnet_core::ManualClock;
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::sync::{Arc, Mutex};
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::registry::LookupSpan;

    // Minimal window double: 1080x1920 display, 100x100 icon.
    #[derive(Clone, Default)]
    struct Surface {
        refuse: bool,
        layouts: Rc<RefCell<Vec<Point>>>,
    }

    impl WindowSurface for Surface {
        fn add_overlay(
            &mut self,
            _view: ViewId,
            _layout: OverlayLayout,
        ) -> std::result::Result<SurfaceHandle, WindowError> {
            if self.refuse {
                Err(WindowError::PermissionDenied)
            } else {
                Ok(SurfaceHandle(1))
            }
        }
        fn update_overlay_layout(&mut self, _handle: SurfaceHandle, position: OverlayPosition) {
            self.layouts.borrow_mut().push(position);
        }
        fn remove_overlay(&mut self, _handle: SurfaceHandle) {}
        fn display_metrics(&self) -> ScreenBounds {
            ScreenBounds::new(1080, 1920)
        }
        fn measure_view(&self, _view: ViewId) -> OverlayExtent {
            OverlayExtent::new(100, 100)
        }
        fn is_attached(&self, _handle: SurfaceHandle) -> bool {
            true
        }
    }

    fn magnet(surface: Surface, clock: &ManualClock) -> Magnet {
        MagnetBuilder::new(surface)
            .icon_view(ViewId(9))
            .clock(clock.clone())
            .build()
            .unwrap()
    }

    fn pump(magnet: &mut Magnet, clock: &ManualClock) {
        for _ in 0..40 {
            if !magnet.has_pending_frame() {
                break;
            }
            clock.advance(16);
            magnet.run_frame();
        }
    }

    #[test]
    fn show_snaps_to_nearest_wall() {
        let clock = ManualClock::new(0);
        let mut magnet = magnet(Surface::default(), &clock);
        magnet.show();
        assert!(magnet.is_attached());
        assert_eq!(magnet.half_extents(), HalfExtents::new(490.0, 910.0));
        pump(&mut magnet, &clock);
        // From the center, x travel (490) beats y travel (910).
        assert_eq!(magnet.position(), Point::new(490.0, 0.0));
        assert!(!magnet.is_animating());
    }

    #[test]
    fn set_position_before_show_is_rejected() {
        let clock = ManualClock::new(0);
        let mut magnet = magnet(Surface::default(), &clock);
        let err = magnet.set_position((10, 10), false).unwrap_err();
        assert_eq!(err.degradation(), crate::DegradationAction::Ignore);
    }

    #[test]
    fn direct_set_position_commits_once() {
        let clock = ManualClock::new(0);
        let surface = Surface::default();
        let layouts = surface.layouts.clone();
        let mut magnet = magnet(surface, &clock);
        magnet.show();
        pump(&mut magnet, &clock);
        layouts.borrow_mut().clear();

        magnet.set_position((-300, 120), false).unwrap();
        assert_eq!(magnet.position(), Point::new(-300.0, 120.0));
        assert_eq!(*layouts.borrow(), vec![Point::new(-300.0, 120.0)]);
    }

    #[test]
    fn refused_overlay_degrades_to_no_op() {
        let clock = ManualClock::new(0);
        let surface = Surface {
            refuse: true,
            ..Surface::default()
        };
        let layouts = surface.layouts.clone();
        let mut magnet = magnet(surface, &clock);
        magnet.show();
        assert_eq!(magnet.lifecycle(), Lifecycle::Refused);
        assert_eq!(magnet.refusal(), Some(&WindowError::PermissionDenied));

        assert!(!magnet.on_pointer_event(&PointerEvent::down(0.0, 0.0, 0)));
        magnet.move_by(10.0, 10.0);
        magnet.go_to_wall();
        assert!(magnet.set_position((5, 5), true).is_ok());
        assert!(!magnet.has_pending_frame());
        assert!(layouts.borrow().is_empty());
        assert_eq!(magnet.position(), Point::ORIGIN);
    }

    #[test]
    fn down_cancels_running_animation() {
        let clock = ManualClock::new(0);
        let mut magnet = magnet(Surface::default(), &clock);
        magnet.show();
        assert!(magnet.is_animating());

        magnet.on_pointer_event(&PointerEvent::down(0.0, 0.0, 0));
        assert!(!magnet.is_animating());
        assert!(!magnet.has_pending_frame());
        assert!(magnet.removal_zone().is_visible());
    }

    // ═══════════════════════════════════════════════════════════════════
    // Tracing capture
    // ═══════════════════════════════════════════════════════════════════

    #[derive(Debug, Clone)]
    struct CapturedEvent {
        level: tracing::Level,
        target: String,
        fields: HashMap<String, String>,
    }

    #[derive(Clone, Default)]
    struct Capture {
        spans: Arc<Mutex<Vec<String>>>,
        events: Arc<Mutex<Vec<CapturedEvent>>>,
    }

    struct FieldVisitor(Vec<(String, String)>);

    impl tracing::field::Visit for FieldVisitor {
        fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
            self.0.push((field.name().to_string(), format!("{value:?}")));
        }
    }

    impl<S> tracing_subscriber::Layer<S> for Capture
    where
        S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_new_span(
            &self,
            attrs: &tracing::span::Attributes<'_>,
            _id: &tracing::span::Id,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            self.spans
                .lock()
                .unwrap()
                .push(attrs.metadata().name().to_string());
        }

        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            let mut visitor = FieldVisitor(Vec::new());
            event.record(&mut visitor);
            self.events.lock().unwrap().push(CapturedEvent {
                level: *event.metadata().level(),
                target: event.metadata().target().to_string(),
                fields: visitor.0.into_iter().collect(),
            });
        }
    }

    fn with_captured_tracing(f: impl FnOnce()) -> Capture {
        let capture = Capture::default();
        let subscriber = tracing_subscriber::registry().with(capture.clone());
        tracing::subscriber::with_default(subscriber, f);
        capture
    }

    #[test]
    fn refusal_is_logged_as_warning() {
        let capture = with_captured_tracing(|| {
            let clock = ManualClock::new(0);
            let surface = Surface {
                refuse: true,
                ..Surface::default()
            };
            magnet(surface, &clock).show();
        });

        assert!(capture.spans.lock().unwrap().contains(&"magnet.show".to_string()));
        let events = capture.events.lock().unwrap();
        let warning = events
            .iter()
            .find(|e| e.level == tracing::Level::WARN)
            .expect("expected a warning");
        assert_eq!(warning.target, "magnet.controller");
        assert_eq!(
            warning.fields.get("error").map(String::as_str),
            Some("overlay permission denied")
        );
    }

    #[test]
    fn dismissal_opens_lifecycle_spans() {
        let capture = with_captured_tracing(|| {
            let clock = ManualClock::new(0);
            let mut magnet = magnet(Surface::default(), &clock);
            magnet.show();
            magnet.fling_away();
            assert!(magnet.is_destroyed());
        });

        let spans = capture.spans.lock().unwrap();
        let fling = spans.iter().position(|s| s == "magnet.fling_away");
        let destroy = spans.iter().position(|s| s == "magnet.destroy");
        assert!(fling.is_some());
        assert!(destroy > fling);
    }
}
