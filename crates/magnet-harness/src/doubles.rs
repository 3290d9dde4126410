#![forbid(unsafe_code)]

//! Recording test doubles for the magnet's host seams.
//!
//! Each double comes with a probe that shares its state, so a test can hand
//! the double to the builder and keep inspecting (or poking) it afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use magnet::{
    IconCallback, OverlayExtent, OverlayLayout, OverlayPosition, Point, Proximity, RemovalView,
    RemovalZoneStyle, ScreenBounds, SurfaceHandle, ViewId, WindowError, WindowSurface,
};

// ============================================================================
// Window surface
// ============================================================================

/// One call the magnet made on the window layer.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Add { view: ViewId, layout: OverlayLayout },
    Update { handle: SurfaceHandle, position: OverlayPosition },
    Remove { handle: SurfaceHandle },
}

#[derive(Debug)]
struct SurfaceState {
    screen: ScreenBounds,
    icon: OverlayExtent,
    refuse: Option<WindowError>,
    attached: Option<SurfaceHandle>,
    next_handle: u64,
    calls: Vec<SurfaceCall>,
}

/// A window layer that records every call.
#[derive(Debug)]
pub struct RecordingSurface {
    state: Rc<RefCell<SurfaceState>>,
}

/// Shared view into a [`RecordingSurface`].
#[derive(Debug, Clone)]
pub struct SurfaceProbe {
    state: Rc<RefCell<SurfaceState>>,
}

impl RecordingSurface {
    /// A surface reporting `screen` and measuring every view as `icon`.
    #[must_use]
    pub fn new(screen: ScreenBounds, icon: OverlayExtent) -> (Self, SurfaceProbe) {
        let state = Rc::new(RefCell::new(SurfaceState {
            screen,
            icon,
            refuse: None,
            attached: None,
            next_handle: 1,
            calls: Vec::new(),
        }));
        (
            Self {
                state: Rc::clone(&state),
            },
            SurfaceProbe { state },
        )
    }

    /// A 1080 × 1920 portrait display with a 100 × 100 icon.
    #[must_use]
    pub fn phone() -> (Self, SurfaceProbe) {
        Self::new(ScreenBounds::new(1080, 1920), OverlayExtent::new(100, 100))
    }

    /// A phone-sized surface that refuses the overlay with `err`.
    #[must_use]
    pub fn refusing(err: WindowError) -> (Self, SurfaceProbe) {
        let (surface, probe) = Self::phone();
        surface.state.borrow_mut().refuse = Some(err);
        (surface, probe)
    }
}

impl WindowSurface for RecordingSurface {
    fn add_overlay(
        &mut self,
        view: ViewId,
        layout: OverlayLayout,
    ) -> Result<SurfaceHandle, WindowError> {
        let mut state = self.state.borrow_mut();
        if let Some(err) = state.refuse.clone() {
            return Err(err);
        }
        let handle = SurfaceHandle(state.next_handle);
        state.next_handle += 1;
        state.attached = Some(handle);
        state.calls.push(SurfaceCall::Add { view, layout });
        Ok(handle)
    }

    fn update_overlay_layout(&mut self, handle: SurfaceHandle, position: OverlayPosition) {
        self.state
            .borrow_mut()
            .calls
            .push(SurfaceCall::Update { handle, position });
    }

    fn remove_overlay(&mut self, handle: SurfaceHandle) {
        let mut state = self.state.borrow_mut();
        if state.attached == Some(handle) {
            state.attached = None;
        }
        state.calls.push(SurfaceCall::Remove { handle });
    }

    fn display_metrics(&self) -> ScreenBounds {
        self.state.borrow().screen
    }

    fn measure_view(&self, _view: ViewId) -> OverlayExtent {
        self.state.borrow().icon
    }

    fn is_attached(&self, handle: SurfaceHandle) -> bool {
        self.state.borrow().attached == Some(handle)
    }
}

impl SurfaceProbe {
    /// Every call so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.state.borrow().calls.clone()
    }

    /// Positions committed through `update_overlay_layout`, in order.
    #[must_use]
    pub fn layouts(&self) -> Vec<Point> {
        self.state
            .borrow()
            .calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Update { position, .. } => Some(*position),
                _ => None,
            })
            .collect()
    }

    /// The most recent committed position.
    #[must_use]
    pub fn last_layout(&self) -> Option<Point> {
        self.layouts().last().copied()
    }

    /// How many times the overlay was removed.
    #[must_use]
    pub fn remove_count(&self) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|call| matches!(call, SurfaceCall::Remove { .. }))
            .count()
    }

    /// Whether an overlay is currently hosted.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state.borrow().attached.is_some()
    }

    /// Drop the overlay behind the magnet's back.
    pub fn detach(&self) {
        self.state.borrow_mut().attached = None;
    }

    /// Report a different display size from now on.
    pub fn set_screen(&self, screen: ScreenBounds) {
        self.state.borrow_mut().screen = screen;
    }

    /// Forget recorded calls.
    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }
}

// ============================================================================
// Removal view
// ============================================================================

/// One call the magnet made on the removal view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RemovalCall {
    Styled(RemovalZoneStyle),
    Visible(bool),
    Proximity(Proximity),
    Released,
}

/// A removal view that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingRemovalView {
    calls: Rc<RefCell<Vec<RemovalCall>>>,
}

impl RecordingRemovalView {
    /// The view and a probe sharing its log.
    #[must_use]
    pub fn new() -> (Self, RemovalProbe) {
        let view = Self::default();
        let probe = RemovalProbe {
            calls: Rc::clone(&view.calls),
        };
        (view, probe)
    }
}

impl RemovalView for RecordingRemovalView {
    fn set_visible(&mut self, visible: bool) {
        self.calls.borrow_mut().push(RemovalCall::Visible(visible));
    }

    fn set_proximity(&mut self, proximity: Proximity) {
        self.calls.borrow_mut().push(RemovalCall::Proximity(proximity));
    }

    fn release(&mut self) {
        self.calls.borrow_mut().push(RemovalCall::Released);
    }

    fn apply_style(&mut self, style: &RemovalZoneStyle) {
        self.calls.borrow_mut().push(RemovalCall::Styled(*style));
    }
}

/// Shared view into a [`RecordingRemovalView`].
#[derive(Debug, Clone)]
pub struct RemovalProbe {
    calls: Rc<RefCell<Vec<RemovalCall>>>,
}

impl RemovalProbe {
    /// Every call so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RemovalCall> {
        self.calls.borrow().clone()
    }

    /// Visibility as last set by the magnet.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find_map(|call| match call {
                RemovalCall::Visible(v) => Some(*v),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Proximity updates pushed to the view, in order.
    #[must_use]
    pub fn proximities(&self) -> Vec<Proximity> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                RemovalCall::Proximity(p) => Some(*p),
                _ => None,
            })
            .collect()
    }

    /// How many times the view was released.
    #[must_use]
    pub fn release_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, RemovalCall::Released))
            .count()
    }
}

// ============================================================================
// Listener
// ============================================================================

/// One notification delivered to the listener.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IconEvent {
    Click { view: ViewId, x: f32, y: f32 },
    Move { x: f32, y: f32 },
    FlungAway,
    Destroyed,
}

/// A listener that logs every notification.
#[derive(Debug, Clone, Default)]
pub struct RecordingCallback {
    events: Rc<RefCell<Vec<IconEvent>>>,
}

impl RecordingCallback {
    /// The listener and a log sharing its events.
    #[must_use]
    pub fn new() -> (Self, CallbackLog) {
        let callback = Self::default();
        let log = CallbackLog {
            events: Rc::clone(&callback.events),
        };
        (callback, log)
    }
}

impl IconCallback for RecordingCallback {
    fn on_icon_click(&mut self, view: ViewId, x: f32, y: f32) {
        self.events.borrow_mut().push(IconEvent::Click { view, x, y });
    }

    fn on_move(&mut self, x: f32, y: f32) {
        self.events.borrow_mut().push(IconEvent::Move { x, y });
    }

    fn on_fling_away(&mut self) {
        self.events.borrow_mut().push(IconEvent::FlungAway);
    }

    fn on_icon_destroyed(&mut self) {
        self.events.borrow_mut().push(IconEvent::Destroyed);
    }
}

/// Shared view into a [`RecordingCallback`].
#[derive(Debug, Clone)]
pub struct CallbackLog {
    events: Rc<RefCell<Vec<IconEvent>>>,
}

impl CallbackLog {
    /// Every notification so far, in order.
    #[must_use]
    pub fn events(&self) -> Vec<IconEvent> {
        self.events.borrow().clone()
    }

    /// Positions reported through `on_move`, in order.
    #[must_use]
    pub fn moves(&self) -> Vec<Point> {
        self.events
            .borrow()
            .iter()
            .filter_map(|event| match event {
                IconEvent::Move { x, y } => Some(Point::new(*x, *y)),
                _ => None,
            })
            .collect()
    }

    /// Number of click notifications.
    #[must_use]
    pub fn clicks(&self) -> usize {
        self.count(|e| matches!(e, IconEvent::Click { .. }))
    }

    /// Number of fling-away notifications.
    #[must_use]
    pub fn flings(&self) -> usize {
        self.count(|e| matches!(e, IconEvent::FlungAway))
    }

    /// Number of destroyed notifications.
    #[must_use]
    pub fn destroyed(&self) -> usize {
        self.count(|e| matches!(e, IconEvent::Destroyed))
    }

    /// Count events matching `pred`.
    #[must_use]
    pub fn count(&self, pred: impl Fn(&IconEvent) -> bool) -> usize {
        self.events.borrow().iter().filter(|e| pred(e)).count()
    }

    /// Forget logged events.
    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_tracks_attachment() {
        let (mut surface, probe) = RecordingSurface::phone();
        let handle = surface
            .add_overlay(ViewId(1), OverlayLayout::floating_at(Point::ORIGIN))
            .unwrap();
        assert!(surface.is_attached(handle));
        probe.detach();
        assert!(!surface.is_attached(handle));
        assert_eq!(probe.calls().len(), 1);
    }

    #[test]
    fn refusing_surface_never_attaches() {
        let (mut surface, probe) = RecordingSurface::refusing(WindowError::PermissionDenied);
        let result = surface.add_overlay(ViewId(1), OverlayLayout::floating_at(Point::ORIGIN));
        assert_eq!(result, Err(WindowError::PermissionDenied));
        assert!(!probe.is_attached());
        assert!(probe.calls().is_empty());
    }

    #[test]
    fn removal_probe_reports_last_visibility() {
        let (mut view, probe) = RecordingRemovalView::new();
        assert!(!probe.is_visible());
        view.set_visible(true);
        view.set_proximity(Proximity::Near);
        assert!(probe.is_visible());
        view.set_visible(false);
        assert!(!probe.is_visible());
        assert_eq!(probe.proximities(), vec![Proximity::Near]);
    }
}
