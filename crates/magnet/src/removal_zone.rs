#![forbid(unsafe_code)]

//! The dismissal target shown while the icon is dragged.
//!
//! [`RemovalZone`] owns the logical state (visibility, anchor, proximity) and
//! drives a host-supplied [`RemovalView`] for presentation. Hit-testing uses
//! a strict [`CaptureBox`] centered on the anchor (the bottom-center of the
//! display by default).
//!
//! # Invariants
//!
//! 1. Proximity is only pushed to the view while the zone is visible and
//!    responsive.
//! 2. After [`RemovalZone::destroy`] every operation is a no-op and the view
//!    has been released exactly once.

use magnet_core::{CaptureBox, Point};

use crate::config::RemovalZoneConfig;

/// Host resource identifier (drawable, image asset, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ResourceId(pub u32);

/// Optional artwork overrides for the removal target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemovalZoneStyle {
    pub icon_resource: Option<ResourceId>,
    pub shadow_resource: Option<ResourceId>,
}

/// How close the dragged icon is to the removal target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Proximity {
    /// Farther than twice the responsive radius.
    #[default]
    Far,
    /// Within twice the responsive radius.
    Near,
    /// Within the responsive radius.
    Engaged,
}

impl Proximity {
    /// Classify `distance` against `radius`.
    #[must_use]
    pub fn classify(distance: f32, radius: f32) -> Self {
        if distance <= radius {
            Self::Engaged
        } else if distance <= radius * 2.0 {
            Self::Near
        } else {
            Self::Far
        }
    }
}

/// Presentation of the removal target, implemented by the host.
pub trait RemovalView {
    /// Show or hide the target.
    fn set_visible(&mut self, visible: bool);

    /// React to the icon approaching or leaving.
    fn set_proximity(&mut self, proximity: Proximity);

    /// Release any window-layer resources. Called once.
    fn release(&mut self);

    /// Apply artwork overrides. Called once at construction.
    fn apply_style(&mut self, _style: &RemovalZoneStyle) {}
}

/// A view that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRemovalView;

impl RemovalView for NullRemovalView {
    fn set_visible(&mut self, _visible: bool) {}
    fn set_proximity(&mut self, _proximity: Proximity) {}
    fn release(&mut self) {}
}

/// Visibility, proximity, and hit-testing for the dismissal target.
pub struct RemovalZone {
    view: Option<Box<dyn RemovalView>>,
    style: RemovalZoneStyle,
    anchor: Point,
    visible: bool,
    proximity: Proximity,
    responsive: bool,
    responsive_radius: f32,
    capture_half_width: f32,
    capture_half_height: f32,
}

impl RemovalZone {
    /// Create a hidden zone anchored at the screen center.
    #[must_use]
    pub fn new(
        mut view: Box<dyn RemovalView>,
        style: RemovalZoneStyle,
        config: &RemovalZoneConfig,
    ) -> Self {
        view.apply_style(&style);
        Self {
            view: Some(view),
            style,
            anchor: Point::ORIGIN,
            visible: false,
            proximity: Proximity::Far,
            responsive: config.responsive,
            responsive_radius: config.responsive_radius,
            capture_half_width: config.capture_half_width,
            capture_half_height: config.capture_half_height,
        }
    }

    /// Move the target (after a display change).
    pub fn set_anchor(&mut self, anchor: Point) {
        self.anchor = anchor;
    }

    /// Current anchor.
    #[inline]
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Show the target. Proximity restarts at [`Proximity::Far`].
    pub fn show(&mut self) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        self.visible = true;
        self.proximity = Proximity::Far;
        view.set_visible(true);
    }

    /// Hide the target.
    pub fn hide(&mut self) {
        let Some(view) = self.view.as_mut() else {
            return;
        };
        self.visible = false;
        view.set_visible(false);
    }

    /// Whether the target is showing.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Last computed proximity.
    #[inline]
    #[must_use]
    pub fn proximity(&self) -> Proximity {
        self.proximity
    }

    /// Artwork overrides in effect.
    #[inline]
    #[must_use]
    pub fn style(&self) -> &RemovalZoneStyle {
        &self.style
    }

    /// Track the icon at `position`.
    ///
    /// A responsive zone forwards proximity changes to its view; a plain one
    /// only records them.
    pub fn on_move(&mut self, position: Point) {
        if !self.visible {
            return;
        }
        let next = Proximity::classify(position.distance(self.anchor), self.responsive_radius);
        if next == self.proximity {
            return;
        }
        self.proximity = next;
        if self.responsive
            && let Some(view) = self.view.as_mut()
        {
            view.set_proximity(next);
        }
    }

    /// The capture box around the anchor.
    #[must_use]
    pub fn capture_box(&self) -> CaptureBox {
        CaptureBox::new(self.anchor, self.capture_half_width, self.capture_half_height)
    }

    /// Whether `position` lies strictly inside the capture box.
    #[must_use]
    pub fn hit_test(&self, position: Point) -> bool {
        self.capture_box().contains(position)
    }

    /// Release the view. Safe to call more than once.
    pub fn destroy(&mut self) {
        if let Some(mut view) = self.view.take() {
            if self.visible {
                view.set_visible(false);
            }
            view.release();
        }
        self.visible = false;
        self.proximity = Proximity::Far;
    }

    /// Whether [`destroy`](Self::destroy) has run.
    #[inline]
    #[must_use]
    pub fn is_destroyed(&self) -> bool {
        self.view.is_none()
    }
}

impl std::fmt::Debug for RemovalZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemovalZone")
            .field("anchor", &self.anchor)
            .field("visible", &self.visible)
            .field("proximity", &self.proximity)
            .field("responsive", &self.responsive)
            .field("destroyed", &self.is_destroyed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Style(RemovalZoneStyle),
        Visible(bool),
        Proximity(Proximity),
        Release,
    }

    #[derive(Clone, Default)]
    struct Log(Rc<RefCell<Vec<Call>>>);

    impl RemovalView for Log {
        fn set_visible(&mut self, visible: bool) {
            self.0.borrow_mut().push(Call::Visible(visible));
        }
        fn set_proximity(&mut self, proximity: Proximity) {
            self.0.borrow_mut().push(Call::Proximity(proximity));
        }
        fn release(&mut self) {
            self.0.borrow_mut().push(Call::Release);
        }
        fn apply_style(&mut self, style: &RemovalZoneStyle) {
            self.0.borrow_mut().push(Call::Style(*style));
        }
    }

    fn zone(responsive: bool) -> (RemovalZone, Log) {
        let log = Log::default();
        let config = RemovalZoneConfig {
            responsive,
            ..RemovalZoneConfig::default()
        };
        let mut zone = RemovalZone::new(Box::new(log.clone()), RemovalZoneStyle::default(), &config);
        zone.set_anchor(Point::new(0.0, 960.0));
        log.0.borrow_mut().clear();
        (zone, log)
    }

    #[test]
    fn proximity_bands() {
        assert_eq!(Proximity::classify(0.0, 200.0), Proximity::Engaged);
        assert_eq!(Proximity::classify(200.0, 200.0), Proximity::Engaged);
        assert_eq!(Proximity::classify(399.0, 200.0), Proximity::Near);
        assert_eq!(Proximity::classify(401.0, 200.0), Proximity::Far);
    }

    #[test]
    fn style_is_applied_at_construction() {
        let log = Log::default();
        let style = RemovalZoneStyle {
            icon_resource: Some(ResourceId(7)),
            shadow_resource: None,
        };
        let _zone = RemovalZone::new(Box::new(log.clone()), style, &RemovalZoneConfig::default());
        assert_eq!(*log.0.borrow(), vec![Call::Style(style)]);
    }

    #[test]
    fn responsive_zone_reports_changes_only() {
        let (mut zone, log) = zone(true);
        zone.show();
        zone.on_move(Point::new(0.0, 0.0));
        zone.on_move(Point::new(0.0, 600.0));
        zone.on_move(Point::new(0.0, 610.0));
        zone.on_move(Point::new(0.0, 900.0));
        assert_eq!(
            *log.0.borrow(),
            vec![
                Call::Visible(true),
                Call::Proximity(Proximity::Near),
                Call::Proximity(Proximity::Engaged),
            ]
        );
        assert_eq!(zone.proximity(), Proximity::Engaged);
    }

    #[test]
    fn plain_zone_tracks_without_reporting() {
        let (mut zone, log) = zone(false);
        zone.show();
        zone.on_move(Point::new(0.0, 900.0));
        assert_eq!(zone.proximity(), Proximity::Engaged);
        assert_eq!(*log.0.borrow(), vec![Call::Visible(true)]);
    }

    #[test]
    fn hidden_zone_ignores_moves() {
        let (mut zone, _log) = zone(true);
        zone.on_move(Point::new(0.0, 960.0));
        assert_eq!(zone.proximity(), Proximity::Far);
    }

    #[test]
    fn hit_test_is_strict() {
        let (zone, _log) = zone(false);
        assert!(zone.hit_test(Point::new(49.0, 711.0)));
        assert!(!zone.hit_test(Point::new(50.0, 960.0)));
        assert!(!zone.hit_test(Point::new(0.0, 710.0)));
    }

    #[test]
    fn destroy_releases_once() {
        let (mut zone, log) = zone(false);
        zone.show();
        zone.destroy();
        zone.destroy();
        zone.show();
        assert!(zone.is_destroyed());
        assert!(!zone.is_visible());
        assert_eq!(
            *log.0.borrow(),
            vec![Call::Visible(true), Call::Visible(false), Call::Release]
        );
    }
}
