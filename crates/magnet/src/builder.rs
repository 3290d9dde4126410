#![forbid(unsafe_code)]

//! Step-by-step construction of a [`Magnet`].
//!
//! Options accumulate on the builder; nothing is constructed until
//! [`MagnetBuilder::build`], which validates the whole configuration at once.
//!
//! ```ignore
//! let mut magnet = MagnetBuilder::new(host_surface)
//!     .icon_view(ViewId(42))
//!     .stick_to_wall(true)
//!     .fling_away(true)
//!     .initial_position(-200, 400)
//!     .icon_callback(listener)
//!     .build()?;
//! magnet.show();
//! ```

use magnet_core::{Clock, SystemClock};

use crate::callback::IconCallback;
use crate::config::MagnetConfig;
use crate::controller::Magnet;
use crate::error::{ConfigError, Result};
use crate::removal_zone::{NullRemovalView, RemovalView, RemovalZone, RemovalZoneStyle, ResourceId};
use crate::window::{ViewId, WindowSurface};

/// Collects options for a [`Magnet`].
pub struct MagnetBuilder {
    window: Box<dyn WindowSurface>,
    icon_view: Option<ViewId>,
    config: MagnetConfig,
    style: RemovalZoneStyle,
    callback: Option<Box<dyn IconCallback>>,
    removal_view: Option<Box<dyn RemovalView>>,
    clock: Option<Box<dyn Clock>>,
}

impl MagnetBuilder {
    /// Start a builder bound to the host window layer.
    #[must_use]
    pub fn new(window: impl WindowSurface + 'static) -> Self {
        Self {
            window: Box::new(window),
            icon_view: None,
            config: MagnetConfig::default(),
            style: RemovalZoneStyle::default(),
            callback: None,
            removal_view: None,
            clock: None,
        }
    }

    /// The view to float. Required.
    #[must_use]
    pub fn icon_view(mut self, view: ViewId) -> Self {
        self.icon_view = Some(view);
        self
    }

    /// Snap to the nearest wall after release (default: true).
    #[must_use]
    pub fn stick_to_wall(mut self, enabled: bool) -> Self {
        self.config.stick_to_wall = enabled;
        self
    }

    /// Allow dismissal by fling or capture zone (default: true).
    #[must_use]
    pub fn fling_away(mut self, enabled: bool) -> Self {
        self.config.fling_away = enabled;
        self
    }

    /// Let the removal view react as the icon approaches (default: false).
    #[must_use]
    pub fn removal_zone_responsive(mut self, responsive: bool) -> Self {
        self.config.removal_zone.responsive = responsive;
        self
    }

    /// Artwork for the removal target.
    #[must_use]
    pub fn removal_icon_resource(mut self, resource: ResourceId) -> Self {
        self.style.icon_resource = Some(resource);
        self
    }

    /// Shadow artwork for the removal target.
    #[must_use]
    pub fn removal_icon_shadow(mut self, resource: ResourceId) -> Self {
        self.style.shadow_resource = Some(resource);
        self
    }

    /// Animate here on `show()` instead of snapping to a wall.
    #[must_use]
    pub fn initial_position(mut self, x: i32, y: i32) -> Self {
        self.config.initial_position = Some((x, y));
        self
    }

    /// Receive click, move, and dismissal notifications.
    #[must_use]
    pub fn icon_callback(mut self, callback: impl IconCallback + 'static) -> Self {
        self.callback = Some(Box::new(callback));
        self
    }

    /// Host presentation of the removal target (default: draws nothing).
    #[must_use]
    pub fn removal_view(mut self, view: impl RemovalView + 'static) -> Self {
        self.removal_view = Some(Box::new(view));
        self
    }

    /// Time source for animation ticks (default: [`SystemClock`]).
    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Replace the whole configuration. Later setters still apply on top.
    #[must_use]
    pub fn config(mut self, config: MagnetConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate and construct.
    ///
    /// # Errors
    ///
    /// [`ConfigError::MissingIconView`] without an icon view, otherwise the
    /// first problem reported by [`MagnetConfig::validate`].
    pub fn build(self) -> Result<Magnet> {
        let icon_view = self.icon_view.ok_or(ConfigError::MissingIconView)?;
        if let Some(problem) = self.config.validate().into_iter().next() {
            return Err(problem.into());
        }

        let view = self
            .removal_view
            .unwrap_or_else(|| Box::new(NullRemovalView));
        let removal_zone = RemovalZone::new(view, self.style, &self.config.removal_zone);
        let clock = self
            .clock
            .unwrap_or_else(|| Box::new(SystemClock::new()));

        Ok(Magnet::new(
            self.config,
            icon_view,
            self.window,
            self.callback,
            clock,
            removal_zone,
        ))
    }
}

impl std::fmt::Debug for MagnetBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MagnetBuilder")
            .field("icon_view", &self.icon_view)
            .field("config", &self.config)
            .field("style", &self.style)
            .field("has_callback", &self.callback.is_some())
            .field("has_removal_view", &self.removal_view.is_some())
            .finish_non_exhaustive()
    }
}
