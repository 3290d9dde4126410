#![forbid(unsafe_code)]

//! Magnet configuration.
//!
//! [`MagnetConfig`] groups every tunable of a magnet. It is fixed once the
//! magnet is built. With the `config-file` feature it can be loaded from TOML
//! or JSON; missing fields take their defaults.
//!
//! ```toml
//! stick_to_wall = true
//! fling_away = true
//! initial_position = [120, -400]
//!
//! [gesture]
//! tap_timeout_ms = 200
//!
//! [gesture.fling]
//! min_velocity = 1500.0
//!
//! [animation]
//! duration_ms = 400
//!
//! [removal_zone]
//! responsive = true
//! responsive_radius = 200.0
//! ```
//!
//! # Defaults
//!
//! Every default matches the stock magnet behavior: stick to walls, allow
//! fling-away, 200ms tap timeout, 400ms easing, and a 50 × 250 px capture box
//! around the bottom-center dismissal point.

#[cfg(feature = "config-file")]
use std::path::Path;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use magnet_core::{AnimationConfig, GestureConfig};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Top-level MagnetConfig
// ---------------------------------------------------------------------------

/// Behavior switches and thresholds for one magnet.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct MagnetConfig {
    /// Snap to the nearest screen edge after every release.
    pub stick_to_wall: bool,

    /// Allow dismissal by fling or by entering the capture zone.
    pub fling_away: bool,

    /// Where `show()` animates to. `None` snaps to the nearest wall instead.
    pub initial_position: Option<(i32, i32)>,

    /// Tap and fling recognition.
    pub gesture: GestureConfig,

    /// Easing window.
    pub animation: AnimationConfig,

    /// Dismissal target behavior.
    pub removal_zone: RemovalZoneConfig,
}

impl Default for MagnetConfig {
    fn default() -> Self {
        Self {
            stick_to_wall: true,
            fling_away: true,
            initial_position: None,
            gesture: GestureConfig::default(),
            animation: AnimationConfig::default(),
            removal_zone: RemovalZoneConfig::default(),
        }
    }
}

/// Removal-zone proximity and capture geometry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct RemovalZoneConfig {
    /// Report proximity changes to the removal view while dragging.
    pub responsive: bool,
    /// Distance from the anchor at which the zone engages (px).
    pub responsive_radius: f32,
    /// Horizontal half-size of the capture box (px, strict).
    pub capture_half_width: f32,
    /// Vertical half-size of the capture box (px, strict).
    pub capture_half_height: f32,
}

impl Default for RemovalZoneConfig {
    fn default() -> Self {
        Self {
            responsive: false,
            responsive_radius: 200.0,
            capture_half_width: 50.0,
            capture_half_height: 250.0,
        }
    }
}

impl MagnetConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Check every parameter is within its accepted range.
    ///
    /// An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let mut check = |ok: bool, field: &'static str, reason: &str| {
            if !ok {
                errors.push(ConfigError::InvalidValue {
                    field,
                    reason: reason.to_string(),
                });
            }
        };

        let fling = &self.gesture.fling;
        check(
            self.gesture.tap_timeout_ms >= 0,
            "gesture.tap_timeout_ms",
            "must not be negative",
        );
        check(
            fling.min_velocity > 0.0,
            "gesture.fling.min_velocity",
            "must be positive",
        );
        check(
            fling.max_velocity >= fling.min_velocity,
            "gesture.fling.max_velocity",
            "must be at least min_velocity",
        );
        check(
            fling.min_distance >= 0.0,
            "gesture.fling.min_distance",
            "must not be negative",
        );
        check(
            fling.velocity_window_ms > 0,
            "gesture.fling.velocity_window_ms",
            "must be positive",
        );
        check(
            self.animation.duration_ms > 0,
            "animation.duration_ms",
            "must be positive",
        );
        check(
            self.removal_zone.responsive_radius >= 0.0,
            "removal_zone.responsive_radius",
            "must not be negative",
        );
        check(
            self.removal_zone.capture_half_width > 0.0
                && self.removal_zone.capture_half_height > 0.0,
            "removal_zone.capture",
            "half sizes must be positive",
        );
        errors
    }
}
