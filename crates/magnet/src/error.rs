#![forbid(unsafe_code)]

//! Magnet error model and graceful degradation.
//!
//! # Design Principles
//!
//! 1. **Fail fast at construction**: configuration problems surface from
//!    [`MagnetBuilder::build`](crate::MagnetBuilder::build) before anything is
//!    partially built.
//! 2. **Degrade silently at runtime**: a window layer that refuses the overlay
//!    leaves a magnet that never appears; every later call stays a no-op.
//! 3. **No retries**: nothing here is retried.
//!
//! Stale animation ticks are not errors. They are counted in
//! [`AnimatorStats`](magnet_core::AnimatorStats) and dropped.

use std::fmt;

// ── Domain-Specific Error Types ─────────────────────────────────────────

/// Construction-time configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// No icon view was supplied to the builder.
    MissingIconView,
    /// A field holds a value outside its accepted range.
    InvalidValue { field: &'static str, reason: String },
    /// Reading a config file failed.
    #[cfg(feature = "config-file")]
    Io(std::io::Error),
    /// A TOML config could not be parsed.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// A JSON config could not be parsed.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
}

/// Window-layer refusals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The host forbids drawing over other content.
    PermissionDenied,
    /// The host rejected the overlay for another reason.
    Rejected(String),
}

/// Calls made in the wrong lifecycle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleError {
    /// The operation requires `show()` to have been called first.
    NotShown,
}

// ── Unified Error ───────────────────────────────────────────────────────

/// Top-level error type for magnet APIs.
#[derive(Debug)]
pub enum MagnetError {
    /// Invalid or incomplete configuration.
    Config(ConfigError),
    /// The window layer refused the overlay.
    Window(WindowError),
    /// Call made before the magnet was shown.
    Lifecycle(LifecycleError),
}

/// Standard result type for magnet APIs.
pub type Result<T> = std::result::Result<T, MagnetError>;

// ── Graceful Degradation ────────────────────────────────────────────────

/// What a host should expect after an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DegradationAction {
    /// Nothing was built; fix the configuration.
    FailFast,
    /// The magnet exists but never appears; all calls are safe no-ops.
    SilentNoOverlay,
    /// The call had no effect; the magnet is otherwise fine.
    Ignore,
}

impl MagnetError {
    /// The degradation this error implies.
    #[must_use]
    pub fn degradation(&self) -> DegradationAction {
        match self {
            Self::Config(_) => DegradationAction::FailFast,
            Self::Window(_) => DegradationAction::SilentNoOverlay,
            Self::Lifecycle(LifecycleError::NotShown) => DegradationAction::Ignore,
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────────

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingIconView => write!(f, "magnet view is missing: an icon view must be set"),
            Self::InvalidValue { field, reason } => write!(f, "invalid {field}: {reason}"),
            #[cfg(feature = "config-file")]
            Self::Io(err) => write!(f, "config I/O: {err}"),
            #[cfg(feature = "config-file")]
            Self::Toml(err) => write!(f, "config TOML: {err}"),
            #[cfg(feature = "config-file")]
            Self::Json(err) => write!(f, "config JSON: {err}"),
        }
    }
}

impl fmt::Display for WindowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "overlay permission denied"),
            Self::Rejected(msg) => write!(f, "overlay rejected: {msg}"),
        }
    }
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotShown => write!(f, "magnet has not been shown yet"),
        }
    }
}

impl fmt::Display for MagnetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "{err}"),
            Self::Window(err) => write!(f, "{err}"),
            Self::Lifecycle(err) => write!(f, "{err}"),
        }
    }
}

// ── std::error::Error ───────────────────────────────────────────────────

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            #[cfg(feature = "config-file")]
            Self::Io(err) => Some(err),
            #[cfg(feature = "config-file")]
            Self::Toml(err) => Some(err),
            #[cfg(feature = "config-file")]
            Self::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl std::error::Error for WindowError {}
impl std::error::Error for LifecycleError {}

impl std::error::Error for MagnetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            Self::Window(err) => Some(err),
            Self::Lifecycle(err) => Some(err),
        }
    }
}

// ── From conversions ────────────────────────────────────────────────────

impl From<ConfigError> for MagnetError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<WindowError> for MagnetError {
    fn from(err: WindowError) -> Self {
        Self::Window(err)
    }
}

impl From<LifecycleError> for MagnetError {
    fn from(err: LifecycleError) -> Self {
        Self::Lifecycle(err)
    }
}
