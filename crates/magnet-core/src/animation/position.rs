#![forbid(unsafe_code)]

//! The single-slot position animator.
//!
//! # Invariants
//!
//! 1. At most one [`AnimationTask`] is active; `start()` replaces it.
//! 2. Every `start()` and `stop()` bumps the generation, so tokens handed out
//!    earlier are rejected by [`PositionAnimator::step`].
//! 3. A step with `progress == 1.0` finishes the task; further steps with the
//!    same token are rejected.

use crate::geometry::Point;

use super::{AnimationConfig, ease_delta, progress};

/// Identifies the animation a scheduled tick belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickToken {
    generation: u64,
}

impl TickToken {
    /// The generation this token was issued for.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// The animation currently owned by a [`PositionAnimator`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationTask {
    pub target: Point,
    pub start_ms: i64,
    pub active: bool,
}

/// The outcome of one accepted tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationStep {
    /// Delta to apply to the current position.
    pub dx: f32,
    pub dy: f32,
    /// Elapsed fraction of the window when this step was computed.
    pub progress: f32,
    /// True once `progress` reached 1.0; no further ticks are needed.
    pub finished: bool,
}

/// Counters for observability and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnimatorStats {
    /// Animations started.
    pub started: u64,
    /// Animations replaced by a newer `start()` before finishing.
    pub superseded: u64,
    /// Animations that reached their target.
    pub completed: u64,
    /// Ticks whose delta was applied.
    pub ticks_applied: u64,
    /// Ticks rejected as stale (superseded, stopped, or detached).
    pub ticks_dropped: u64,
}

/// Drives one time-boxed ease toward a target.
///
/// The animator does not schedule anything itself: `start()` returns the
/// token for the first tick and the caller arms a tick with it. Each firing
/// calls [`step`](Self::step); when the step is not finished the caller
/// re-arms with the same token.
#[derive(Debug, Clone)]
pub struct PositionAnimator {
    config: AnimationConfig,
    task: Option<AnimationTask>,
    generation: u64,
    stats: AnimatorStats,
}

impl PositionAnimator {
    /// Create an idle animator.
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            task: None,
            generation: 0,
            stats: AnimatorStats::default(),
        }
    }

    /// Begin animating toward `target`, superseding any active animation.
    pub fn start(&mut self, target: Point, now_ms: i64) -> TickToken {
        if self.is_active() {
            self.stats.superseded += 1;
        }
        self.generation = self.generation.wrapping_add(1);
        self.stats.started += 1;
        self.task = Some(AnimationTask {
            target,
            start_ms: now_ms,
            active: true,
        });
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "magnet.animator",
            generation = self.generation,
            x = target.x,
            y = target.y,
            "animation started"
        );
        TickToken {
            generation: self.generation,
        }
    }

    /// Cancel the active animation. Outstanding tokens become stale.
    pub fn stop(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        if let Some(task) = self.task.as_mut() {
            task.active = false;
        }
    }

    /// Whether `token` still refers to the active animation.
    #[inline]
    #[must_use]
    pub fn is_current(&self, token: TickToken) -> bool {
        token.generation == self.generation && self.is_active()
    }

    /// Whether an animation is in flight.
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.task.is_some_and(|t| t.active)
    }

    /// The most recent task, active or not.
    #[inline]
    #[must_use]
    pub fn task(&self) -> Option<&AnimationTask> {
        self.task.as_ref()
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Counters since construction.
    #[inline]
    #[must_use]
    pub fn stats(&self) -> AnimatorStats {
        self.stats
    }

    /// Compute the delta for a firing tick.
    ///
    /// Returns `None` (and counts a dropped tick) when `token` is stale.
    pub fn step(&mut self, token: TickToken, current: Point, now_ms: i64) -> Option<AnimationStep> {
        if !self.is_current(token) {
            self.note_dropped();
            return None;
        }
        let task = self.task.as_mut()?;
        let progress = progress(task.start_ms, now_ms, self.config.duration_ms);
        let (dx, dy) = ease_delta(current, task.target, progress);
        let finished = progress >= 1.0;
        if finished {
            task.active = false;
            self.stats.completed += 1;
        }
        self.stats.ticks_applied += 1;
        Some(AnimationStep {
            dx,
            dy,
            progress,
            finished,
        })
    }

    /// Count a tick the caller discarded for its own reasons.
    pub fn note_dropped(&mut self) {
        self.stats.ticks_dropped += 1;
        #[cfg(feature = "tracing")]
        tracing::trace!(
            target: "magnet.animator",
            generation = self.generation,
            "stale tick dropped"
        );
    }
}

impl Default for PositionAnimator {
    fn default() -> Self {
        Self::new(AnimationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_tick_at_start_time_does_not_move() {
        let mut anim = PositionAnimator::default();
        let token = anim.start(Point::new(100.0, 0.0), 0);
        let step = anim.step(token, Point::ORIGIN, 0).unwrap();
        assert_eq!((step.dx, step.dy), (0.0, 0.0));
        assert!(!step.finished);
        assert!(anim.is_active());
    }

    #[test]
    fn step_closes_progress_fraction_of_remaining_gap() {
        let mut anim = PositionAnimator::default();
        let token = anim.start(Point::new(400.0, 0.0), 0);
        // 100ms of 400ms -> progress 0.25 of the remaining 400px.
        let step = anim.step(token, Point::ORIGIN, 100).unwrap();
        assert_eq!(step.dx, 100.0);
        assert_eq!(step.progress, 0.25);

        // From x=100, 200ms -> progress 0.5 of the remaining 300px.
        let step = anim.step(token, Point::new(100.0, 0.0), 200).unwrap();
        assert_eq!(step.dx, 150.0);
    }

    #[test]
    fn finishing_step_lands_on_target_and_deactivates() {
        let mut anim = PositionAnimator::default();
        let token = anim.start(Point::new(-50.0, 80.0), 1000);
        let step = anim.step(token, Point::new(10.0, 10.0), 1400).unwrap();
        assert!(step.finished);
        assert_eq!(Point::new(10.0, 10.0).offset(step.dx, step.dy), Point::new(-50.0, 80.0));
        assert!(!anim.is_active());
        assert_eq!(anim.stats().completed, 1);

        // The same token is now stale.
        assert!(anim.step(token, Point::ORIGIN, 1500).is_none());
        assert_eq!(anim.stats().ticks_dropped, 1);
    }

    #[test]
    fn restart_supersedes_previous_token() {
        let mut anim = PositionAnimator::default();
        let old = anim.start(Point::new(100.0, 0.0), 0);
        let new = anim.start(Point::new(-100.0, 0.0), 10);
        assert!(!anim.is_current(old));
        assert!(anim.is_current(new));
        assert!(anim.step(old, Point::ORIGIN, 20).is_none());
        assert_eq!(anim.stats().superseded, 1);
        assert_eq!(anim.task().map(|t| t.target), Some(Point::new(-100.0, 0.0)));
    }

    #[test]
    fn stop_invalidates_outstanding_token() {
        let mut anim = PositionAnimator::default();
        let token = anim.start(Point::new(100.0, 0.0), 0);
        anim.stop();
        assert!(!anim.is_active());
        assert!(anim.step(token, Point::ORIGIN, 100).is_none());
    }

    #[test]
    fn stop_when_idle_is_harmless() {
        let mut anim = PositionAnimator::default();
        anim.stop();
        assert!(!anim.is_active());
        assert!(anim.task().is_none());
    }
}
