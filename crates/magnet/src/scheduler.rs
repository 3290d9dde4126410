#![forbid(unsafe_code)]

//! Cooperative frame scheduling.
//!
//! Animation ticks are deferred units of work, not sleeps. A tick posted
//! while handling an event or another tick waits for the next frame: the
//! host calls [`FrameScheduler::take_frame`] (through
//! [`Magnet::run_frame`](crate::Magnet::run_frame)) once per display refresh,
//! and only work posted before that call runs in it.
//!
//! # Invariants
//!
//! 1. Tasks run in posting order.
//! 2. A task posted during a frame never runs in that same frame.
//! 3. Cancelled tasks are removed before they can run; tasks that still slip
//!    through must be validated by their owner (cancellation is cooperative).

use std::collections::VecDeque;

/// A FIFO of deferred tasks drained one frame at a time.
#[derive(Debug, Clone)]
pub struct FrameScheduler<T> {
    pending: VecDeque<T>,
    posted_total: u64,
    cancelled_total: u64,
}

impl<T> FrameScheduler<T> {
    /// Create an empty scheduler.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pending: VecDeque::with_capacity(4),
            posted_total: 0,
            cancelled_total: 0,
        }
    }

    /// Defer `task` to the next frame.
    pub fn post(&mut self, task: T) {
        self.posted_total += 1;
        self.pending.push_back(task);
    }

    /// Remove every pending task matching `cancel`. Returns how many.
    pub fn cancel_where(&mut self, mut cancel: impl FnMut(&T) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|task| !cancel(task));
        let removed = before - self.pending.len();
        self.cancelled_total += removed as u64;
        removed
    }

    /// Remove every pending task.
    pub fn clear(&mut self) -> usize {
        self.cancel_where(|_| true)
    }

    /// Take the work due this frame, leaving the queue empty for re-posts.
    #[must_use]
    pub fn take_frame(&mut self) -> VecDeque<T> {
        std::mem::take(&mut self.pending)
    }

    /// Whether any work is waiting for a frame.
    #[inline]
    #[must_use]
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of tasks waiting.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the queue is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Total tasks ever posted.
    #[inline]
    #[must_use]
    pub fn posted_total(&self) -> u64 {
        self.posted_total
    }

    /// Total tasks removed by cancellation.
    #[inline]
    #[must_use]
    pub fn cancelled_total(&self) -> u64 {
        self.cancelled_total
    }
}

impl<T> Default for FrameScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
