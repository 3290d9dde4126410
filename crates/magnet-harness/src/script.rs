#![forbid(unsafe_code)]

//! Scripted pointer gestures.
//!
//! [`GestureScript`] produces timestamped [`PointerEvent`] sequences with a
//! small fluent API, so tests read as the gesture they perform:
//!
//! ```
//! use magnet_harness::script::GestureScript;
//!
//! let events = GestureScript::starting_at(1_000)
//!     .down(500.0, 500.0)
//!     .drag_to(700.0, 500.0, 10, 300)
//!     .up()
//!     .build();
//! assert_eq!(events.len(), 12);
//! ```

use magnet::{Point, PointerEvent};

/// Builder for a single-pointer event sequence.
#[derive(Debug, Clone)]
pub struct GestureScript {
    events: Vec<PointerEvent>,
    now_ms: i64,
    pointer: Point,
}

impl GestureScript {
    /// Start a script whose first event happens at `start_ms`.
    #[must_use]
    pub fn starting_at(start_ms: i64) -> Self {
        Self {
            events: Vec::new(),
            now_ms: start_ms,
            pointer: Point::ORIGIN,
        }
    }

    /// Press at `(x, y)` at the current time.
    #[must_use]
    pub fn down(mut self, x: f32, y: f32) -> Self {
        self.pointer = Point::new(x, y);
        self.events.push(PointerEvent::down(x, y, self.now_ms));
        self
    }

    /// One move to `(x, y)` after `dt_ms`.
    #[must_use]
    pub fn move_to(mut self, x: f32, y: f32, dt_ms: i64) -> Self {
        self.now_ms += dt_ms;
        self.pointer = Point::new(x, y);
        self.events.push(PointerEvent::moved(x, y, self.now_ms));
        self
    }

    /// `steps` evenly spaced moves ending at `(x, y)` after `duration_ms`.
    #[must_use]
    pub fn drag_to(mut self, x: f32, y: f32, steps: u32, duration_ms: i64) -> Self {
        let steps = steps.max(1);
        let from = self.pointer;
        let start = self.now_ms;
        for i in 1..=steps {
            let px = from.x + (x - from.x) * i as f32 / steps as f32;
            let py = from.y + (y - from.y) * i as f32 / steps as f32;
            let at = start + duration_ms * i64::from(i) / i64::from(steps);
            self.pointer = Point::new(px, py);
            self.now_ms = at;
            self.events.push(PointerEvent::moved(px, py, at));
        }
        self
    }

    /// Let `ms` pass with the pointer still.
    #[must_use]
    pub fn wait(mut self, ms: i64) -> Self {
        self.now_ms += ms;
        self
    }

    /// Release at the current pointer location.
    #[must_use]
    pub fn up(mut self) -> Self {
        self.events
            .push(PointerEvent::up(self.pointer.x, self.pointer.y, self.now_ms));
        self
    }

    /// Time of the last scripted instant.
    #[must_use]
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// The scripted events.
    #[must_use]
    pub fn build(self) -> Vec<PointerEvent> {
        self.events
    }
}

/// A press and release at `(x, y)` held for `hold_ms`.
#[must_use]
pub fn tap(x: f32, y: f32, at_ms: i64, hold_ms: i64) -> Vec<PointerEvent> {
    GestureScript::starting_at(at_ms)
        .down(x, y)
        .wait(hold_ms)
        .up()
        .build()
}

/// A quick downward swipe from `(x, y)`: 240 px in 50 ms.
#[must_use]
pub fn fling_down(x: f32, y: f32, at_ms: i64) -> Vec<PointerEvent> {
    GestureScript::starting_at(at_ms)
        .down(x, y)
        .drag_to(x, y + 240.0, 4, 40)
        .wait(10)
        .up()
        .build()
}

/// A slow drag by `(dx, dy)` held long enough to never count as a tap.
#[must_use]
pub fn slow_drag(x: f32, y: f32, dx: f32, dy: f32, at_ms: i64) -> Vec<PointerEvent> {
    GestureScript::starting_at(at_ms)
        .down(x, y)
        .drag_to(x + dx, y + dy, 20, 600)
        .wait(50)
        .up()
        .build()
}
