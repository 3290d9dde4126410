#![forbid(unsafe_code)]

//! Canned interaction scenarios with JSON reports.
//!
//! Each [`Scenario`] drives a [`Fixture`] through one interaction and
//! summarizes the outcome. The replay binary prints one report per line:
//!
//! ```json
//! {"event":"replay","scenario":"drag","frames":26,"x":-490.0,"y":300.0,"destroyed":false,...}
//! ```

use magnet::{AnimatorStats, Point, ScreenBounds};
use serde_json::{Value, json};
use tracing::{debug, info, info_span};

use crate::fixture::Fixture;
use crate::script;

/// A canned interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Quick press and release on the docked icon.
    Tap,
    /// Slow drag across the screen, then release and snap.
    Drag,
    /// Fast downward swipe that dismisses the icon.
    Fling,
    /// Portrait to landscape while docked.
    Rotate,
}

impl Scenario {
    /// Every scenario, in replay order.
    pub const ALL: [Self; 4] = [Self::Tap, Self::Drag, Self::Fling, Self::Rotate];

    /// Parse a scenario name (case-insensitive).
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "tap" | "click" => Some(Self::Tap),
            "drag" => Some(Self::Drag),
            "fling" | "dismiss" => Some(Self::Fling),
            "rotate" | "rotation" => Some(Self::Rotate),
            _ => None,
        }
    }

    /// Stable name used in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tap => "tap",
            Self::Drag => "drag",
            Self::Fling => "fling",
            Self::Rotate => "rotate",
        }
    }
}

/// Outcome of one replayed scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplayReport {
    pub scenario: Scenario,
    pub frames: usize,
    pub final_position: Point,
    pub destroyed: bool,
    pub clicks: usize,
    pub flings: usize,
    pub moves: usize,
    pub stats: AnimatorStats,
}

impl ReplayReport {
    /// Serialize as one JSONL record.
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "event": "replay",
            "scenario": self.scenario.name(),
            "frames": self.frames,
            "x": self.final_position.x,
            "y": self.final_position.y,
            "destroyed": self.destroyed,
            "clicks": self.clicks,
            "flings": self.flings,
            "moves": self.moves,
            "animations_started": self.stats.started,
            "animations_completed": self.stats.completed,
            "ticks_applied": self.stats.ticks_applied,
            "ticks_dropped": self.stats.ticks_dropped,
        })
    }
}

/// Run `scenario` on a fresh phone fixture.
#[must_use]
pub fn run(scenario: Scenario) -> ReplayReport {
    let _span = info_span!("magnet.replay", scenario = scenario.name()).entered();
    let mut fixture = Fixture::phone();
    let mut frames = fixture.show_settled();
    fixture.log.clear();

    let start = fixture.now_ms() + 1_000;
    match scenario {
        Scenario::Tap => {
            fixture.feed(&script::tap(600.0, 900.0, start, 80));
        }
        Scenario::Drag => {
            fixture.feed(&script::slow_drag(1_000.0, 960.0, -700.0, 300.0, start));
        }
        Scenario::Fling => {
            fixture.feed(&script::fling_down(1_000.0, 600.0, start));
        }
        Scenario::Rotate => {
            fixture.surface.set_screen(ScreenBounds::new(1920, 1080));
            fixture.magnet.on_display_changed();
        }
    }
    frames += fixture.settle();
    debug!(frames, "scenario settled");

    let report = ReplayReport {
        scenario,
        frames,
        final_position: fixture.magnet.position(),
        destroyed: fixture.magnet.is_destroyed(),
        clicks: fixture.log.clicks(),
        flings: fixture.log.flings(),
        moves: fixture.log.moves().len(),
        stats: fixture.magnet.animator_stats(),
    };
    info!(
        x = report.final_position.x,
        y = report.final_position.y,
        destroyed = report.destroyed,
        "replay finished"
    );
    report
}
