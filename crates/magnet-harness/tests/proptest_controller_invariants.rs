//! Property tests for controller-level invariants.
//!
//! Fling-away is disabled where a random position could otherwise land in
//! the capture box and end the run early.

use magnet::Point;
use magnet_harness::Fixture;
use magnet_harness::script::{self, GestureScript};
use proptest::prelude::*;

fn docked(fling_away: bool) -> Fixture {
    let mut fx = Fixture::phone_with(|b| b.fling_away(fling_away));
    fx.show_settled();
    fx
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // ═══════════════════════════════════════════════════════════════════
    // Commit exactness
    // ═══════════════════════════════════════════════════════════════════

    #[test]
    fn move_commits_exact_sum(
        x in -800i32..800,
        y in -800i32..800,
        dx in -400.0f32..400.0,
        dy in -400.0f32..400.0,
    ) {
        let mut fx = docked(false);
        fx.magnet.set_position((x, y), false).unwrap();
        let before = fx.magnet.position();

        fx.magnet.move_by(dx, dy);

        let expected = Point::new(before.x + dx, before.y + dy);
        prop_assert_eq!(fx.magnet.position(), expected);
        prop_assert_eq!(fx.surface.last_layout(), Some(expected));
        prop_assert_eq!(fx.log.moves().last().copied(), Some(expected));
    }

    // ═══════════════════════════════════════════════════════════════════
    // Tap classification
    // ═══════════════════════════════════════════════════════════════════

    #[test]
    fn click_iff_press_shorter_than_threshold(hold in 0i64..500) {
        let mut fx = docked(true);
        let start = fx.now_ms() + 1_000;
        fx.feed(&script::tap(300.0, 300.0, start, hold));
        prop_assert_eq!(fx.log.clicks(), usize::from(hold < 200));
    }

    // ═══════════════════════════════════════════════════════════════════
    // Wall snap
    // ═══════════════════════════════════════════════════════════════════

    #[test]
    fn release_snaps_one_axis_onto_a_wall(dx in -1_500i32..1_500, dy in -1_500i32..1_500) {
        let mut fx = docked(false);
        let events = GestureScript::starting_at(fx.now_ms() + 1_000)
            .down(0.0, 0.0)
            .drag_to(dx as f32, dy as f32, 1, 400)
            .wait(300)
            .up()
            .build();
        fx.feed(&events);
        let released = fx.magnet.position();
        fx.settle();
        let rest = fx.magnet.position();
        let half = fx.magnet.half_extents();

        let on_vertical_wall = rest.x.abs() == half.half_width && rest.y == released.y;
        let on_horizontal_wall = rest.y.abs() == half.half_height && rest.x == released.x;
        prop_assert!(on_vertical_wall || on_horizontal_wall, "released {:?}, rested {:?}", released, rest);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Animation
    // ═══════════════════════════════════════════════════════════════════

    #[test]
    fn animation_converges_on_last_target(
        first in (-400i32..400, -800i32..800),
        second in (-400i32..400, -800i32..800),
        frames_between in 0usize..20,
    ) {
        let mut fx = docked(false);
        fx.magnet.set_position(first, true).unwrap();
        for _ in 0..frames_between {
            fx.frame();
        }
        fx.magnet.set_position(second, true).unwrap();
        fx.settle();

        let target = Point::from(second);
        let pos = fx.magnet.position();
        prop_assert!((pos.x - target.x).abs() < 1e-3 && (pos.y - target.y).abs() < 1e-3,
            "ended at {:?}, expected {:?}", pos, target);
        prop_assert!(!fx.magnet.has_pending_frame());
    }
}
