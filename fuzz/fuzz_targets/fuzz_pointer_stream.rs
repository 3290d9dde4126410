#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use magnet::{PointerAction, PointerEvent, ScreenBounds};
use magnet_harness::Fixture;

#[derive(Debug, Arbitrary)]
enum Step {
    Pointer { action: u8, x: i16, y: i16, dt: u8 },
    Frames(u8),
    SetPosition { x: i16, y: i16, animate: bool },
    Rotate,
    Destroy,
}

#[derive(Debug, Arbitrary)]
struct Input {
    stick_to_wall: bool,
    fling_away: bool,
    responsive: bool,
    steps: Vec<Step>,
}

fuzz_target!(|input: Input| {
    let mut fx = Fixture::phone_with(|b| {
        b.stick_to_wall(input.stick_to_wall)
            .fling_away(input.fling_away)
            .removal_zone_responsive(input.responsive)
    });
    fx.magnet.show();
    let mut now = 0i64;

    for step in input.steps.iter().take(512) {
        match *step {
            Step::Pointer { action, x, y, dt } => {
                now += i64::from(dt);
                let action = match action % 3 {
                    0 => PointerAction::Down,
                    1 => PointerAction::Move,
                    _ => PointerAction::Up,
                };
                fx.feed(&[PointerEvent::new(action, f32::from(x), f32::from(y), now)]);
            }
            Step::Frames(n) => {
                for _ in 0..n % 32 {
                    fx.frame();
                }
            }
            Step::SetPosition { x, y, animate } => {
                let _ = fx.magnet.set_position((i32::from(x), i32::from(y)), animate);
            }
            Step::Rotate => {
                let b = fx.magnet.screen_bounds();
                fx.surface.set_screen(ScreenBounds::new(b.height, b.width));
                fx.magnet.on_display_changed();
            }
            Step::Destroy => fx.magnet.destroy(),
        }

        // Post-conditions that must always hold:
        let zone_visible = fx.magnet.removal_zone().is_visible();
        assert!(!zone_visible || fx.magnet.is_dragging(), "zone visible outside a press");
        assert!(!zone_visible || input.fling_away, "zone visible with fling-away off");
        assert!(fx.log.destroyed() <= 1, "destroyed notified twice");
        assert!(fx.log.flings() <= 1, "flung away twice");
        if fx.magnet.is_destroyed() {
            assert!(!fx.surface.is_attached(), "destroyed magnet still attached");
        }
    }
});
