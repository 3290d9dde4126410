//! Benchmark: easing tick recurrence and gesture classification.
//!
//! Run with: `cargo bench -p magnet-core --bench tick_bench`

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use magnet_core::animation::PositionAnimator;
use magnet_core::event::PointerEvent;
use magnet_core::geometry::Point;
use magnet_core::gesture::{GestureClassifier, GestureConfig};

fn bench_ease(c: &mut Criterion) {
    c.bench_function("ease_full_window_16ms", |b| {
        b.iter(|| {
            let mut anim = PositionAnimator::default();
            let token = anim.start(black_box(Point::new(500.0, -300.0)), 0);
            let mut pos = Point::ORIGIN;
            let mut now = 0;
            while let Some(step) = anim.step(token, pos, now) {
                pos = pos.offset(step.dx, step.dy);
                if step.finished {
                    break;
                }
                now += 16;
            }
            black_box(pos)
        });
    });
}

fn bench_classifier(c: &mut Criterion) {
    let mut events = vec![PointerEvent::down(0.0, 0.0, 0)];
    events.extend((1..120).map(|i| PointerEvent::moved(i as f32 * 2.0, i as f32, i * 8)));
    events.push(PointerEvent::up(240.0, 120.0, 968));

    for (name, fling) in [("classify_drag", false), ("classify_drag_with_fling", true)] {
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut gc = GestureClassifier::new(GestureConfig::default(), fling);
                for ev in &events {
                    black_box(gc.process(ev));
                }
            });
        });
    }
}

criterion_group!(benches, bench_ease, bench_classifier);
criterion_main!(benches);
