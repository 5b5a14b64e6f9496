//! Benchmarks for the per-frame simulation cost.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use skyburst::prelude::*;

/// A simulation mid-show: several shells in flight plus fragment clouds
/// from recent detonations.
fn busy_sim(seed: u64) -> (Fireworks, PixelCanvas) {
    let mut sim = Fireworks::new(1280, 720).with_seed(seed);
    let mut canvas = PixelCanvas::new(1280, 720);
    for _ in 0..20 {
        sim.spawn_launch();
    }
    for _ in 0..120 {
        sim.tick(&mut canvas);
    }
    (sim, canvas)
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    group.bench_function("empty", |b| {
        let mut sim = Fireworks::new(1280, 720).with_seed(1);
        let mut canvas = PixelCanvas::new(1280, 720);
        b.iter(|| sim.tick(black_box(&mut canvas)))
    });

    group.bench_function("mid_show", |b| {
        b.iter_batched(
            || busy_sim(7),
            |(mut sim, mut canvas)| sim.tick(black_box(&mut canvas)),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("canvas");

    group.bench_function("fade_720p", |b| {
        let mut canvas = PixelCanvas::new(1280, 720);
        b.iter(|| canvas.fade(black_box([10, 0, 51]), 0.1))
    });

    group.bench_function("fill_circle", |b| {
        let mut canvas = PixelCanvas::new(1280, 720);
        b.iter(|| canvas.fill_circle(black_box(Vec2::new(640.0, 360.0)), 3.0, [255, 128, 0], 1.0))
    });

    group.finish();
}

criterion_group!(benches, bench_tick, bench_draw);
criterion_main!(benches);
