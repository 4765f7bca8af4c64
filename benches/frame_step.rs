//! # Frame Step Benchmark
//!
//! Measures one full frame (advance, dots, pair links, pointer links)
//! against a recording canvas. The pair pass is quadratic, so the larger
//! counts show how quickly it comes to dominate.
//!
//! Run with: `cargo bench --bench frame_step`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plexus::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn frame_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_step");

    for count in [40usize, 100, 400] {
        let config = FieldConfig {
            particle_count: count,
            ..FieldConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(count as u64);
        let field = Field::spawn(&config, 1920.0, 1080.0, &mut rng);
        let mut frame_loop = FrameLoop::new(field, Recorder::new(), config);
        frame_loop.pointer_moved(Vec2::new(960.0, 540.0));

        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                frame_loop.canvas_mut().take();
                black_box(frame_loop.frame())
            })
        });
    }

    group.finish();
}

criterion_group!(benches, frame_step);
criterion_main!(benches);
