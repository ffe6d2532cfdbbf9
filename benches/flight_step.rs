use avatar_flight::motion::{DampingMode, FlightController, FlightTuning};
use avatar_flight::render::{Scene, SceneFrame};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;

const DELTA: f32 = 1.0 / 60.0;

/// Benchmark: one controller step with a moving target
fn bench_flight_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("flight_step");

    let modes = [
        ("per_frame", DampingMode::PerFrame),
        ("frame_rate_independent", DampingMode::FrameRateIndependent { reference_rate: 60.0 }),
    ];

    for (name, mode) in modes {
        let tuning = FlightTuning {
            damping_mode: mode,
            ..FlightTuning::default()
        };
        group.bench_function(name, |b| {
            let mut controller = FlightController::new(tuning);
            let mut t = 0.0f32;
            b.iter(|| {
                t += DELTA;
                let progress = (t * 0.1).fract();
                black_box(controller.step(black_box(progress), t, DELTA))
            })
        });
    }

    group.finish();
}

/// Benchmark: a full canvas frame at common window sizes
fn bench_scene_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_render");

    for &(width, height) in [(640u32, 400u32), (1280, 800), (1920, 1080)].iter() {
        let mut scene = Scene::new(width, height);
        let mut controller = FlightController::default();
        let mut t = 0.0f32;

        group.bench_with_input(
            BenchmarkId::new("resolution", format!("{width}x{height}")),
            &(width, height),
            |b, _| {
                b.iter(|| {
                    t += DELTA;
                    let frame = SceneFrame {
                        flight: controller.step(0.3, t, DELTA),
                        turntable: Vec2::new(0.1, t * 0.5),
                        glow: 1.0,
                        scroll_pages: 0.2,
                        progress: 0.3,
                        loading: None,
                        revealed: 10.0,
                    };
                    black_box(scene.render(&frame).as_bytes().len())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_flight_step, bench_scene_render);
criterion_main!(benches);
