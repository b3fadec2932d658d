use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use glint_core::{Color, FxRng};
use glint_fx::{EffectConfig, EffectHandle, EffectKind, FieldConfig, FieldKind, TriggerEvent};
use glint_lightning::{generate_bolt, BoltParams};
use std::hint::black_box;

const FRAME: f64 = 1.0 / 60.0;

fn warmed_handle(config: &EffectConfig) -> EffectHandle {
    let mut handle = EffectHandle::headless(config);
    handle
        .resize(640.0, 360.0, 1.0)
        .expect("valid bench surface");
    handle.handle_event(TriggerEvent::Mount, 0.0);
    for frame in 0..=60 {
        handle.tick(frame as f64 * FRAME);
    }
    handle
}

fn tick_benchmark(c: &mut Criterion) {
    let cases = [
        (
            "rain_500",
            EffectConfig {
                intensity: 500.0,
                seed: Some(1),
                ..EffectConfig::new(EffectKind::Rain)
            },
        ),
        (
            "leaves_200",
            EffectConfig {
                intensity: 200.0,
                seed: Some(1),
                ..EffectConfig::new(EffectKind::Leaves)
            },
        ),
        (
            "dot_matrix_ripple",
            EffectConfig {
                seed: Some(1),
                field: FieldConfig {
                    kind: FieldKind::Ripple,
                    repeat: true,
                    ..Default::default()
                },
                ..EffectConfig::new(EffectKind::DotMatrix)
            },
        ),
    ];

    for (name, config) in cases {
        c.bench_function(&format!("tick_{name}"), |b| {
            let mut handle = warmed_handle(&config);
            let mut now = 1.0;
            b.iter(|| {
                now += FRAME;
                black_box(handle.tick(black_box(now)));
            })
        });
    }
}

fn bolt_benchmark(c: &mut Criterion) {
    let params = BoltParams::default();
    c.bench_function("generate_bolt_720px", |b| {
        b.iter_batched(
            || FxRng::seeded(7),
            |mut rng| {
                black_box(generate_bolt(
                    320.0,
                    black_box(720.0),
                    3.0,
                    Color::WHITE,
                    &params,
                    &mut rng,
                ))
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, tick_benchmark, bolt_benchmark);
criterion_main!(benches);
