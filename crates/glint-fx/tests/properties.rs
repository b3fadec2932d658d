//! Properties that must hold for any seed

use glint_core::{Color, FxRng};
use glint_lightning::{branch_segments_drawn, generate_bolt, BoltParams, Branch};
use glint_particles::{Flake, ParticleKind, WeatherConfig, WeatherEffect, WeatherKind};
use glint_runtime::emission::reveal_opacity;
use glint_runtime::{Effect, EmissionController, FrameContext, TriggerPolicy};
use proptest::prelude::*;

fn weather_kind() -> impl Strategy<Value = WeatherKind> {
    prop_oneof![
        Just(WeatherKind::Rain),
        Just(WeatherKind::Snow),
        Just(WeatherKind::Leaves),
    ]
}

fn check_branch(branch: &Branch, params: &BoltParams) -> usize {
    assert!(branch.depth <= params.max_depth);
    assert!(branch.segment_count() >= params.min_segments);
    assert!(branch.segment_count() <= params.max_segments);
    1 + branch
        .children
        .iter()
        .map(|c| check_branch(c, params))
        .sum::<usize>()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn bolt_generation_is_bounded(seed in any::<u64>(), x in 0.0f32..800.0, end_y in 0.0f32..1500.0) {
        let params = BoltParams::default();
        let mut rng = FxRng::seeded(seed);
        let bolt = generate_bolt(x, end_y, 3.0, Color::WHITE, &params, &mut rng);

        prop_assert!(bolt.points.last().map_or(false, |p| p.y >= end_y));
        prop_assert!(bolt.max_depth() <= params.max_depth);

        let total: usize = bolt.branches.iter().map(|b| check_branch(b, &params)).sum();
        prop_assert_eq!(total, bolt.branch_count());
        // At most one branch per vertex per level: 1 + 6 + 36 branches per main vertex
        prop_assert!(total <= bolt.points.len() * 43);
    }

    #[test]
    fn branch_reveal_follows_parent(len in 1usize..8, start in 0usize..40, steps in 1usize..60) {
        let mut previous = 0;
        for parent in 0..steps {
            let drawn = branch_segments_drawn(len, parent, start);
            prop_assert!(drawn >= previous);
            prop_assert!(drawn <= len);
            previous = drawn;
        }
    }

    #[test]
    fn weather_pool_is_conserved(
        seed in any::<u64>(),
        kind in weather_kind(),
        count in 1usize..120,
        angle in -60.0f32..60.0,
        speed in 0.2f32..3.0,
    ) {
        let mut rng = FxRng::seeded(seed);
        let mut effect = WeatherEffect::new(WeatherConfig {
            kind,
            count,
            speed,
            angle,
            ..Default::default()
        });
        effect.resize(320.0, 240.0, &mut rng);
        for step in 0..300 {
            let ctx = FrameContext {
                time: step as f32 / 60.0,
                dt: 1.0 / 60.0,
                width: 320.0,
                height: 240.0,
                emitting: true,
                progress: 2.0,
            };
            effect.step(&ctx, &mut rng);
            prop_assert_eq!(effect.live_count(), count);
        }
    }

    #[test]
    fn nearer_particles_are_bigger_and_faster(
        seed in any::<u64>(),
        leaves in any::<bool>(),
    ) {
        let mut rng = FxRng::seeded(seed);
        let mut effect = WeatherEffect::new(WeatherConfig {
            kind: if leaves { WeatherKind::Leaves } else { WeatherKind::Snow },
            count: 60,
            ..Default::default()
        });
        effect.resize(320.0, 240.0, &mut rng);
        let mut flakes: Vec<Flake> = effect
            .particles()
            .iter()
            .filter_map(|p| match &p.kind {
                ParticleKind::Flake(f) => Some(f.clone()),
                ParticleKind::Leaf(l) => Some(l.drift.clone()),
                _ => None,
            })
            .collect();
        flakes.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        for pair in flakes.windows(2) {
            prop_assert!(pair[1].size >= pair[0].size);
            prop_assert!(pair[1].speed >= pair[0].speed);
        }
    }

    #[test]
    fn reveal_hide_resume_is_continuous(
        t1 in 0.0f64..2.0,
        t2 in 0.0f64..1.0,
        intro in 0.0f32..1.3,
    ) {
        let mut emission = EmissionController::new(TriggerPolicy::Hover);
        emission.start(0.0);
        emission.update(t1);

        let before_stop = emission.progress_at(t1);
        emission.stop(t1);
        let after_stop = emission.progress_at(t1);
        prop_assert!((reveal_opacity(before_stop, intro) - reveal_opacity(after_stop, intro)).abs() < 1e-3);

        let resume = t1 + t2;
        emission.update(resume);
        let before_start = emission.progress_at(resume);
        emission.start(resume);
        let after_start = emission.progress_at(resume);
        prop_assert!((reveal_opacity(before_start, intro) - reveal_opacity(after_start, intro)).abs() < 1e-3);
    }
}
