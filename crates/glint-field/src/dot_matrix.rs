//! Dot-matrix reveal over a displaced lattice

use crate::distortion::FieldConfig;
use crate::lattice::Lattice;
use glint_core::{Color, FxRng, Transform2D, Vec2};
use glint_particles::{Dot, Particle, ParticleKind, ParticleStore};
use glint_render::{DrawSurface, Paint, Shape};
use glint_runtime::emission::{intro_offset, reveal_opacity};
use glint_runtime::{DrawStats, Effect, FrameContext};
use serde::{Deserialize, Serialize};

/// Where the reveal sweep starts
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealOrigin {
    #[default]
    Center,
    Edges,
}

impl RevealOrigin {
    /// Distance of `p` from the origin, normalized to `[0, 1]`
    pub fn normalized_distance(&self, p: Vec2, width: f32, height: f32) -> f32 {
        let d = match self {
            RevealOrigin::Center => {
                let half_diagonal = 0.5 * (width * width + height * height).sqrt();
                p.distance(&Vec2::new(width * 0.5, height * 0.5)) / half_diagonal
            }
            RevealOrigin::Edges => {
                let edge = p.x.min(width - p.x).min(p.y).min(height - p.y).max(0.0);
                edge / (0.5 * width.min(height))
            }
        };
        if d.is_finite() {
            d.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct DotMatrixConfig {
    /// Lattice spacing in px
    pub spacing: f32,
    /// Dot radius in px
    pub dot_size: f32,
    pub origin: RevealOrigin,
    pub colors: Vec<Color>,
    pub field: FieldConfig,
    /// Opacity of a fully revealed, undisturbed dot
    pub base_opacity: f32,
}

impl Default for DotMatrixConfig {
    fn default() -> Self {
        Self {
            spacing: 12.0,
            dot_size: 1.5,
            origin: RevealOrigin::Center,
            colors: vec![Color::WHITE],
            field: FieldConfig::default(),
            base_opacity: 0.8,
        }
    }
}

pub struct DotMatrixEffect {
    config: DotMatrixConfig,
    store: ParticleStore,
    width: f32,
    height: f32,
    /// Clock time the field started, set on the first emitting step
    field_start: Option<f32>,
    field_time: f32,
    progress: f32,
}

impl DotMatrixEffect {
    pub fn new(config: DotMatrixConfig) -> Self {
        Self {
            config,
            store: ParticleStore::new(),
            width: 0.0,
            height: 0.0,
            field_start: None,
            field_time: -1.0,
            progress: 0.0,
        }
    }

    pub fn config(&self) -> &DotMatrixConfig {
        &self.config
    }

    pub fn dots(&self) -> impl Iterator<Item = (&Particle, &Dot)> + '_ {
        self.store.iter().filter_map(|p| match &p.kind {
            ParticleKind::Dot(d) => Some((p, d)),
            _ => None,
        })
    }

    /// Seconds into the field timeline, negative before the first emission
    pub fn field_time(&self) -> f32 {
        self.field_time
    }
}

impl Effect for DotMatrixEffect {
    fn resize(&mut self, width: f32, height: f32, rng: &mut FxRng) {
        self.width = width;
        self.height = height;
        let lattice = Lattice::build(
            width,
            height,
            self.config.spacing,
            self.config.field.max_displacement(),
        );

        self.store = ParticleStore::with_capacity(lattice.len());
        for &point in lattice.points() {
            let distance = self.config.origin.normalized_distance(point, width, height);
            let color = rng.pick(&self.config.colors).copied().unwrap_or(Color::WHITE);
            self.store.push(Particle::new(
                point,
                color,
                ParticleKind::Dot(Dot {
                    origin: point,
                    intro_offset: intro_offset(distance, rng.next_f32()),
                    size: self.config.dot_size,
                }),
            ));
        }
        log::debug!(
            "dot matrix lattice {}x{} ({} dots)",
            lattice.columns(),
            lattice.rows(),
            lattice.len()
        );
    }

    fn step(&mut self, ctx: &FrameContext, _rng: &mut FxRng) {
        if ctx.emitting && self.field_start.is_none() {
            self.field_start = Some(ctx.time);
        }
        self.field_time = self.field_start.map_or(-1.0, |start| ctx.time - start);
        self.progress = ctx.progress;
    }

    fn draw(&self, surface: &mut dyn DrawSurface, ctx: &FrameContext) -> DrawStats {
        let mut stats = DrawStats::default();
        let field = &self.config.field;
        for (p, dot) in self.dots() {
            let reveal = reveal_opacity(ctx.progress, dot.intro_offset);
            if reveal <= 0.0 {
                continue;
            }
            let d = field.sample(dot.origin, self.field_time, self.width, self.height);
            let position = dot.origin + d.offset;
            if !ctx.in_bounds(position, dot.size * d.size_mul) {
                continue;
            }
            let opacity = (reveal * self.config.base_opacity * d.opacity_mul).min(1.0);
            stats.record(surface.fill_shape(
                Shape::Circle {
                    radius: dot.size * d.size_mul,
                },
                &Transform2D::at(position),
                Paint::Solid(p.color),
                opacity,
            ));
        }
        stats
    }

    fn live_count(&self) -> usize {
        self.dots()
            .filter(|(_, d)| reveal_opacity(self.progress, d.intro_offset) > 0.0)
            .count()
    }

    fn clear(&mut self) {
        self.store.clear();
        self.field_start = None;
        self.field_time = -1.0;
    }

    fn name(&self) -> &str {
        "dot-matrix"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distortion::FieldKind;
    use glint_render::CommandRecorder;

    fn ctx(time: f32, progress: f32) -> FrameContext {
        FrameContext {
            time,
            dt: 1.0 / 60.0,
            width: 200.0,
            height: 100.0,
            emitting: true,
            progress,
        }
    }

    fn effect(config: DotMatrixConfig) -> (DotMatrixEffect, FxRng) {
        let mut rng = FxRng::seeded(17);
        let mut fx = DotMatrixEffect::new(config);
        fx.resize(200.0, 100.0, &mut rng);
        (fx, rng)
    }

    fn mean_distance_of_visible(fx: &DotMatrixEffect, progress: f32, origin: RevealOrigin) -> f32 {
        let visible: Vec<f32> = fx
            .dots()
            .filter(|(_, d)| reveal_opacity(progress, d.intro_offset) > 0.0)
            .map(|(_, d)| origin.normalized_distance(d.origin, 200.0, 100.0))
            .collect();
        visible.iter().sum::<f32>() / visible.len() as f32
    }

    #[test]
    fn normalized_distance_bounds() {
        let c = RevealOrigin::Center;
        assert_eq!(c.normalized_distance(Vec2::new(100.0, 50.0), 200.0, 100.0), 0.0);
        assert!((c.normalized_distance(Vec2::new(0.0, 0.0), 200.0, 100.0) - 1.0).abs() < 1e-5);
        let e = RevealOrigin::Edges;
        assert_eq!(e.normalized_distance(Vec2::new(0.0, 40.0), 200.0, 100.0), 0.0);
        assert!((e.normalized_distance(Vec2::new(100.0, 50.0), 200.0, 100.0) - 1.0).abs() < 1e-5);
        assert_eq!(e.normalized_distance(Vec2::new(-10.0, 50.0), 200.0, 100.0), 0.0);
    }

    #[test]
    fn reveal_sweeps_from_origin() {
        for origin in [RevealOrigin::Center, RevealOrigin::Edges] {
            let (fx, _) = effect(DotMatrixConfig {
                origin,
                ..Default::default()
            });
            let early = mean_distance_of_visible(&fx, 0.6, origin);
            let all = mean_distance_of_visible(&fx, 2.0, origin);
            assert!(early < all, "{origin:?}: {early} >= {all}");
        }
    }

    #[test]
    fn nothing_drawn_before_reveal() {
        let (mut fx, mut rng) = effect(DotMatrixConfig::default());
        fx.step(&ctx(0.0, 0.0), &mut rng);
        let mut rec = CommandRecorder::new();
        assert_eq!(fx.draw(&mut rec, &ctx(0.0, 0.0)).drawn, 0);
        assert_eq!(fx.live_count(), 0);

        fx.step(&ctx(1.0, 2.0), &mut rng);
        assert_eq!(fx.live_count(), fx.store.len());
    }

    #[test]
    fn lattice_is_padded_for_field() {
        let (plain, _) = effect(DotMatrixConfig::default());
        let (padded, _) = effect(DotMatrixConfig {
            field: FieldConfig {
                kind: FieldKind::Ripple,
                intensity: 2.0,
                ..Default::default()
            },
            ..Default::default()
        });
        assert!(padded.store.len() > plain.store.len());
        let min_x = padded
            .dots()
            .map(|(_, d)| d.origin.x)
            .fold(f32::MAX, f32::min);
        assert_eq!(min_x, -24.0);
    }

    #[test]
    fn field_clock_starts_with_emission() {
        let (mut fx, mut rng) = effect(DotMatrixConfig {
            field: FieldConfig {
                kind: FieldKind::Ripple,
                duration: 1.0,
                ..Default::default()
            },
            ..Default::default()
        });
        let mut idle = ctx(5.0, 0.0);
        idle.emitting = false;
        fx.step(&idle, &mut rng);
        assert!(fx.field_time() < 0.0);

        fx.step(&ctx(6.0, 2.0), &mut rng);
        fx.step(&ctx(6.3, 2.0), &mut rng);
        assert!((fx.field_time() - 0.3).abs() < 1e-5);

        // Mid-sweep some dots are displaced and enlarged
        let mut rec = CommandRecorder::new();
        fx.draw(&mut rec, &ctx(6.3, 2.0));
        assert!(rec.fills().any(|(shape, _, _)| match shape {
            Shape::Circle { radius } => *radius > 1.5 + 0.1,
            _ => false,
        }));
    }
}
