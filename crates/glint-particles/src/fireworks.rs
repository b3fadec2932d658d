//! Fireworks: rockets rise to a target height and explode into fading sparks

use crate::particle::{Particle, ParticleKind, ParticleStore, Spark};
use glint_core::{Color, FxRng, Transform2D, Vec2};
use glint_render::{DrawSurface, Paint, Shape};
use glint_runtime::{DrawStats, Effect, FrameContext};
use std::f32::consts::TAU;

/// Downward acceleration in px/step² at speed 1
pub const GRAVITY: f32 = 0.08;
pub const SPARK_DRAG: f32 = 0.98;
pub const MIN_SPARKS: usize = 30;
pub const MAX_SPARKS: usize = 60;
const ROCKET_SIZE: f32 = 2.0;

#[derive(Clone, Debug, PartialEq)]
pub struct FireworksConfig {
    /// Rocket launches per second while emitting
    pub rate: f32,
    pub speed: f32,
    pub colors: Vec<Color>,
}

impl Default for FireworksConfig {
    fn default() -> Self {
        Self {
            rate: 1.5,
            speed: 1.0,
            colors: vec![Color::WHITE],
        }
    }
}

pub struct FireworksEffect {
    config: FireworksConfig,
    store: ParticleStore,
    pending: f32,
    width: f32,
    height: f32,
}

impl FireworksEffect {
    pub fn new(config: FireworksConfig) -> Self {
        Self {
            config,
            store: ParticleStore::new(),
            pending: 0.0,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    pub fn rocket_count(&self) -> usize {
        self.store
            .iter()
            .filter(|p| matches!(&p.kind, ParticleKind::Spark(s) if s.rocket))
            .count()
    }

    fn gravity(&self) -> f32 {
        GRAVITY * self.config.speed
    }

    /// Launch from the bottom edge with just enough speed to peak at a random
    /// height in the upper half
    pub fn launch(&mut self, rng: &mut FxRng) {
        let x = rng.range(self.width * 0.1, self.width * 0.9);
        let target_y = rng.range(self.height * 0.15, self.height * 0.5);
        let distance = (self.height - target_y).max(0.0);
        let rise = (2.0 * self.gravity() * distance).sqrt();
        let color = rng.pick(&self.config.colors).copied().unwrap_or(Color::WHITE);
        self.store.push(Particle::new(
            Vec2::new(x, self.height),
            color,
            ParticleKind::Spark(Spark {
                velocity: Vec2::new(rng.range(-0.3, 0.3), -rise),
                life: 1.0,
                max_life: 1.0,
                size: ROCKET_SIZE,
                rocket: true,
            }),
        ));
    }

    /// Spawn a ring of sparks around `at`
    pub fn explode(&mut self, at: Vec2, color: Color, rng: &mut FxRng) {
        let count = rng.range_usize(MIN_SPARKS, MAX_SPARKS);
        for _ in 0..count {
            let velocity = Vec2::from_angle(rng.range(0.0, TAU))
                * (rng.range(1.0, 4.0) * self.config.speed);
            let life = rng.range(1.0, 1.8);
            self.store.push(Particle::new(
                at,
                color,
                ParticleKind::Spark(Spark {
                    velocity,
                    life,
                    max_life: life,
                    size: rng.range(1.5, 3.0),
                    rocket: false,
                }),
            ));
        }
        log::trace!("firework exploded into {count} sparks");
    }
}

impl Effect for FireworksEffect {
    fn resize(&mut self, width: f32, height: f32, _rng: &mut FxRng) {
        self.width = width;
        self.height = height;
    }

    fn step(&mut self, ctx: &FrameContext, rng: &mut FxRng) {
        if ctx.emitting {
            self.pending += self.config.rate * ctx.dt;
            while self.pending >= 1.0 {
                self.pending -= 1.0;
                self.launch(rng);
            }
        } else {
            self.pending = 0.0;
        }

        let gravity = self.gravity();
        let mut apexes = Vec::new();
        for p in self.store.iter_mut() {
            let ParticleKind::Spark(s) = &mut p.kind else {
                continue;
            };
            if s.rocket {
                s.velocity.y += gravity;
                p.position += s.velocity;
                if s.velocity.y >= 0.0 {
                    s.life = 0.0;
                    apexes.push((p.position, p.color));
                }
            } else {
                s.velocity.y += gravity * 0.5;
                s.velocity = s.velocity * SPARK_DRAG;
                p.position += s.velocity;
                s.life -= ctx.dt;
                p.opacity = s.life_ratio();
            }
        }

        self.store.compact(|p| match &p.kind {
            ParticleKind::Spark(s) => s.life > 0.0,
            _ => false,
        });
        for (at, color) in apexes {
            self.explode(at, color, rng);
        }
    }

    fn draw(&self, surface: &mut dyn DrawSurface, ctx: &FrameContext) -> DrawStats {
        let mut stats = DrawStats::default();
        for p in self.store.iter() {
            let ParticleKind::Spark(s) = &p.kind else {
                continue;
            };
            if !ctx.in_bounds(p.position, s.size) {
                continue;
            }
            if s.rocket {
                let tail = p.position - s.velocity * 3.0;
                stats.record(surface.stroke_polyline(&[tail, p.position], p.color, 1.5, 0.8));
            }
            stats.record(surface.fill_shape(
                Shape::Circle { radius: s.size },
                &Transform2D::at(p.position),
                Paint::Solid(p.color),
                p.opacity,
            ));
        }
        stats
    }

    /// Explode immediately at the pointer
    fn burst(&mut self, at: Vec2, rng: &mut FxRng) {
        let color = rng.pick(&self.config.colors).copied().unwrap_or(Color::WHITE);
        self.explode(at, color, rng);
    }

    fn live_count(&self) -> usize {
        self.store.len()
    }

    fn clear(&mut self) {
        self.store.clear();
        self.pending = 0.0;
    }

    fn name(&self) -> &str {
        "fireworks"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(emitting: bool) -> FrameContext {
        FrameContext {
            time: 0.0,
            dt: 1.0 / 60.0,
            width: 400.0,
            height: 300.0,
            emitting,
            progress: 2.0,
        }
    }

    fn effect() -> (FireworksEffect, FxRng) {
        let mut rng = FxRng::seeded(99);
        let mut fx = FireworksEffect::new(FireworksConfig::default());
        fx.resize(400.0, 300.0, &mut rng);
        (fx, rng)
    }

    #[test]
    fn rocket_peaks_near_target_and_explodes() {
        let (mut fx, mut rng) = effect();
        fx.launch(&mut rng);
        assert_eq!(fx.rocket_count(), 1);

        let mut highest = f32::MAX;
        for _ in 0..600 {
            if let Some(p) = fx.particles().iter().next() {
                if matches!(&p.kind, ParticleKind::Spark(s) if s.rocket) {
                    highest = highest.min(p.position.y);
                }
            }
            fx.step(&ctx(false), &mut rng);
            if fx.rocket_count() == 0 {
                break;
            }
        }
        assert_eq!(fx.rocket_count(), 0);
        assert!((MIN_SPARKS..=MAX_SPARKS).contains(&fx.live_count()));
        // Peak lands within the upper half, allowing for integration error
        assert!(highest > 300.0 * 0.15 - 10.0 && highest < 300.0 * 0.5 + 10.0);
    }

    #[test]
    fn sparks_fade_and_vanish() {
        let (mut fx, mut rng) = effect();
        fx.burst(Vec2::new(200.0, 100.0), &mut rng);
        assert!(fx.live_count() >= MIN_SPARKS);
        for _ in 0..30 {
            fx.step(&ctx(false), &mut rng);
        }
        for p in fx.particles().iter() {
            assert!(p.opacity < 1.0 && p.opacity > 0.0);
        }
        for _ in 0..120 {
            fx.step(&ctx(false), &mut rng);
        }
        assert_eq!(fx.live_count(), 0);
    }

    #[test]
    fn emission_launches_over_time() {
        let (mut fx, mut rng) = effect();
        for _ in 0..120 {
            fx.step(&ctx(true), &mut rng);
        }
        assert!(fx.live_count() > 0);
        fx.clear();
        assert_eq!(fx.live_count(), 0);
    }
}
