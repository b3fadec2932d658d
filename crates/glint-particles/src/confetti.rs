//! Confetti: a continuous shower from the top edge plus pointer bursts

use crate::curves::hold_then_fade;
use crate::particle::{ConfettiPiece, ConfettiShape, Particle, ParticleKind, ParticleStore};
use glint_core::{Color, FxRng, Transform2D, Vec2};
use glint_render::{DrawSurface, Paint, Shape};
use glint_runtime::{DrawStats, Effect, FrameContext};
use std::f32::consts::{FRAC_PI_2, PI};

/// Horizontal velocity multiplier applied every step
pub const CONFETTI_DRAG: f32 = 0.99;
/// Fraction of a piece's lifetime spent at full opacity
pub const CONFETTI_HOLD: f32 = 0.7;
/// Half-width of the upward burst fan, in radians
pub const BURST_SPREAD: f32 = 0.9;
/// Hard ceiling on simultaneously simulated pieces
pub const MAX_PIECES: usize = 4000;

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiConfig {
    /// Pieces per second while emitting
    pub rate: f32,
    pub speed: f32,
    /// Pieces per pointer burst
    pub burst_count: usize,
    pub colors: Vec<Color>,
}

impl Default for ConfettiConfig {
    fn default() -> Self {
        Self {
            rate: 40.0,
            speed: 1.0,
            burst_count: 80,
            colors: vec![Color::WHITE],
        }
    }
}

/// Dynamically spawned pieces, compacted away once expired or off-surface
pub struct ConfettiEffect {
    config: ConfettiConfig,
    store: ParticleStore,
    /// Fractional pieces owed to the emitter
    pending: f32,
    width: f32,
    height: f32,
}

impl ConfettiEffect {
    pub fn new(config: ConfettiConfig) -> Self {
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

    fn piece(&self, rng: &mut FxRng, velocity: Vec2) -> ConfettiPiece {
        let shape = rng
            .pick(&ConfettiShape::ALL)
            .copied()
            .unwrap_or(ConfettiShape::Rectangle);
        ConfettiPiece {
            velocity,
            gravity: rng.range(0.05, 0.1) * self.config.speed,
            rotation: rng.range(0.0, 2.0 * PI),
            spin: rng.range(-0.2, 0.2),
            shape,
            size: rng.range(6.0, 12.0),
            age: 0.0,
            lifetime: rng.range(3.0, 6.0),
        }
    }

    fn push(&mut self, position: Vec2, piece: ConfettiPiece, rng: &mut FxRng) {
        if self.store.len() >= MAX_PIECES {
            return;
        }
        let color = rng.pick(&self.config.colors).copied().unwrap_or(Color::WHITE);
        self.store
            .push(Particle::new(position, color, ParticleKind::Confetti(piece)));
    }

    fn shower(&mut self, rng: &mut FxRng) {
        let speed = self.config.speed;
        let velocity = Vec2::new(rng.range(-1.0, 1.0), rng.range(1.0, 3.0)) * speed;
        let piece = self.piece(rng, velocity);
        let at = Vec2::new(rng.range(0.0, self.width), -piece.size);
        self.push(at, piece, rng);
    }
}

fn shape_of(piece: &ConfettiPiece) -> Shape {
    match piece.shape {
        ConfettiShape::Rectangle => Shape::Rect {
            width: piece.size,
            height: piece.size * 0.6,
        },
        ConfettiShape::Circle => Shape::Circle {
            radius: piece.size * 0.4,
        },
        ConfettiShape::Triangle => Shape::Triangle { size: piece.size },
    }
}

impl Effect for ConfettiEffect {
    fn resize(&mut self, width: f32, height: f32, _rng: &mut FxRng) {
        self.width = width;
        self.height = height;
    }

    fn step(&mut self, ctx: &FrameContext, rng: &mut FxRng) {
        if ctx.emitting {
            self.pending += self.config.rate * ctx.dt;
            while self.pending >= 1.0 {
                self.pending -= 1.0;
                self.shower(rng);
            }
        } else {
            self.pending = 0.0;
        }

        for p in self.store.iter_mut() {
            if let ParticleKind::Confetti(c) = &mut p.kind {
                c.velocity.y += c.gravity;
                c.velocity.x *= CONFETTI_DRAG;
                p.position += c.velocity;
                c.rotation += c.spin;
                c.age += ctx.dt;
                p.opacity = hold_then_fade(c.age, c.lifetime, CONFETTI_HOLD);
            }
        }

        let (w, h) = (self.width, self.height);
        self.store.compact(|p| match &p.kind {
            ParticleKind::Confetti(c) => {
                c.age < c.lifetime
                    && p.position.y - c.size <= h
                    && p.position.x >= -c.size * 4.0
                    && p.position.x <= w + c.size * 4.0
            }
            _ => false,
        });
    }

    fn draw(&self, surface: &mut dyn DrawSurface, _ctx: &FrameContext) -> DrawStats {
        let mut stats = DrawStats::default();
        for p in self.store.iter() {
            if let ParticleKind::Confetti(c) = &p.kind {
                stats.record(surface.fill_shape(
                    shape_of(c),
                    &Transform2D::at(p.position).with_rotation(c.rotation),
                    Paint::Solid(p.color),
                    p.opacity,
                ));
            }
        }
        stats
    }

    /// Fan of pieces shot upward from `at`
    fn burst(&mut self, at: Vec2, rng: &mut FxRng) {
        for _ in 0..self.config.burst_count {
            let angle = -FRAC_PI_2 + rng.range(-BURST_SPREAD, BURST_SPREAD);
            let velocity = Vec2::from_angle(angle) * (rng.range(4.0, 10.0) * self.config.speed);
            let piece = self.piece(rng, velocity);
            self.push(at, piece, rng);
        }
        log::debug!("confetti burst at ({:.0}, {:.0})", at.x, at.y);
    }

    fn live_count(&self) -> usize {
        self.store.len()
    }

    fn clear(&mut self) {
        self.store.clear();
        self.pending = 0.0;
    }

    fn name(&self) -> &str {
        "confetti"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_render::CommandRecorder;

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

    fn effect(config: ConfettiConfig) -> (ConfettiEffect, FxRng) {
        let mut rng = FxRng::seeded(21);
        let mut fx = ConfettiEffect::new(config);
        fx.resize(400.0, 300.0, &mut rng);
        (fx, rng)
    }

    #[test]
    fn emits_at_configured_rate() {
        let (mut fx, mut rng) = effect(ConfettiConfig {
            rate: 60.0,
            ..Default::default()
        });
        for _ in 0..30 {
            fx.step(&ctx(true), &mut rng);
        }
        // One piece per step at 60/s; none can have expired within half a second
        assert!((29..=30).contains(&fx.live_count()));
    }

    #[test]
    fn burst_fans_upward() {
        let (mut fx, mut rng) = effect(ConfettiConfig {
            burst_count: 50,
            ..Default::default()
        });
        fx.burst(Vec2::new(200.0, 250.0), &mut rng);
        assert_eq!(fx.live_count(), 50);
        for p in fx.particles().iter() {
            if let ParticleKind::Confetti(c) = &p.kind {
                assert!(c.velocity.y < 0.0);
                assert!(c.velocity.length() >= 4.0 - 1e-4);
            }
        }
    }

    #[test]
    fn pieces_expire_without_emission() {
        let (mut fx, mut rng) = effect(ConfettiConfig::default());
        fx.burst(Vec2::new(200.0, 150.0), &mut rng);
        for _ in 0..(60 * 7) {
            fx.step(&ctx(false), &mut rng);
        }
        assert_eq!(fx.live_count(), 0);
    }

    #[test]
    fn drag_slows_horizontal_motion() {
        let (mut fx, mut rng) = effect(ConfettiConfig {
            burst_count: 1,
            ..Default::default()
        });
        fx.burst(Vec2::new(200.0, 150.0), &mut rng);
        let vx = |fx: &ConfettiEffect| match &fx.particles().as_slice()[0].kind {
            ParticleKind::Confetti(c) => c.velocity.x,
            _ => unreachable!(),
        };
        let before = vx(&fx);
        fx.step(&ctx(false), &mut rng);
        assert!((vx(&fx) - before * CONFETTI_DRAG).abs() < 1e-5);
    }

    #[test]
    fn draws_every_piece() {
        let (mut fx, mut rng) = effect(ConfettiConfig {
            burst_count: 12,
            ..Default::default()
        });
        fx.burst(Vec2::new(100.0, 100.0), &mut rng);
        let mut rec = CommandRecorder::new();
        let stats = fx.draw(&mut rec, &ctx(true));
        assert_eq!(stats.drawn, 12);
        assert_eq!(rec.fills().count(), 12);
    }
}
