//! Ambient weather: rain, snow and falling leaves over a fixed particle pool

use crate::curves::{flip_scale, lerp_f32};
use crate::particle::{Flake, Leaf, Particle, ParticleKind, ParticleStore, Raindrop};
use glint_core::{Color, FxRng, Transform2D, Vec2};
use glint_render::{DrawSurface, Paint, Shape};
use glint_runtime::{DrawStats, Effect, FrameContext};
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Leaves never squash thinner than this fraction of their width
pub const LEAF_MIN_FLIP_SCALE: f32 = 0.2;
/// Horizontal slack before a particle counts as off-surface
const SIDE_MARGIN: f32 = 60.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherKind {
    Rain,
    Snow,
    Leaves,
}

#[derive(Clone, Debug, PartialEq)]
pub struct WeatherConfig {
    pub kind: WeatherKind,
    /// Pool size
    pub count: usize,
    /// Speed multiplier
    pub speed: f32,
    /// Fall direction in degrees from vertical, positive drifts right
    pub angle: f32,
    pub colors: Vec<Color>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            kind: WeatherKind::Rain,
            count: 100,
            speed: 1.0,
            angle: 0.0,
            colors: vec![Color::WHITE],
        }
    }
}

/// Fixed-pool weather effect. While emitting, every particle that leaves the
/// surface is respawned at the top in the same step; otherwise it is parked.
pub struct WeatherEffect {
    config: WeatherConfig,
    store: ParticleStore,
    /// Unit fall direction computed once from the angle: `(sin, cos)`
    direction: Vec2,
    width: f32,
    height: f32,
    /// Set by the first emitting step, which spreads the parked pool over the surface
    primed: bool,
}

impl WeatherEffect {
    pub fn new(config: WeatherConfig) -> Self {
        let angle = config.angle.to_radians();
        let direction = Vec2::new(angle.sin(), angle.cos());
        Self {
            store: ParticleStore::with_capacity(config.count),
            config,
            direction,
            width: 0.0,
            height: 0.0,
            primed: false,
        }
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    pub fn particles(&self) -> &ParticleStore {
        &self.store
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// Horizontal band particles live in, widened upwind so angled rain still covers the surface
    fn lateral_band(&self) -> (f32, f32) {
        let shift = if self.direction.y > 0.05 {
            self.height * self.direction.x / self.direction.y
        } else {
            0.0
        };
        ((-shift).min(0.0), self.width + (-shift).max(0.0))
    }

    fn lateral(&self, rng: &mut FxRng) -> f32 {
        let (left, right) = self.lateral_band();
        rng.range(left, right)
    }

    fn spawn(&self, rng: &mut FxRng, initial: bool) -> Particle {
        let color = rng.pick(&self.config.colors).copied().unwrap_or(Color::WHITE);
        let h = self.height;
        let speed = self.config.speed;
        match self.config.kind {
            WeatherKind::Rain => {
                let length = rng.range(10.0, 20.0);
                let fall = rng.range(8.0, 14.0) * speed;
                let alpha = rng.range(0.3, 0.7);
                let y = if initial {
                    rng.range(-h, h)
                } else {
                    -length - rng.range(0.0, h * 0.1)
                };
                let mut p = Particle::new(
                    Vec2::new(self.lateral(rng), y),
                    color,
                    ParticleKind::Drop(Raindrop {
                        length,
                        thickness: rng.range(1.0, 2.0),
                        velocity: self.direction * fall,
                        alpha,
                    }),
                );
                p.opacity = alpha;
                p
            }
            WeatherKind::Snow => {
                let flake = self.flake(rng, 1.0, 4.0, 0.4, 1.6, (4.0, 16.0), (0.2, 0.6));
                let y = self.entry_y(rng, initial, flake.size * 2.0);
                let mut p = Particle::new(Vec2::new(flake.anchor_x, y), color, ParticleKind::Flake(flake.clone()));
                p.opacity = lerp_f32(0.35, 1.0, flake.depth);
                p
            }
            WeatherKind::Leaves => {
                let drift = self.flake(rng, 8.0, 18.0, 0.5, 1.4, (20.0, 50.0), (0.15, 0.35));
                let second = rng.pick(&self.config.colors).copied().unwrap_or(color);
                let gradient_to = if second == color {
                    color.mix(&Color::BLACK, 0.3)
                } else {
                    second
                };
                let y = self.entry_y(rng, initial, drift.size * 2.0);
                let opacity = lerp_f32(0.55, 1.0, drift.depth);
                let mut p = Particle::new(
                    Vec2::new(drift.anchor_x, y),
                    color,
                    ParticleKind::Leaf(Leaf {
                        drift,
                        rotation: rng.range(0.0, TAU),
                        spin: rng.range(-0.03, 0.03),
                        flip: rng.range(0.0, TAU),
                        flip_speed: rng.range(0.02, 0.06),
                        gradient_to,
                    }),
                );
                p.opacity = opacity;
                p
            }
        }
    }

    /// Depth-driven drifting particle: nearer (larger depth) is bigger and faster
    #[allow(clippy::too_many_arguments)]
    fn flake(
        &self,
        rng: &mut FxRng,
        min_size: f32,
        max_size: f32,
        min_speed: f32,
        max_speed: f32,
        sway: (f32, f32),
        frequency: (f32, f32),
    ) -> Flake {
        let depth = rng.next_f32();
        Flake {
            depth,
            size: lerp_f32(min_size, max_size, depth),
            speed: lerp_f32(min_speed, max_speed, depth) * self.config.speed,
            sway_amplitude: rng.range(sway.0, sway.1),
            sway_phase: rng.range(0.0, TAU),
            sway_frequency: rng.range(frequency.0, frequency.1),
            anchor_x: self.lateral(rng),
        }
    }

    fn entry_y(&self, rng: &mut FxRng, initial: bool, extent: f32) -> f32 {
        if initial {
            rng.range(-self.height * 0.1, self.height)
        } else {
            -extent - rng.range(0.0, 20.0)
        }
    }

    fn respawn(&self, p: &mut Particle, rng: &mut FxRng) {
        let respawns = p.respawns + 1;
        *p = self.spawn(rng, false);
        p.respawns = respawns;
    }

    /// Allocate the pool parked; nothing shows until emission first starts
    fn populate(&mut self, rng: &mut FxRng) {
        let fresh: Vec<Particle> = (0..self.config.count)
            .map(|_| self.spawn(rng, true))
            .collect();
        for mut p in fresh {
            p.park();
            self.store.push(p);
        }
        log::debug!(
            "{} pool allocated with {} particles",
            self.name(),
            self.store.len()
        );
    }
}

/// Vertical extent below the anchor point that must clear the bottom edge
fn trailing_extent(kind: &ParticleKind) -> f32 {
    match kind {
        ParticleKind::Drop(d) => d.length,
        ParticleKind::Flake(f) => f.size,
        ParticleKind::Leaf(l) => l.drift.size,
        _ => 0.0,
    }
}

fn sway_x(flake: &Flake, time: f32) -> f32 {
    flake.anchor_x + (time * flake.sway_frequency * TAU + flake.sway_phase).sin() * flake.sway_amplitude
}

impl Effect for WeatherEffect {
    fn resize(&mut self, width: f32, height: f32, rng: &mut FxRng) {
        let (old_w, old_h) = (self.width, self.height);
        self.width = width;
        self.height = height;
        if self.store.is_empty() {
            self.populate(rng);
            return;
        }
        if old_w <= 0.0 || old_h <= 0.0 {
            return;
        }
        let (sx, sy) = (width / old_w, height / old_h);
        for p in self.store.iter_mut() {
            if p.is_parked() {
                continue;
            }
            p.position = Vec2::new(p.position.x * sx, p.position.y * sy);
            match &mut p.kind {
                ParticleKind::Flake(f) => f.anchor_x *= sx,
                ParticleKind::Leaf(l) => l.drift.anchor_x *= sx,
                _ => {}
            }
        }
    }

    fn step(&mut self, ctx: &FrameContext, rng: &mut FxRng) {
        let direction = self.direction;
        let prime = ctx.emitting && !self.primed;
        if prime {
            self.primed = true;
            log::debug!("{} emission started, spreading pool", self.name());
        }
        let (left, right) = self.lateral_band();
        let mut particles = std::mem::take(&mut self.store);
        for p in particles.iter_mut() {
            if p.is_parked() {
                if prime {
                    *p = self.spawn(rng, true);
                } else if ctx.emitting {
                    self.respawn(p, rng);
                }
                continue;
            }

            match &mut p.kind {
                ParticleKind::Drop(d) => {
                    p.position += d.velocity;
                }
                ParticleKind::Flake(f) => {
                    f.anchor_x += direction.x * f.speed;
                    p.position.y += direction.y * f.speed;
                    p.position.x = sway_x(f, ctx.time);
                }
                ParticleKind::Leaf(l) => {
                    l.drift.anchor_x += direction.x * l.drift.speed;
                    p.position.y += direction.y * l.drift.speed;
                    p.position.x = sway_x(&l.drift, ctx.time);
                    l.rotation = (l.rotation + l.spin) % TAU;
                    l.flip = (l.flip + l.flip_speed) % TAU;
                }
                _ => {}
            }

            let extent = trailing_extent(&p.kind);
            let gone = p.position.y - extent > self.height
                || p.position.x < left - SIDE_MARGIN - extent
                || p.position.x > right + SIDE_MARGIN + extent;
            if gone {
                if ctx.emitting {
                    self.respawn(p, rng);
                } else {
                    p.park();
                }
            }
        }
        self.store = particles;
    }

    fn draw(&self, surface: &mut dyn DrawSurface, ctx: &FrameContext) -> DrawStats {
        let mut stats = DrawStats::default();
        for p in self.store.iter() {
            if p.is_parked() || !ctx.in_bounds(p.position, SIDE_MARGIN) {
                continue;
            }
            let result = match &p.kind {
                ParticleKind::Drop(d) => {
                    let tail = p.position - d.velocity.normalized() * d.length;
                    surface.stroke_polyline(&[tail, p.position], p.color, d.thickness, p.opacity)
                }
                ParticleKind::Flake(f) => surface.fill_shape(
                    Shape::Circle { radius: f.size },
                    &Transform2D::at(p.position),
                    Paint::Solid(p.color),
                    p.opacity,
                ),
                ParticleKind::Leaf(l) => surface.fill_shape(
                    Shape::Leaf {
                        length: l.drift.size,
                        width: l.drift.size * 0.5,
                    },
                    &Transform2D::at(p.position)
                        .with_rotation(l.rotation)
                        .with_scale(flip_scale(l.flip, LEAF_MIN_FLIP_SCALE), 1.0),
                    Paint::Gradient {
                        from: p.color,
                        to: l.gradient_to,
                    },
                    p.opacity,
                ),
                _ => continue,
            };
            stats.record(result);
        }
        stats
    }

    fn live_count(&self) -> usize {
        self.store.live_count()
    }

    fn clear(&mut self) {
        self.store.clear();
        self.primed = false;
    }

    fn name(&self) -> &str {
        match self.config.kind {
            WeatherKind::Rain => "rain",
            WeatherKind::Snow => "snow",
            WeatherKind::Leaves => "leaves",
        }
    }
}
