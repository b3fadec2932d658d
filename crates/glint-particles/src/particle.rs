//! Particle types and the particle store

use glint_core::{Color, Vec2};

/// Parked particles sit this far above the surface
pub const PARK_OFFSET: f32 = 1.0e6;

/// One simulated element. `color` is resolved at creation and cached;
/// `opacity` is recomputed from the kind's driving value every step.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub color: Color,
    pub opacity: f32,
    /// How many times this pool slot has been recycled back to the top
    pub respawns: u32,
    pub kind: ParticleKind,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParticleKind {
    Drop(Raindrop),
    Flake(Flake),
    Leaf(Leaf),
    Confetti(ConfettiPiece),
    Spark(Spark),
    Dot(Dot),
}

/// Rain drop: constant angled velocity
#[derive(Clone, Debug, PartialEq)]
pub struct Raindrop {
    pub length: f32,
    pub thickness: f32,
    /// Pixels per step, fixed at spawn from the configured angle
    pub velocity: Vec2,
    pub alpha: f32,
}

/// Snow flake: size, speed and opacity all follow `depth`
#[derive(Clone, Debug, PartialEq)]
pub struct Flake {
    pub depth: f32,
    pub size: f32,
    /// Fall speed in pixels per step
    pub speed: f32,
    pub sway_amplitude: f32,
    pub sway_phase: f32,
    /// Sway frequency in Hz
    pub sway_frequency: f32,
    /// Horizontal position the sway oscillates around
    pub anchor_x: f32,
}

/// Falling leaf: a flake with spin, a fake 3-D flip and a two-color gradient
#[derive(Clone, Debug, PartialEq)]
pub struct Leaf {
    pub drift: Flake,
    pub rotation: f32,
    pub spin: f32,
    pub flip: f32,
    pub flip_speed: f32,
    pub gradient_to: Color,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfettiShape {
    Rectangle,
    Circle,
    Triangle,
}

impl ConfettiShape {
    pub const ALL: [Self; 3] = [Self::Rectangle, Self::Circle, Self::Triangle];
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub velocity: Vec2,
    pub gravity: f32,
    pub rotation: f32,
    pub spin: f32,
    pub shape: ConfettiShape,
    pub size: f32,
    pub age: f32,
    pub lifetime: f32,
}

/// Firework element: a rising rocket until its apex, a fading spark afterwards
#[derive(Clone, Debug, PartialEq)]
pub struct Spark {
    pub velocity: Vec2,
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub rocket: bool,
}

impl Spark {
    pub fn life_ratio(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// Static lattice dot for the dot-matrix effect
#[derive(Clone, Debug, PartialEq)]
pub struct Dot {
    pub origin: Vec2,
    /// Reveal progress this dot waits for before fading in
    pub intro_offset: f32,
    pub size: f32,
}

impl Particle {
    pub fn new(position: Vec2, color: Color, kind: ParticleKind) -> Self {
        Self {
            position,
            color,
            opacity: 1.0,
            respawns: 0,
            kind,
        }
    }

    /// Soft delete: move far outside the draw area instead of reallocating the pool
    pub fn park(&mut self) {
        self.position = Vec2::new(self.position.x, -PARK_OFFSET);
    }

    pub fn is_parked(&self) -> bool {
        self.position.y <= -PARK_OFFSET * 0.5
    }
}

/// Particle storage shared by every particle effect
///
/// Fixed-pool effects park particles instead of removing them; dynamic effects
/// (bursts, sparks) push freely and compact with swap-remove.
#[derive(Clone, Debug, Default)]
pub struct ParticleStore {
    particles: Vec<Particle>,
}

impl ParticleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            particles: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, particle: Particle) {
        self.particles.push(particle);
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Particles that are not parked
    pub fn live_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.is_parked()).count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> + '_ {
        self.particles.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Particle> + '_ {
        self.particles.iter_mut()
    }

    pub fn as_slice(&self) -> &[Particle] {
        &self.particles
    }

    /// Remove particles for which `keep` is false via swap-remove.
    /// Order is not preserved. Returns how many were removed.
    pub fn compact(&mut self, mut keep: impl FnMut(&Particle) -> bool) -> usize {
        let mut removed = 0;
        let mut i = 0;
        while i < self.particles.len() {
            if keep(&self.particles[i]) {
                i += 1;
            } else {
                self.particles.swap_remove(i);
                removed += 1;
                // Don't increment i, the swapped-in particle needs checking
            }
        }
        removed
    }

    pub fn clear(&mut self) {
        self.particles.clear();
        self.particles.shrink_to_fit();
    }
}
