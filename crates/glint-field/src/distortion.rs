//! Ripple and wave displacement fields

use glint_core::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

/// Gaussian falloff coefficient: `exp(-k * x²)` with `x` in band widths
pub const GAUSSIAN_K: f32 = 4.0;
/// One-shot and repeating cycles fade over this final fraction
pub const FADE_WINDOW: f32 = 0.4;
/// Strength ramps up over this leading fraction of a cycle
pub const ATTACK_WINDOW: f32 = 0.05;
/// The front ends each cycle this many diagonals from its start
pub const FRONT_REACH: f32 = 1.1;
/// Width of the displaced band, as a fraction of the diagonal
pub const BAND_WIDTH: f32 = 0.08;
/// Peak displacement in px at intensity 1
pub const MAX_DISPLACEMENT: f32 = 12.0;
/// Extra dot size at the crest
const SIZE_GAIN: f32 = 0.6;
/// Extra dot opacity at the crest
const OPACITY_GAIN: f32 = 0.6;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    None,
    /// Circular front expanding from the center
    Ripple,
    /// Front sweeping along the diagonal with an S-curved crest
    Wave,
}

/// Field distortion settings (the `[field]` table of an effect config)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    #[serde(rename = "type")]
    pub kind: FieldKind,
    /// Seconds for one sweep
    pub duration: f32,
    /// Displacement multiplier
    pub intensity: f32,
    pub repeat: bool,
    /// Seconds of rest before every sweep
    pub delay: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            kind: FieldKind::None,
            duration: 2.0,
            intensity: 1.0,
            repeat: false,
            delay: 0.0,
        }
    }
}

/// Per-point effect of the field at one instant
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Displacement {
    pub offset: Vec2,
    pub size_mul: f32,
    pub opacity_mul: f32,
}

impl Displacement {
    pub const NONE: Self = Self {
        offset: Vec2::ZERO,
        size_mul: 1.0,
        opacity_mul: 1.0,
    };

    fn from_strength(direction: Vec2, strength: f32, max: f32) -> Self {
        Self {
            offset: direction * (strength * max),
            size_mul: 1.0 + SIZE_GAIN * strength,
            opacity_mul: 1.0 + OPACITY_GAIN * strength,
        }
    }

    pub fn is_none(&self) -> bool {
        self.offset.length() < 1e-6
    }
}

/// Strength envelope for a cycle at normalized time `u` in `[0, 1)`
pub fn envelope(u: f32) -> f32 {
    let attack = (u / ATTACK_WINDOW).min(1.0);
    let fade_start = 1.0 - FADE_WINDOW;
    let fade = if u > fade_start {
        ((1.0 - u) / FADE_WINDOW).max(0.0)
    } else {
        1.0
    };
    attack * fade
}

impl FieldConfig {
    pub fn is_active(&self) -> bool {
        self.kind != FieldKind::None && self.duration > 0.0 && self.intensity != 0.0
    }

    /// Largest offset any point can receive; lattices are padded by this much
    pub fn max_displacement(&self) -> f32 {
        if self.kind == FieldKind::None {
            0.0
        } else {
            MAX_DISPLACEMENT * self.intensity.abs()
        }
    }

    /// Normalized position within the current sweep, or `None` while the
    /// field is resting (before the first sweep, in a delay, or finished)
    pub fn cycle_position(&self, t: f32) -> Option<f32> {
        if !self.is_active() || !t.is_finite() || t < 0.0 {
            return None;
        }
        let delay = self.delay.max(0.0);
        let local = if self.repeat {
            (t % (delay + self.duration)) - delay
        } else {
            t - delay
        };
        if local < 0.0 || local >= self.duration {
            return None;
        }
        Some(local / self.duration)
    }

    /// Displacement of `point` at field time `t` on a `width × height` surface
    pub fn sample(&self, point: Vec2, t: f32, width: f32, height: f32) -> Displacement {
        let Some(u) = self.cycle_position(t) else {
            return Displacement::NONE;
        };
        let diagonal = (width * width + height * height).sqrt();
        if diagonal <= 0.0 || !diagonal.is_finite() {
            return Displacement::NONE;
        }
        let env = envelope(u);
        let band = BAND_WIDTH * diagonal;
        let front = u * FRONT_REACH * diagonal;
        let max = self.max_displacement();

        match self.kind {
            FieldKind::None => Displacement::NONE,
            FieldKind::Ripple => {
                let center = Vec2::new(width * 0.5, height * 0.5);
                let radial = point - center;
                let distance = radial.length();
                let x = (distance - front) / band;
                let strength = (-GAUSSIAN_K * x * x).exp() * env;
                Displacement::from_strength(radial.normalized(), strength, max)
            }
            FieldKind::Wave => {
                let axis = Vec2::new(width, height) * (1.0 / diagonal);
                let along = point.dot(&axis);
                let x = (along - front) / band;
                let falloff = (-GAUSSIAN_K * x * x).exp();
                // Two drifting sinusoids bend the crest into an S-curve
                let phase = along / diagonal * TAU;
                let bend = 0.6 * (phase * 1.7 + t * 1.3).sin()
                    + 0.4 * (phase * 3.1 - t * 2.1 + 0.8).sin();
                // Only the middle of the band bends, the edges push straight along the axis.
                // |bend| and falloff stay within 1, so the length never exceeds 1.
                let direction = axis * 0.6 + axis.perp() * (0.8 * bend * falloff);
                Displacement::from_strength(direction, falloff * env, max)
            }
        }
    }
}
