//! Spatial and common types
//!
//! All positions are in logical (CSS) pixels with the origin at the top-left
//! corner and `y` growing downward.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// A 2D vector
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing at `angle` radians (0 = +x, PI/2 = straight down)
    pub fn from_angle(angle: f32) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn length(&self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn normalized(&self) -> Self {
        let len = self.length();
        if len > 0.0 {
            Self {
                x: self.x / len,
                y: self.y / len,
            }
        } else {
            Self::ZERO
        }
    }

    pub fn dot(&self, other: &Self) -> f32 {
        self.x * other.x + self.y * other.y
    }

    /// Perpendicular vector (rotated 90 degrees clockwise on screen)
    pub fn perp(&self) -> Self {
        Self {
            x: -self.y,
            y: self.x,
        }
    }

    pub fn distance(&self, other: &Self) -> f32 {
        (*self - *other).length()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }
}

impl AddAssign for Vec2 {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
    }
}

impl Sub for Vec2 {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, scalar: f32) -> Self {
        Self {
            x: self.x * scalar,
            y: self.y * scalar,
        }
    }
}

/// A 2D placement: translate, then rotate, then scale (applied to shape-local points
/// in reverse order: scale first, rotation second, translation last)
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub translation: Vec2,
    /// Rotation in radians, clockwise on screen
    pub rotation: f32,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Self = Self {
        translation: Vec2::ZERO,
        rotation: 0.0,
        scale: Vec2 { x: 1.0, y: 1.0 },
    };

    pub fn at(position: Vec2) -> Self {
        Self {
            translation: position,
            ..Self::IDENTITY
        }
    }

    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, sx: f32, sy: f32) -> Self {
        self.scale = Vec2::new(sx, sy);
        self
    }

    /// Map a shape-local point into logical surface coordinates
    pub fn apply(&self, local: Vec2) -> Vec2 {
        let sx = local.x * self.scale.x;
        let sy = local.y * self.scale.y;
        let (sin, cos) = self.rotation.sin_cos();
        Vec2 {
            x: sx * cos - sy * sin + self.translation.x,
            y: sx * sin + sy * cos + self.translation.y,
        }
    }

    /// Map a surface point back into shape-local coordinates.
    /// Returns `None` when the scale is degenerate.
    pub fn invert(&self, world: Vec2) -> Option<Vec2> {
        if self.scale.x.abs() < 1e-6 || self.scale.y.abs() < 1e-6 {
            return None;
        }
        let dx = world.x - self.translation.x;
        let dy = world.y - self.translation.y;
        let (sin, cos) = self.rotation.sin_cos();
        let rx = dx * cos + dy * sin;
        let ry = -dx * sin + dy * cos;
        Some(Vec2 {
            x: rx / self.scale.x,
            y: ry / self.scale.y,
        })
    }

    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

/// RGBA color, components in [0, 1]
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Self = Self {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };
    pub const TRANSPARENT: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 0.0,
    };

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn parse_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let v = u32::from_str_radix(digits, 16).ok()?;
                let r = (v >> 8) & 0xF;
                let g = (v >> 4) & 0xF;
                let b = v & 0xF;
                Some(Self::from_hex((r * 17) << 16 | (g * 17) << 8 | b * 17))
            }
            6 => u32::from_str_radix(digits, 16).ok().map(Self::from_hex),
            8 => {
                let v = u32::from_str_radix(digits, 16).ok()?;
                let mut c = Self::from_hex(v >> 8);
                c.a = (v & 0xFF) as f32 / 255.0;
                Some(c)
            }
            _ => None,
        }
    }

    pub fn with_alpha(mut self, a: f32) -> Self {
        self.a = a;
        self
    }

    /// Component-wise linear mix toward `other`
    pub fn mix(&self, other: &Self, t: f32) -> Self {
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_vec2_operations() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(4.0, 6.0);
        assert_eq!(a + b, Vec2::new(5.0, 8.0));
        assert_eq!(b - a, Vec2::new(3.0, 4.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert!((a.distance(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_angle_points_down() {
        let d = Vec2::from_angle(FRAC_PI_2);
        assert!(d.x.abs() < 1e-6);
        assert!((d.y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_transform_roundtrip() {
        let t = Transform2D::at(Vec2::new(10.0, 20.0))
            .with_rotation(0.7)
            .with_scale(2.0, 0.5);
        let local = Vec2::new(3.0, -4.0);
        let back = t.invert(t.apply(local)).unwrap();
        assert!((back.x - local.x).abs() < 1e-4);
        assert!((back.y - local.y).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_scale_has_no_inverse() {
        let t = Transform2D::IDENTITY.with_scale(0.0, 1.0);
        assert!(t.invert(Vec2::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn test_color_parse_hex() {
        let c = Color::parse_hex("#ff8844").unwrap();
        assert!((c.r - 1.0).abs() < 0.01);
        assert!((c.g - 0.533).abs() < 0.01);
        assert!((c.b - 0.267).abs() < 0.01);

        let short = Color::parse_hex("#f80").unwrap();
        assert_eq!(short.to_rgba8(), [255, 136, 0, 255]);

        let alpha = Color::parse_hex("#00000080").unwrap();
        assert!((alpha.a - 0.5).abs() < 0.01);

        assert!(Color::parse_hex("ff8844").is_none());
        assert!(Color::parse_hex("#ggg").is_none());
    }
}
