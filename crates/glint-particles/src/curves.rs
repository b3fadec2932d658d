//! Small interpolation helpers shared by the integrators

/// Linear interpolation between two floats
pub fn lerp_f32(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Opacity that holds at 1 until `hold` of the lifetime has passed, then fades linearly to 0
pub fn hold_then_fade(age: f32, lifetime: f32, hold: f32) -> f32 {
    if lifetime <= 0.0 {
        return 0.0;
    }
    let t = (age / lifetime).clamp(0.0, 1.0);
    if t <= hold {
        1.0
    } else {
        ((1.0 - t) / (1.0 - hold).max(f32::EPSILON)).clamp(0.0, 1.0)
    }
}

/// Horizontal squash for a "3-D flip" angle: `cos(flip)` with its magnitude
/// clamped to `min` so the shape never vanishes edge-on
pub fn flip_scale(flip: f32, min: f32) -> f32 {
    let c = flip.cos();
    let mag = c.abs().max(min);
    if c < 0.0 {
        -mag
    } else {
        mag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn lerp_f32_endpoints() {
        assert!((lerp_f32(0.0, 10.0, 0.0) - 0.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 1.0) - 10.0).abs() < 1e-6);
        assert!((lerp_f32(0.0, 10.0, 0.5) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn hold_then_fade_shape() {
        assert_eq!(hold_then_fade(0.1, 1.0, 0.7), 1.0);
        assert!((hold_then_fade(0.85, 1.0, 0.7) - 0.5).abs() < 1e-5);
        assert_eq!(hold_then_fade(2.0, 1.0, 0.7), 0.0);
        assert_eq!(hold_then_fade(0.5, 0.0, 0.7), 0.0);
    }

    #[test]
    fn flip_never_vanishes() {
        assert!((flip_scale(FRAC_PI_2, 0.2).abs() - 0.2).abs() < 1e-6);
        assert!((flip_scale(PI, 0.2) + 1.0).abs() < 1e-6);
        assert!((flip_scale(0.0, 0.2) - 1.0).abs() < 1e-6);
    }
}
