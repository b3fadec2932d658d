//! The drawing interface effects render through

use glint_core::{Color, GlintError, Result, Transform2D, Vec2};

/// Filled primitive, defined in shape-local coordinates centered on the origin
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Rect { width: f32, height: f32 },
    Circle { radius: f32 },
    /// Equilateral-ish triangle pointing up, `size` is the bounding box edge
    Triangle { size: f32 },
    /// Pointed almond shape along the local x axis
    Leaf { length: f32, width: f32 },
}

impl Shape {
    /// Half extents of the local bounding box
    pub fn half_extents(&self) -> Vec2 {
        match *self {
            Shape::Rect { width, height } => Vec2::new(width * 0.5, height * 0.5),
            Shape::Circle { radius } => Vec2::new(radius, radius),
            Shape::Triangle { size } => Vec2::new(size * 0.5, size * 0.5),
            Shape::Leaf { length, width } => Vec2::new(length * 0.5, width * 0.5),
        }
    }

    /// Point-in-shape test in local coordinates
    pub fn contains(&self, p: Vec2) -> bool {
        match *self {
            Shape::Rect { width, height } => {
                p.x.abs() <= width * 0.5 && p.y.abs() <= height * 0.5
            }
            Shape::Circle { radius } => p.x * p.x + p.y * p.y <= radius * radius,
            Shape::Triangle { size } => {
                let h = size * 0.5;
                if p.y < -h || p.y > h {
                    return false;
                }
                // Apex at (0, -h), base from (-h, h) to (h, h)
                let t = (p.y + h) / size;
                p.x.abs() <= t * h
            }
            Shape::Leaf { length, width } => {
                let hl = length * 0.5;
                if hl <= 0.0 || p.x.abs() > hl {
                    return false;
                }
                let u = p.x / hl;
                p.y.abs() <= width * 0.5 * (1.0 - u * u)
            }
        }
    }

    fn dims_finite(&self) -> bool {
        let e = self.half_extents();
        e.x.is_finite() && e.y.is_finite() && e.x >= 0.0 && e.y >= 0.0
    }
}

/// How a filled shape is colored
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient along the shape's local x axis
    Gradient { from: Color, to: Color },
}

impl Paint {
    /// Color at normalized position `t` along the gradient axis
    pub fn sample(&self, t: f32) -> Color {
        match self {
            Paint::Solid(c) => *c,
            Paint::Gradient { from, to } => from.mix(to, t.clamp(0.0, 1.0)),
        }
    }
}

/// Backend-agnostic drawing calls, all in logical pixels
pub trait DrawSurface {
    /// Reset every pixel to transparent
    fn clear(&mut self);

    /// Fill `shape` placed by `transform` with `paint` at `opacity`
    fn fill_shape(
        &mut self,
        shape: Shape,
        transform: &Transform2D,
        paint: Paint,
        opacity: f32,
    ) -> Result<()>;

    /// Stroke an open polyline
    fn stroke_polyline(
        &mut self,
        points: &[Vec2],
        color: Color,
        width: f32,
        opacity: f32,
    ) -> Result<()>;
}

/// A drawing surface with a resizable backing store
pub trait RenderTarget: DrawSurface {
    /// Reallocate for new logical dimensions and pixel ratio.
    /// Returns `Ok(false)` when nothing changed.
    fn configure(&mut self, width: f32, height: f32, ratio: f32) -> Result<bool>;

    /// Logical size, `None` while no valid size has been configured
    fn logical_size(&self) -> Option<(f32, f32)>;

    /// Drop the backing store (teardown)
    fn release(&mut self);

    fn is_drawable(&self) -> bool {
        self.logical_size().is_some()
    }
}

/// Validate a fill call before it reaches a backend
pub fn check_finite(shape: &Shape, transform: &Transform2D, opacity: f32) -> Result<()> {
    if !shape.dims_finite() || !transform.is_finite() || !opacity.is_finite() {
        return Err(GlintError::NonFiniteGeometry(format!(
            "{shape:?} at {:?}",
            transform.translation
        )));
    }
    Ok(())
}

pub(crate) fn check_polyline(points: &[Vec2], width: f32, opacity: f32) -> Result<()> {
    if !width.is_finite() || !opacity.is_finite() || points.iter().any(|p| !p.is_finite()) {
        return Err(GlintError::NonFiniteGeometry(format!(
            "polyline of {} points",
            points.len()
        )));
    }
    Ok(())
}
