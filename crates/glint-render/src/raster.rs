//! CPU software rasterizer

use crate::draw::{check_finite, check_polyline, DrawSurface, Paint, RenderTarget, Shape};
use crate::surface::{PixelBuffer, Surface};
use glint_core::{Color, Result, Transform2D, Vec2};

/// Software backend: one sample per physical pixel, straight-alpha blending
#[derive(Debug, Default)]
pub struct Canvas {
    surface: Surface,
}

impl Canvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn pixels(&self) -> &PixelBuffer {
        self.surface.buffer()
    }

    fn ratio(&self) -> Option<f32> {
        self.surface.size().map(|s| s.ratio)
    }

    /// Physical pixel range covering logical bounds, clipped to the buffer
    fn pixel_bounds(&self, min: Vec2, max: Vec2, ratio: f32) -> Option<(u32, u32, u32, u32)> {
        let buf = self.surface.buffer();
        let (w, h) = (buf.width() as f32, buf.height() as f32);
        let x0 = (min.x * ratio).floor().max(0.0);
        let y0 = (min.y * ratio).floor().max(0.0);
        let x1 = (max.x * ratio).ceil().min(w);
        let y1 = (max.y * ratio).ceil().min(h);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

impl DrawSurface for Canvas {
    fn clear(&mut self) {
        self.surface.buffer_mut().fill(Color::TRANSPARENT);
    }

    fn fill_shape(
        &mut self,
        shape: Shape,
        transform: &Transform2D,
        paint: Paint,
        opacity: f32,
    ) -> Result<()> {
        check_finite(&shape, transform, opacity)?;
        let Some(ratio) = self.ratio() else {
            return Ok(());
        };
        if opacity <= 0.0 {
            return Ok(());
        }

        let e = shape.half_extents();
        let corners = [
            transform.apply(Vec2::new(-e.x, -e.y)),
            transform.apply(Vec2::new(e.x, -e.y)),
            transform.apply(Vec2::new(e.x, e.y)),
            transform.apply(Vec2::new(-e.x, e.y)),
        ];
        let mut min = corners[0];
        let mut max = corners[0];
        for c in &corners[1..] {
            min = Vec2::new(min.x.min(c.x), min.y.min(c.y));
            max = Vec2::new(max.x.max(c.x), max.y.max(c.y));
        }
        let Some((x0, y0, x1, y1)) = self.pixel_bounds(min, max, ratio) else {
            return Ok(());
        };

        let opacity = opacity.min(1.0);
        let buf = self.surface.buffer_mut();
        for py in y0..y1 {
            for px in x0..x1 {
                let world = Vec2::new((px as f32 + 0.5) / ratio, (py as f32 + 0.5) / ratio);
                let Some(local) = transform.invert(world) else {
                    continue;
                };
                if !shape.contains(local) {
                    continue;
                }
                let t = if e.x > 0.0 {
                    (local.x / e.x + 1.0) * 0.5
                } else {
                    0.0
                };
                buf.blend(px, py, paint.sample(t), opacity);
            }
        }
        Ok(())
    }

    fn stroke_polyline(
        &mut self,
        points: &[Vec2],
        color: Color,
        width: f32,
        opacity: f32,
    ) -> Result<()> {
        check_polyline(points, width, opacity)?;
        let Some(ratio) = self.ratio() else {
            return Ok(());
        };
        if points.len() < 2 || opacity <= 0.0 || width <= 0.0 {
            return Ok(());
        }

        // Sub-pixel strokes are widened to one pixel and dimmed instead
        let half = (width * 0.5).max(0.5 / ratio);
        let coverage = (width * ratio).min(1.0) * opacity.min(1.0);
        let pad = Vec2::new(half, half);
        for seg in points.windows(2) {
            let (a, b) = (seg[0], seg[1]);
            let min = Vec2::new(a.x.min(b.x), a.y.min(b.y)) - pad;
            let max = Vec2::new(a.x.max(b.x), a.y.max(b.y)) + pad;
            let Some((x0, y0, x1, y1)) = self.pixel_bounds(min, max, ratio) else {
                continue;
            };
            let buf = self.surface.buffer_mut();
            for py in y0..y1 {
                for px in x0..x1 {
                    let p = Vec2::new((px as f32 + 0.5) / ratio, (py as f32 + 0.5) / ratio);
                    if distance_to_segment(p, a, b) <= half {
                        buf.blend(px, py, color, coverage);
                    }
                }
            }
        }
        Ok(())
    }
}

impl RenderTarget for Canvas {
    fn configure(&mut self, width: f32, height: f32, ratio: f32) -> Result<bool> {
        self.surface.configure(width, height, ratio)
    }

    fn logical_size(&self) -> Option<(f32, f32)> {
        self.surface.size().map(|s| (s.width, s.height))
    }

    fn release(&mut self) {
        self.surface.release();
    }
}

fn distance_to_segment(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len_sq = ab.dot(&ab);
    if len_sq <= f32::EPSILON {
        return p.distance(&a);
    }
    let t = ((p - a).dot(&ab) / len_sq).clamp(0.0, 1.0);
    p.distance(&(a + ab * t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: f32, h: f32, ratio: f32) -> Canvas {
        let mut c = Canvas::new();
        c.configure(w, h, ratio).unwrap();
        c
    }

    #[test]
    fn fills_rect_in_logical_coordinates() {
        let mut c = canvas(20.0, 20.0, 2.0);
        c.fill_shape(
            Shape::Rect {
                width: 4.0,
                height: 4.0,
            },
            &Transform2D::at(Vec2::new(10.0, 10.0)),
            Paint::Solid(Color::WHITE),
            1.0,
        )
        .unwrap();
        // 4x4 logical at ratio 2 = 8x8 physical
        assert_eq!(c.pixels().covered_pixels(), 64);
        assert_eq!(c.pixels().pixel(20, 20).unwrap()[3], 255);
        assert_eq!(c.pixels().pixel(2, 2).unwrap()[3], 0);
    }

    #[test]
    fn offscreen_shapes_are_clipped() {
        let mut c = canvas(10.0, 10.0, 1.0);
        c.fill_shape(
            Shape::Circle { radius: 3.0 },
            &Transform2D::at(Vec2::new(-100.0, -100.0)),
            Paint::Solid(Color::WHITE),
            1.0,
        )
        .unwrap();
        assert_eq!(c.pixels().covered_pixels(), 0);
    }

    #[test]
    fn nan_fill_is_an_error_and_draws_nothing() {
        let mut c = canvas(10.0, 10.0, 1.0);
        let res = c.fill_shape(
            Shape::Circle { radius: f32::NAN },
            &Transform2D::at(Vec2::new(5.0, 5.0)),
            Paint::Solid(Color::WHITE),
            1.0,
        );
        assert!(res.is_err());
        assert_eq!(c.pixels().covered_pixels(), 0);
    }

    #[test]
    fn strokes_polyline() {
        let mut c = canvas(20.0, 20.0, 1.0);
        c.stroke_polyline(
            &[Vec2::new(10.0, 0.0), Vec2::new(10.0, 20.0)],
            Color::WHITE,
            2.0,
            1.0,
        )
        .unwrap();
        assert!(c.pixels().pixel(10, 10).unwrap()[3] > 0);
        assert_eq!(c.pixels().pixel(2, 10).unwrap()[3], 0);
    }

    #[test]
    fn clear_resets_pixels() {
        let mut c = canvas(4.0, 4.0, 1.0);
        c.fill_shape(
            Shape::Rect {
                width: 10.0,
                height: 10.0,
            },
            &Transform2D::at(Vec2::new(2.0, 2.0)),
            Paint::Solid(Color::WHITE),
            1.0,
        )
        .unwrap();
        assert_eq!(c.pixels().covered_pixels(), 16);
        c.clear();
        assert_eq!(c.pixels().covered_pixels(), 0);
    }

    #[test]
    fn unconfigured_canvas_ignores_draws() {
        let mut c = Canvas::new();
        assert!(!c.is_drawable());
        c.stroke_polyline(&[Vec2::ZERO, Vec2::new(1.0, 1.0)], Color::WHITE, 1.0, 1.0)
            .unwrap();
        assert_eq!(c.pixels().covered_pixels(), 0);
    }
}
