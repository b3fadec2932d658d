//! Draw-call recorder

use crate::draw::{check_finite, check_polyline, DrawSurface, Paint, RenderTarget, Shape};
use crate::surface::SurfaceSize;
use glint_core::{Color, Result, Transform2D, Vec2};

/// One recorded draw call
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear,
    Fill {
        shape: Shape,
        transform: Transform2D,
        paint: Paint,
        opacity: f32,
    },
    Stroke {
        points: Vec<Vec2>,
        color: Color,
        width: f32,
        opacity: f32,
    },
}

/// A render target that keeps the draw calls of the current frame instead of pixels.
///
/// `clear()` starts a new frame, so `commands()` always holds the latest frame.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    size: Option<SurfaceSize>,
    commands: Vec<DrawCommand>,
    configure_count: usize,
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn fills(&self) -> impl Iterator<Item = (&Shape, &Transform2D, f32)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Fill {
                shape,
                transform,
                opacity,
                ..
            } => Some((shape, transform, *opacity)),
            _ => None,
        })
    }

    pub fn strokes(&self) -> impl Iterator<Item = (&[Vec2], f32, f32)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke {
                points,
                width,
                opacity,
                ..
            } => Some((points.as_slice(), *width, *opacity)),
            _ => None,
        })
    }

    /// How many times the backing store was actually reallocated
    pub fn configure_count(&self) -> usize {
        self.configure_count
    }
}

impl DrawSurface for CommandRecorder {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_shape(
        &mut self,
        shape: Shape,
        transform: &Transform2D,
        paint: Paint,
        opacity: f32,
    ) -> Result<()> {
        check_finite(&shape, transform, opacity)?;
        self.commands.push(DrawCommand::Fill {
            shape,
            transform: *transform,
            paint,
            opacity,
        });
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
        self.commands.push(DrawCommand::Stroke {
            points: points.to_vec(),
            color,
            width,
            opacity,
        });
        Ok(())
    }
}

impl RenderTarget for CommandRecorder {
    fn configure(&mut self, width: f32, height: f32, ratio: f32) -> Result<bool> {
        let size = match SurfaceSize::new(width, height, ratio) {
            Ok(size) => size,
            Err(err) => {
                self.release();
                return Err(err);
            }
        };
        if self.size == Some(size) {
            return Ok(false);
        }
        self.size = Some(size);
        self.configure_count += 1;
        Ok(true)
    }

    fn logical_size(&self) -> Option<(f32, f32)> {
        self.size.map(|s| (s.width, s.height))
    }

    fn release(&mut self) {
        self.size = None;
        self.commands.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_starts_a_new_frame() {
        let mut rec = CommandRecorder::new();
        rec.configure(10.0, 10.0, 1.0).unwrap();
        rec.fill_shape(
            Shape::Circle { radius: 1.0 },
            &Transform2D::IDENTITY,
            Paint::Solid(Color::WHITE),
            0.5,
        )
        .unwrap();
        assert_eq!(rec.fills().count(), 1);
        rec.clear();
        assert_eq!(rec.commands(), &[DrawCommand::Clear]);
    }

    #[test]
    fn counts_real_reallocations_only() {
        let mut rec = CommandRecorder::new();
        rec.configure(10.0, 10.0, 1.0).unwrap();
        rec.configure(10.0, 10.0, 1.0).unwrap();
        rec.configure(20.0, 10.0, 1.0).unwrap();
        assert_eq!(rec.configure_count(), 2);
    }
}
