//! Device-pixel-ratio aware backing store

use glint_core::{Color, GlintError, Result};

/// Logical dimensions plus the device pixel ratio they were configured with
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
    pub ratio: f32,
}

impl SurfaceSize {
    /// Validate raw container geometry
    pub fn new(width: f32, height: f32, ratio: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) || !valid(ratio) {
            return Err(GlintError::InvalidDimensions {
                width,
                height,
                ratio,
            });
        }
        Ok(Self {
            width,
            height,
            ratio,
        })
    }

    /// Backing store size in physical pixels
    pub fn physical(&self) -> (u32, u32) {
        (
            (self.width * self.ratio).round().max(1.0) as u32,
            (self.height * self.ratio).round().max(1.0) as u32,
        )
    }

    pub fn diagonal(&self) -> f32 {
        (self.width * self.width + self.height * self.height).sqrt()
    }
}

/// Straight-alpha RGBA8 pixels
#[derive(Clone, Debug, Default)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    pub fn fill(&mut self, color: Color) {
        let rgba = color.to_rgba8();
        for px in self.data.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Source-over blend of `color` scaled by `coverage`
    pub fn blend(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let sa = (color.a * coverage).clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let da = self.data[i + 3] as f32 / 255.0;
        let out_a = sa + da * (1.0 - sa);
        if out_a <= 0.0 {
            return;
        }
        let src = [color.r, color.g, color.b];
        for c in 0..3 {
            let d = self.data[i + c] as f32 / 255.0;
            let v = (src[c].clamp(0.0, 1.0) * sa + d * da * (1.0 - sa)) / out_a;
            self.data[i + c] = (v * 255.0 + 0.5) as u8;
        }
        self.data[i + 3] = (out_a * 255.0 + 0.5) as u8;
    }

    /// Number of pixels with non-zero alpha
    pub fn covered_pixels(&self) -> usize {
        self.data.chunks_exact(4).filter(|px| px[3] > 0).count()
    }
}

/// Logical size + physical backing buffer, reallocated on every dimension change
#[derive(Debug, Default)]
pub struct Surface {
    size: Option<SurfaceSize>,
    buffer: PixelBuffer,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reallocate the buffer for new geometry. Unchanged geometry is a no-op.
    ///
    /// Invalid geometry leaves the surface non-drawable until the next valid call.
    pub fn configure(&mut self, width: f32, height: f32, ratio: f32) -> Result<bool> {
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
        let (pw, ph) = size.physical();
        self.buffer = PixelBuffer::new(pw, ph);
        self.size = Some(size);
        log::debug!("surface configured: {width}x{height} @ {ratio} -> {pw}x{ph} physical");
        Ok(true)
    }

    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    pub fn release(&mut self) {
        self.size = None;
        self.buffer = PixelBuffer::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buffer_tracks_pixel_ratio() {
        let mut surface = Surface::new();
        assert!(surface.configure(400.0, 300.0, 2.0).unwrap());
        assert_eq!(surface.buffer().width(), 800);
        assert_eq!(surface.buffer().height(), 600);
        assert_eq!(surface.buffer().as_bytes().len(), 800 * 600 * 4);
    }

    #[test]
    fn configure_is_idempotent() {
        let mut surface = Surface::new();
        assert!(surface.configure(100.0, 50.0, 1.5).unwrap());
        assert!(!surface.configure(100.0, 50.0, 1.5).unwrap());
        assert!(surface.configure(100.0, 50.0, 1.0).unwrap());
        assert_eq!(surface.buffer().width(), 100);
    }

    #[test]
    fn invalid_dimensions_disable_drawing() {
        let mut surface = Surface::new();
        surface.configure(100.0, 100.0, 1.0).unwrap();
        assert!(surface.configure(0.0, 100.0, 1.0).is_err());
        assert!(surface.size().is_none());
        assert_eq!(surface.buffer().as_bytes().len(), 0);
        // Next valid resize recovers
        assert!(surface.configure(10.0, 10.0, 1.0).unwrap());
        assert!(surface.size().is_some());
    }

    #[test]
    fn blend_over_transparent_keeps_color() {
        let mut buf = PixelBuffer::new(2, 2);
        buf.blend(1, 1, Color::new(1.0, 0.0, 0.0, 1.0), 0.5);
        let px = buf.pixel(1, 1).unwrap();
        assert_eq!(px[0], 255);
        assert_eq!(px[3], 128);
        assert_eq!(buf.covered_pixels(), 1);
    }
}
