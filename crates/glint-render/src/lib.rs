//! Glint Render - Drawing surfaces
//!
//! Effects draw through the [`DrawSurface`] trait in logical (CSS) pixels.
//! A [`RenderTarget`] additionally owns a device-pixel-ratio aware backing
//! store that the render loop reconfigures on resize.
//!
//! Backends:
//! - [`Canvas`]: CPU software rasterizer over an RGBA8 [`PixelBuffer`]
//! - [`CommandRecorder`]: records draw calls, used by tests and tooling

mod draw;
mod raster;
mod recorder;
mod surface;

pub use draw::{check_finite, DrawSurface, Paint, RenderTarget, Shape};
pub use raster::Canvas;
pub use recorder::{CommandRecorder, DrawCommand};
pub use surface::{PixelBuffer, Surface, SurfaceSize};
