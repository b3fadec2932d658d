//! Glint Core - Foundational types for the Glint effects engine
//!
//! This crate provides the types every other Glint crate depends on:
//! - `Vec2`, `Transform2D` - Logical-pixel spatial types
//! - `Color`, `ColorResolver`, `Palette` - Token-to-color resolution with a neutral fallback
//! - `FxRng` - Injectable, optionally seeded random source
//! - Error types and Result alias

mod color;
mod error;
mod rng;
mod types;

pub use color::{resolve_or_neutral, resolve_set, ColorResolver, Palette, NEUTRAL};
pub use error::{GlintError, Result};
pub use rng::FxRng;
pub use types::{Color, Transform2D, Vec2};
