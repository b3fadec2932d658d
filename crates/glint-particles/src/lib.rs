//! Glint Particles - CPU particle simulation
//!
//! Provides the particle store and the physics integrator for the
//! particle-based effects:
//! - Typed particles (drops, flakes, leaves, confetti, sparks, dots)
//! - Fixed pools with soft-delete parking for ambient weather
//! - Swap-remove compaction for dynamically spawned bursts
//! - Per-kind kinematics: angled rain, swaying snow and leaves, confetti with
//!   gravity and drag, firework rockets and sparks

pub mod confetti;
pub mod curves;
pub mod fireworks;
pub mod particle;
pub mod weather;

pub use confetti::{ConfettiConfig, ConfettiEffect};
pub use fireworks::{FireworksConfig, FireworksEffect};
pub use particle::{
    ConfettiPiece, ConfettiShape, Dot, Flake, Leaf, Particle, ParticleKind, ParticleStore, Raindrop,
    Spark,
};
pub use weather::{WeatherConfig, WeatherEffect, WeatherKind};
