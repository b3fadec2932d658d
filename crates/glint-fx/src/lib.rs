//! Glint FX - the render loop
//!
//! Ties the pieces together: an [`EffectConfig`] loaded from TOML is turned
//! into a concrete effect by [`build_effect`], and an [`EffectHandle`] drives
//! it from host timestamps, trigger events and resize notifications.

pub mod config;
mod factory;
mod handle;

pub use config::{EffectConfig, EffectKind, MAX_INTENSITY};
pub use factory::build_effect;
pub use handle::{EffectHandle, FrameStats};

pub use glint_field::{FieldConfig, FieldKind, RevealOrigin};
pub use glint_runtime::{EmissionPhase, TriggerEvent, TriggerPolicy};
