//! Glint Runtime - Frame loop building blocks
//!
//! Provides the pieces the render loop is assembled from:
//! - `FrameClock`: fixed-timestep accumulator driven by host timestamps
//! - `EmissionController`: reveal/hide state machine with mid-flight resume
//! - `TriggerPolicy` / `TriggerEvent`: mapping lifecycle and pointer events to emission
//! - `Effect`: trait for effects stepped and drawn by the loop

mod clock;
pub mod emission;
mod effect;
mod trigger;

pub use clock::FrameClock;
pub use effect::{DrawStats, Effect, FrameContext};
pub use emission::{EmissionController, EmissionPhase, EmissionState};
pub use trigger::{EmissionCommand, Reaction, TriggerEvent, TriggerPolicy};
