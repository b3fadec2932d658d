//! Glint Lightning - procedural bolt generation
//!
//! Bolts are a jittered main stroke walking down the surface plus a recursive
//! tree of shrinking branches. Recursion is bounded both by a maximum depth and
//! by a fixed segment count per branch, so generation always terminates.
//!
//! A bolt reveals its main stroke over a few frames, branches follow the stroke
//! as it reaches their attachment point, then the whole bolt holds and fades.

pub mod bolt;
mod effect;
pub mod reveal;
mod storm;

pub use bolt::{generate_bolt, generate_branch, Bolt, BoltParams, Branch};
pub use effect::{LightningConfig, LightningEffect};
pub use reveal::{branch_segments_drawn, segments_drawn, BoltTiming};
pub use storm::StormEffect;
