//! Glint Field - time-varying displacement over a static point lattice
//!
//! A ripple or diagonal wave front travels across the surface; points near the
//! front are pushed, enlarged and brightened with a Gaussian falloff. The
//! dot-matrix effect combines this with the emission reveal sweep.

pub mod distortion;
mod dot_matrix;
pub mod lattice;

pub use distortion::{Displacement, FieldConfig, FieldKind};
pub use dot_matrix::{DotMatrixConfig, DotMatrixEffect, RevealOrigin};
pub use lattice::Lattice;
