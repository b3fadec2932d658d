//! CLI command implementations

pub mod check;
pub mod list;
pub mod render;
