//! Effect trait

use glint_core::{FxRng, Result, Vec2};
use glint_render::DrawSurface;

/// Per-frame inputs shared by `step` and `draw`
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameContext {
    /// Seconds since the handle's clock started
    pub time: f32,
    /// Fixed simulation step in seconds
    pub dt: f32,
    /// Logical surface size
    pub width: f32,
    pub height: f32,
    /// Whether the emission controller currently reports emitting
    pub emitting: bool,
    /// Reveal/hide progress in `[0, 2]`
    pub progress: f32,
}

impl FrameContext {
    pub fn in_bounds(&self, p: Vec2, margin: f32) -> bool {
        p.x >= -margin && p.x <= self.width + margin && p.y >= -margin && p.y <= self.height + margin
    }
}

/// Draw-call accounting for one frame
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    pub drawn: usize,
    pub skipped: usize,
}

impl DrawStats {
    /// Count the outcome of one draw call. Failures are logged and skipped so a
    /// single bad particle never aborts the frame.
    pub fn record(&mut self, result: Result<()>) {
        match result {
            Ok(()) => self.drawn += 1,
            Err(err) => {
                self.skipped += 1;
                log::trace!("skipping draw: {err}");
            }
        }
    }

    pub fn merge(&mut self, other: DrawStats) {
        self.drawn += other.drawn;
        self.skipped += other.skipped;
    }
}

/// An effect stepped and drawn by the render loop
///
/// `step` runs at the fixed simulation rate and owns all mutation; `draw`
/// runs once per frame and must not change simulation state.
pub trait Effect {
    /// Called whenever the logical surface size changes (including the first valid size)
    fn resize(&mut self, width: f32, height: f32, rng: &mut FxRng);

    /// Advance the simulation by one fixed step
    fn step(&mut self, ctx: &FrameContext, rng: &mut FxRng);

    /// Draw all live elements
    fn draw(&self, surface: &mut dyn DrawSurface, ctx: &FrameContext) -> DrawStats;

    /// Pointer-triggered burst at a logical position. Effects without bursts ignore it.
    fn burst(&mut self, _at: Vec2, _rng: &mut FxRng) {}

    /// Elements currently inside the drawable area
    fn live_count(&self) -> usize;

    /// Release simulation storage (teardown)
    fn clear(&mut self);

    /// Human-readable name for this effect
    fn name(&self) -> &str;
}
