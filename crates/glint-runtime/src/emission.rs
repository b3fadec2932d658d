//! Emission controller: reveal/hide progress with continuous resume
//!
//! Progress is a scalar in `[0, REVEAL_CEILING]`. Revealing follows a cubic
//! ease-in of elapsed time, hiding a quadratic decay from wherever the reveal
//! was when emission stopped. Restarting during a hide inverts the cubic to
//! find the equivalent reveal time, so the visible value never jumps.

use crate::trigger::TriggerPolicy;

/// Cubic reveal rate: `progress = elapsed³ × REVEAL_RATE`
pub const REVEAL_RATE: f32 = 3.0;
/// Quadratic hide rate: `progress = hide_start − elapsed² × HIDE_RATE`
pub const HIDE_RATE: f32 = 6.0;
/// Progress beyond which every particle is fully visible
pub const REVEAL_CEILING: f32 = 2.0;
/// Weight of normalized distance from the reveal origin in a particle's intro offset
pub const INTRO_DISTANCE_WEIGHT: f32 = 0.8;
/// Weight of per-particle jitter in the intro offset
pub const INTRO_JITTER_WEIGHT: f32 = 0.5;
/// Steepness of the per-particle opacity ramp after its threshold
pub const OPACITY_RAMP: f32 = 8.0;

/// Reveal progress after `elapsed` seconds, capped at the ceiling
pub fn reveal_progress(elapsed: f32, rate: f32) -> f32 {
    let e = elapsed.max(0.0);
    (e * e * e * rate).min(REVEAL_CEILING)
}

/// Hide progress `elapsed` seconds after stopping at `start`
pub fn hide_progress(start: f32, elapsed: f32, rate: f32) -> f32 {
    let e = elapsed.max(0.0);
    start - e * e * rate
}

/// Inverse of [`reveal_progress`]: the elapsed reveal time that yields `progress`
pub fn progress_to_elapsed(progress: f32, rate: f32) -> f32 {
    if progress <= 0.0 || rate <= 0.0 {
        return 0.0;
    }
    (progress / rate).cbrt()
}

/// Progress a particle must pass before it starts to appear
pub fn intro_offset(normalized_distance: f32, jitter: f32) -> f32 {
    normalized_distance.clamp(0.0, 1.0) * INTRO_DISTANCE_WEIGHT
        + jitter.clamp(0.0, 1.0) * INTRO_JITTER_WEIGHT
}

/// Opacity of a particle with `intro_offset` at the given progress
pub fn reveal_opacity(progress: f32, intro_offset: f32) -> f32 {
    if progress <= intro_offset {
        return 0.0;
    }
    let ramp = (progress - intro_offset) * OPACITY_RAMP;
    (ramp * ramp).min(1.0)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmissionPhase {
    Idle,
    Revealing,
    Steady,
    Hiding,
}

/// Snapshot of the controller's bookkeeping
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EmissionState {
    pub emitting: bool,
    pub reveal_progress: f32,
    pub max_reveal_progress: f32,
    pub hide_start_progress: f32,
    /// Timestamp (seconds) the current reveal or hide is measured from
    pub started_at: f64,
}

impl Default for EmissionState {
    fn default() -> Self {
        Self {
            emitting: false,
            reveal_progress: 0.0,
            max_reveal_progress: 0.0,
            hide_start_progress: 0.0,
            started_at: 0.0,
        }
    }
}

/// Per-effect emission state machine: `Idle → Revealing → Steady → Hiding → Idle`
#[derive(Clone, Debug)]
pub struct EmissionController {
    policy: TriggerPolicy,
    phase: EmissionPhase,
    state: EmissionState,
}

impl EmissionController {
    pub fn new(policy: TriggerPolicy) -> Self {
        Self {
            policy,
            phase: EmissionPhase::Idle,
            state: EmissionState::default(),
        }
    }

    pub fn policy(&self) -> TriggerPolicy {
        self.policy
    }

    pub fn phase(&self) -> EmissionPhase {
        self.phase
    }

    pub fn state(&self) -> &EmissionState {
        &self.state
    }

    pub fn is_emitting(&self) -> bool {
        self.state.emitting
    }

    /// Begin or resume revealing
    pub fn start(&mut self, now: f64) {
        match self.phase {
            EmissionPhase::Revealing | EmissionPhase::Steady => return,
            EmissionPhase::Hiding => {
                let current = self.progress_at(now).max(0.0);
                self.state.started_at = now - progress_to_elapsed(current, REVEAL_RATE) as f64;
                self.state.reveal_progress = current;
                self.state.max_reveal_progress = current;
                self.phase = EmissionPhase::Revealing;
                log::debug!("emission resumed from hide at progress {current:.3}");
            }
            EmissionPhase::Idle => {
                if self.policy == TriggerPolicy::Instant {
                    self.state.started_at =
                        now - progress_to_elapsed(REVEAL_CEILING, REVEAL_RATE) as f64;
                    self.state.reveal_progress = REVEAL_CEILING;
                    self.state.max_reveal_progress = REVEAL_CEILING;
                    self.phase = EmissionPhase::Steady;
                } else {
                    self.state.started_at = now;
                    self.state.reveal_progress = 0.0;
                    self.state.max_reveal_progress = 0.0;
                    self.phase = EmissionPhase::Revealing;
                }
                log::debug!("emission started ({:?})", self.phase);
            }
        }
        self.state.emitting = true;
    }

    /// Stop emitting and hide from the current reveal progress
    pub fn stop(&mut self, now: f64) {
        if matches!(self.phase, EmissionPhase::Idle | EmissionPhase::Hiding) {
            return;
        }
        let current = self.progress_at(now);
        self.state.max_reveal_progress = self.state.max_reveal_progress.max(current);
        self.state.hide_start_progress = self.state.max_reveal_progress;
        self.state.emitting = false;

        if self.state.hide_start_progress <= 0.0 {
            // Nothing was revealed, nothing to animate out
            self.phase = EmissionPhase::Idle;
            self.state.reveal_progress = 0.0;
            log::debug!("emission stopped before any reveal");
            return;
        }
        self.state.started_at = now;
        self.phase = EmissionPhase::Hiding;
        log::debug!(
            "emission stopped, hiding from {:.3}",
            self.state.hide_start_progress
        );
    }

    /// Flip between emitting and not emitting
    pub fn toggle(&mut self, now: f64) {
        if self.state.emitting {
            self.stop(now);
        } else {
            self.start(now);
        }
    }

    /// Progress at `now` without changing phase
    pub fn progress_at(&self, now: f64) -> f32 {
        let elapsed = (now - self.state.started_at).max(0.0) as f32;
        match self.phase {
            EmissionPhase::Idle => 0.0,
            EmissionPhase::Steady => REVEAL_CEILING,
            EmissionPhase::Revealing => reveal_progress(elapsed, REVEAL_RATE),
            EmissionPhase::Hiding => {
                hide_progress(self.state.hide_start_progress, elapsed, HIDE_RATE).max(0.0)
            }
        }
    }

    /// Advance phase transitions to `now` and return the current progress
    pub fn update(&mut self, now: f64) -> f32 {
        let progress = self.progress_at(now);
        match self.phase {
            EmissionPhase::Revealing => {
                self.state.reveal_progress = progress;
                self.state.max_reveal_progress = self.state.max_reveal_progress.max(progress);
                if progress >= REVEAL_CEILING && self.policy.settles() {
                    self.phase = EmissionPhase::Steady;
                }
            }
            EmissionPhase::Hiding => {
                self.state.reveal_progress = progress;
                if progress <= 0.0 {
                    self.phase = EmissionPhase::Idle;
                    self.state.max_reveal_progress = 0.0;
                    log::debug!("hide complete");
                }
            }
            EmissionPhase::Steady | EmissionPhase::Idle => {
                self.state.reveal_progress = progress;
            }
        }
        progress
    }
}
