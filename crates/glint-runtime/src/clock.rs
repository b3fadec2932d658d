//! Frame clock with fixed-timestep accumulator

/// Tracks effect time from host-supplied timestamps and meters out fixed simulation steps
#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Total elapsed time in seconds since the first tick
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Fixed timestep interval (default: 1/60 second)
    pub fixed_timestep: f64,
    /// Frames ticked so far
    pub frame_count: u64,
    /// Accumulated time for fixed-step consumption
    accumulator: f64,
    /// Timestamp of the previous tick
    last_timestamp: Option<f64>,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            fixed_timestep: 1.0 / 60.0,
            frame_count: 0,
            accumulator: 0.0,
            last_timestamp: None,
        }
    }
}

impl FrameClock {
    /// Create a new clock with the default 60Hz fixed timestep
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a clock with a custom fixed timestep
    pub fn with_fixed_timestep(hz: f64) -> Self {
        Self {
            fixed_timestep: 1.0 / hz,
            ..Self::default()
        }
    }

    /// Advance the clock to `now` (seconds). Call once per frame.
    pub fn tick(&mut self, now: f64) {
        self.frame_count += 1;
        let Some(last) = self.last_timestamp else {
            self.last_timestamp = Some(now);
            self.delta_time = 0.0;
            return;
        };
        self.last_timestamp = Some(now);

        // Timestamps that go backwards or jump are clamped (max 250ms frame time)
        let elapsed = (now - last).max(0.0);
        self.delta_time = elapsed.min(0.25);
        self.total_time += self.delta_time;
        self.accumulator += self.delta_time;
    }

    /// Returns true if there's enough accumulated time for a fixed update step
    pub fn should_fixed_update(&self) -> bool {
        self.accumulator >= self.fixed_timestep
    }

    /// Consume one fixed timestep from the accumulator
    pub fn consume_fixed_step(&mut self) {
        self.accumulator -= self.fixed_timestep;
    }
}
