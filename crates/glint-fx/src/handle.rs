//! The per-effect render loop

use crate::config::EffectConfig;
use crate::factory::build_effect;
use glint_core::{ColorResolver, FxRng, Palette, Result};
use glint_render::{Canvas, RenderTarget};
use glint_runtime::{
    EmissionCommand, EmissionController, EmissionPhase, Effect, FrameClock, FrameContext,
    TriggerEvent, TriggerPolicy,
};

/// What one `tick` did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Fixed simulation steps run
    pub steps: u32,
    /// Successful draw calls
    pub drawn: usize,
    /// Draw calls skipped because of invalid geometry
    pub skipped: usize,
    /// Live elements after the frame
    pub live: usize,
}

/// Owns one effect, its emission state and its render target.
///
/// The host calls [`tick`](Self::tick) once per display refresh with a
/// monotonic timestamp in seconds; resize and trigger events may arrive
/// between ticks. Handles built from a config hold a boxed `dyn Effect`;
/// [`from_parts`](Self::from_parts) keeps a concrete effect type.
pub struct EffectHandle<T: RenderTarget = Canvas, E: Effect + ?Sized = dyn Effect> {
    effect: Box<E>,
    target: T,
    emission: EmissionController,
    clock: FrameClock,
    rng: FxRng,
    /// Simulation time, advanced by whole fixed steps
    sim_time: f64,
    /// Logical size the effect was last laid out for
    layout: Option<(f32, f32)>,
    running: bool,
}

impl EffectHandle<Canvas> {
    /// Software-rendered handle using the default palette
    pub fn headless(config: &EffectConfig) -> Self {
        Self::new(config, &Palette::default(), Canvas::new())
    }
}

impl<T: RenderTarget> EffectHandle<T> {
    pub fn new(config: &EffectConfig, resolver: &dyn ColorResolver, target: T) -> Self {
        let effect = build_effect(config, resolver);
        Self::from_parts(
            effect,
            config.trigger,
            FxRng::from_seed_option(config.seed),
            target,
        )
    }
}

impl<T: RenderTarget, E: Effect + ?Sized> EffectHandle<T, E> {
    pub fn from_parts(effect: Box<E>, policy: TriggerPolicy, rng: FxRng, target: T) -> Self {
        log::debug!("{} handle created ({})", effect.name(), policy.label());
        Self {
            effect,
            target,
            emission: EmissionController::new(policy),
            clock: FrameClock::new(),
            rng,
            sim_time: 0.0,
            layout: None,
            running: true,
        }
    }

    pub fn effect(&self) -> &E {
        &self.effect
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn emission(&self) -> &EmissionController {
        &self.emission
    }

    pub fn phase(&self) -> EmissionPhase {
        self.emission.phase()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    pub fn start(&mut self, now: f64) {
        if self.running {
            self.emission.start(now);
        }
    }

    pub fn stop(&mut self, now: f64) {
        if self.running {
            self.emission.stop(now);
        }
    }

    /// Reconfigure the surface. Invalid dimensions leave the handle alive but
    /// drawing nothing until the next valid resize.
    pub fn resize(&mut self, width: f32, height: f32, ratio: f32) -> Result<bool> {
        if !self.running {
            return Ok(false);
        }
        let changed = match self.target.configure(width, height, ratio) {
            Ok(changed) => changed,
            Err(err) => {
                log::warn!("{}: {err}; drawing paused", self.effect.name());
                self.layout = None;
                return Err(err);
            }
        };
        if self.layout != Some((width, height)) {
            self.effect.resize(width, height, &mut self.rng);
            self.layout = Some((width, height));
            log::debug!("{} laid out for {width}x{height}", self.effect.name());
        }
        Ok(changed)
    }

    /// Route a host event through the trigger policy
    pub fn handle_event(&mut self, event: TriggerEvent, now: f64) {
        if !self.running {
            return;
        }
        let reaction = self.emission.policy().react(&event);
        match reaction.emission {
            Some(EmissionCommand::Start) => self.emission.start(now),
            Some(EmissionCommand::Stop) => self.emission.stop(now),
            Some(EmissionCommand::Toggle) => self.emission.toggle(now),
            None => {}
        }
        if let Some(at) = reaction.burst {
            if self.layout.is_some() {
                self.effect.burst(at, &mut self.rng);
            }
        }
        if event == TriggerEvent::Unmount {
            self.shutdown();
        }
    }

    /// Advance to `now`, run the due fixed steps and redraw
    pub fn tick(&mut self, now: f64) -> FrameStats {
        if !self.running {
            return FrameStats::default();
        }
        self.clock.tick(now);
        let progress = self.emission.update(now);

        let (Some((width, height)), true) = (self.layout, self.target.is_drawable()) else {
            // Nothing to simulate against; drop the owed time
            while self.clock.should_fixed_update() {
                self.clock.consume_fixed_step();
            }
            return FrameStats::default();
        };

        let dt = self.clock.fixed_timestep;
        let mut ctx = FrameContext {
            time: self.sim_time as f32,
            dt: dt as f32,
            width,
            height,
            emitting: self.emission.is_emitting(),
            progress,
        };
        let mut steps = 0;
        while self.clock.should_fixed_update() {
            self.clock.consume_fixed_step();
            self.sim_time += dt;
            ctx.time = self.sim_time as f32;
            self.effect.step(&ctx, &mut self.rng);
            steps += 1;
        }

        self.target.clear();
        let draw = self.effect.draw(&mut self.target, &ctx);
        if draw.skipped > 0 {
            log::trace!("{}: skipped {} draw calls", self.effect.name(), draw.skipped);
        }
        FrameStats {
            steps,
            drawn: draw.drawn,
            skipped: draw.skipped,
            live: self.effect.live_count(),
        }
    }

    /// Stop for good: later calls are no-ops and storage is released
    pub fn shutdown(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        self.effect.clear();
        self.target.release();
        self.layout = None;
        log::debug!("{} handle shut down", self.effect.name());
    }
}
