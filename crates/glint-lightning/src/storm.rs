//! Storm: rain with lightning layered on top

use crate::effect::{LightningConfig, LightningEffect};
use glint_core::{FxRng, Vec2};
use glint_particles::{WeatherConfig, WeatherEffect};
use glint_render::DrawSurface;
use glint_runtime::{DrawStats, Effect, FrameContext};

pub struct StormEffect {
    rain: WeatherEffect,
    lightning: LightningEffect,
}

impl StormEffect {
    pub fn new(rain: WeatherConfig, lightning: LightningConfig) -> Self {
        Self {
            rain: WeatherEffect::new(rain),
            lightning: LightningEffect::new(lightning),
        }
    }

    pub fn rain(&self) -> &WeatherEffect {
        &self.rain
    }

    pub fn lightning(&self) -> &LightningEffect {
        &self.lightning
    }
}

impl Effect for StormEffect {
    fn resize(&mut self, width: f32, height: f32, rng: &mut FxRng) {
        self.rain.resize(width, height, rng);
        self.lightning.resize(width, height, rng);
    }

    fn step(&mut self, ctx: &FrameContext, rng: &mut FxRng) {
        self.rain.step(ctx, rng);
        self.lightning.step(ctx, rng);
    }

    fn draw(&self, surface: &mut dyn DrawSurface, ctx: &FrameContext) -> DrawStats {
        let mut stats = self.rain.draw(surface, ctx);
        stats.merge(self.lightning.draw(surface, ctx));
        stats
    }

    fn burst(&mut self, at: Vec2, rng: &mut FxRng) {
        self.lightning.burst(at, rng);
    }

    fn live_count(&self) -> usize {
        self.rain.live_count() + self.lightning.live_count()
    }

    fn clear(&mut self) {
        self.rain.clear();
        self.lightning.clear();
    }

    fn name(&self) -> &str {
        "storm"
    }
}
