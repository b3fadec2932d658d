//! Lightning effect: bolts at random intervals with a brief surface flash

use crate::bolt::{generate_bolt, Bolt, BoltParams, Branch};
use crate::reveal::{branch_segments_drawn, segments_drawn, BoltTiming};
use glint_core::{Color, FxRng, Transform2D, Vec2};
use glint_render::{DrawSurface, Paint, Shape};
use glint_runtime::{DrawStats, Effect, FrameContext};

/// Seconds the flash takes to fade out
const FLASH_DURATION: f32 = 0.1;
const FLASH_OPACITY: f32 = 0.25;
/// Glow pass around the main stroke
const GLOW_WIDTH: f32 = 3.0;
const GLOW_OPACITY: f32 = 0.25;

#[derive(Clone, Debug, PartialEq)]
pub struct LightningConfig {
    /// Mean bolts per second while emitting
    pub bolt_frequency: f32,
    pub thickness: f32,
    pub flash: bool,
    pub colors: Vec<Color>,
    pub params: BoltParams,
    pub timing: BoltTiming,
}

impl Default for LightningConfig {
    fn default() -> Self {
        Self {
            bolt_frequency: 0.8,
            thickness: 2.5,
            flash: true,
            colors: vec![Color::WHITE],
            params: BoltParams::default(),
            timing: BoltTiming::default(),
        }
    }
}

pub struct LightningEffect {
    config: LightningConfig,
    bolts: Vec<Bolt>,
    /// Age of the most recent flash, `None` once faded
    flash_age: Option<f32>,
    width: f32,
    height: f32,
}

impl LightningEffect {
    pub fn new(config: LightningConfig) -> Self {
        Self {
            config,
            bolts: Vec::new(),
            flash_age: None,
            width: 0.0,
            height: 0.0,
        }
    }

    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    pub fn flash_opacity(&self) -> f32 {
        match self.flash_age {
            Some(age) if self.config.flash => {
                FLASH_OPACITY * (1.0 - age / FLASH_DURATION).clamp(0.0, 1.0)
            }
            _ => 0.0,
        }
    }

    /// Strike from the top edge at `x` down to `end_y`
    pub fn strike(&mut self, x: f32, end_y: f32, rng: &mut FxRng) {
        let color = rng.pick(&self.config.colors).copied().unwrap_or(Color::WHITE);
        let bolt = generate_bolt(
            x,
            end_y,
            self.config.thickness,
            color,
            &self.config.params,
            rng,
        );
        log::trace!(
            "bolt at x={x:.0}: {} segments, {} branches",
            bolt.segment_count(),
            bolt.branch_count()
        );
        self.bolts.push(bolt);
        self.flash_age = Some(0.0);
    }

    fn draw_branch(
        &self,
        surface: &mut dyn DrawSurface,
        branch: &Branch,
        parent_drawn: usize,
        color: Color,
        opacity: f32,
        stats: &mut DrawStats,
    ) {
        let drawn = branch_segments_drawn(branch.segment_count(), parent_drawn, branch.start_index);
        if drawn == 0 {
            return;
        }
        stats.record(surface.stroke_polyline(
            &branch.points[..=drawn],
            color,
            branch.thickness,
            opacity,
        ));
        for child in &branch.children {
            self.draw_branch(surface, child, drawn, color, opacity, stats);
        }
    }

    fn draw_bolt(&self, surface: &mut dyn DrawSurface, bolt: &Bolt, stats: &mut DrawStats) {
        let timing = &self.config.timing;
        let drawn = segments_drawn(bolt.segment_count(), bolt.age, timing.reveal);
        if drawn == 0 {
            return;
        }
        let opacity = timing.opacity(bolt.age);
        let stroke = &bolt.points[..=drawn];
        stats.record(surface.stroke_polyline(
            stroke,
            bolt.color,
            bolt.thickness * GLOW_WIDTH,
            opacity * GLOW_OPACITY,
        ));
        stats.record(surface.stroke_polyline(stroke, Color::WHITE, bolt.thickness, opacity));
        for branch in &bolt.branches {
            self.draw_branch(surface, branch, drawn, bolt.color, opacity, stats);
        }
    }
}

impl Effect for LightningEffect {
    fn resize(&mut self, width: f32, height: f32, _rng: &mut FxRng) {
        self.width = width;
        self.height = height;
    }

    fn step(&mut self, ctx: &FrameContext, rng: &mut FxRng) {
        for bolt in &mut self.bolts {
            bolt.age += ctx.dt;
        }
        let timing = self.config.timing;
        self.bolts.retain(|b| !timing.is_expired(b.age));

        self.flash_age = match self.flash_age {
            Some(age) if age + ctx.dt < FLASH_DURATION => Some(age + ctx.dt),
            _ => None,
        };

        if ctx.emitting && rng.chance(self.config.bolt_frequency * ctx.dt) {
            let x = rng.range(self.width * 0.1, self.width * 0.9);
            let end_y = self.height * rng.range(0.7, 1.0);
            self.strike(x, end_y, rng);
        }
    }

    fn draw(&self, surface: &mut dyn DrawSurface, _ctx: &FrameContext) -> DrawStats {
        let mut stats = DrawStats::default();
        let flash = self.flash_opacity();
        if flash > 0.0 {
            stats.record(surface.fill_shape(
                Shape::Rect {
                    width: self.width,
                    height: self.height,
                },
                &Transform2D::at(Vec2::new(self.width * 0.5, self.height * 0.5)),
                Paint::Solid(Color::WHITE),
                flash,
            ));
        }
        for bolt in &self.bolts {
            self.draw_bolt(surface, bolt, &mut stats);
        }
        stats
    }

    /// Strike straight down to the pointer, kept inside the surface
    fn burst(&mut self, at: Vec2, rng: &mut FxRng) {
        let x = at.x.clamp(0.0, self.width.max(0.0));
        let end_y = at.y.clamp(0.0, self.height.max(0.0));
        self.strike(x, end_y, rng);
    }

    fn live_count(&self) -> usize {
        self.bolts.len()
    }

    fn clear(&mut self) {
        self.bolts.clear();
        self.flash_age = None;
    }

    fn name(&self) -> &str {
        "lightning"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_render::CommandRecorder;

    fn ctx(emitting: bool) -> FrameContext {
        FrameContext {
            time: 0.0,
            dt: 1.0 / 60.0,
            width: 400.0,
            height: 300.0,
            emitting,
            progress: 2.0,
        }
    }

    fn effect(config: LightningConfig) -> (LightningEffect, FxRng) {
        let mut rng = FxRng::seeded(4);
        let mut fx = LightningEffect::new(config);
        fx.resize(400.0, 300.0, &mut rng);
        (fx, rng)
    }

    #[test]
    fn bolt_expires_after_lifetime() {
        let (mut fx, mut rng) = effect(LightningConfig::default());
        fx.strike(200.0, 300.0, &mut rng);
        assert_eq!(fx.live_count(), 1);
        for _ in 0..35 {
            fx.step(&ctx(false), &mut rng);
        }
        assert_eq!(fx.live_count(), 1);
        for _ in 0..5 {
            fx.step(&ctx(false), &mut rng);
        }
        assert_eq!(fx.live_count(), 0);
    }

    #[test]
    fn main_stroke_grows_during_reveal() {
        let (mut fx, mut rng) = effect(LightningConfig {
            flash: false,
            ..Default::default()
        });
        fx.strike(200.0, 300.0, &mut rng);
        let total = fx.bolts()[0].segment_count();

        // Nothing drawn at age 0
        let mut rec = CommandRecorder::new();
        assert_eq!(fx.draw(&mut rec, &ctx(false)).drawn, 0);

        let mut previous = 0;
        for _ in 0..6 {
            fx.step(&ctx(false), &mut rng);
            let mut rec = CommandRecorder::new();
            fx.draw(&mut rec, &ctx(false));
            // Second stroke is the core of the main bolt
            let (points, _, _) = rec.strokes().nth(1).unwrap();
            assert!(points.len() - 1 >= previous);
            previous = points.len() - 1;
        }
        assert_eq!(previous, total);
    }

    #[test]
    fn flash_fades_and_can_be_disabled() {
        let (mut fx, mut rng) = effect(LightningConfig::default());
        fx.strike(100.0, 200.0, &mut rng);
        assert!((fx.flash_opacity() - FLASH_OPACITY).abs() < 1e-6);
        for _ in 0..10 {
            fx.step(&ctx(false), &mut rng);
        }
        assert_eq!(fx.flash_opacity(), 0.0);

        let (mut quiet, mut rng) = effect(LightningConfig {
            flash: false,
            ..Default::default()
        });
        quiet.strike(100.0, 200.0, &mut rng);
        assert_eq!(quiet.flash_opacity(), 0.0);
    }

    #[test]
    fn emission_spawns_bolts() {
        let (mut fx, mut rng) = effect(LightningConfig {
            bolt_frequency: 30.0,
            ..Default::default()
        });
        let mut spawned = false;
        for _ in 0..60 {
            fx.step(&ctx(true), &mut rng);
            spawned |= fx.live_count() > 0;
        }
        assert!(spawned);

        fx.clear();
        for _ in 0..60 {
            fx.step(&ctx(false), &mut rng);
        }
        assert_eq!(fx.live_count(), 0);
    }

    #[test]
    fn far_pointer_burst_stays_surface_sized() {
        let (mut fx, mut rng) = effect(LightningConfig::default());
        fx.burst(Vec2::new(-5_000.0, 1.0e7), &mut rng);
        let bolt = &fx.bolts()[0];
        let min_descent = bolt_step() * std::f32::consts::FRAC_PI_4.sin();
        let cap = (300.0 / min_descent).ceil() as usize + 1;
        assert!(bolt.segment_count() <= cap);
        assert_eq!(bolt.points[0].x, 0.0);
        let last = bolt.points[bolt.points.len() - 1];
        assert!(last.y < 300.0 + bolt_step());
    }

    fn bolt_step() -> f32 {
        BoltParams::default().step
    }

    #[test]
    fn branches_never_outrun_parent() {
        let (mut fx, mut rng) = effect(LightningConfig {
            flash: false,
            params: BoltParams {
                branch_probability: 1.0,
                ..Default::default()
            },
            ..Default::default()
        });
        fx.strike(200.0, 300.0, &mut rng);
        fx.step(&ctx(false), &mut rng);
        let bolt = &fx.bolts()[0];
        let parent_drawn = segments_drawn(bolt.segment_count(), bolt.age, 0.06);
        assert!(parent_drawn < bolt.segment_count());
        for branch in &bolt.branches {
            let drawn =
                branch_segments_drawn(branch.segment_count(), parent_drawn, branch.start_index);
            if branch.start_index >= parent_drawn {
                assert_eq!(drawn, 0);
            }
        }
        let mut rec = CommandRecorder::new();
        let stats = fx.draw(&mut rec, &ctx(false));
        let visible = bolt
            .branches
            .iter()
            .filter(|b| b.start_index < parent_drawn)
            .count();
        assert!(stats.drawn >= 2 + visible);
    }
}
