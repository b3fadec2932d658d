//! Build a concrete effect from its configuration

use crate::config::{EffectConfig, EffectKind};
use glint_core::{resolve_set, ColorResolver};
use glint_field::{DotMatrixConfig, DotMatrixEffect};
use glint_lightning::{LightningConfig, LightningEffect, StormEffect};
use glint_particles::{
    ConfettiConfig, ConfettiEffect, FireworksConfig, FireworksEffect, WeatherConfig,
    WeatherEffect, WeatherKind,
};
use glint_runtime::Effect;

/// Resolve the color tokens once and construct the effect for `config.kind`
pub fn build_effect(config: &EffectConfig, resolver: &dyn ColorResolver) -> Box<dyn Effect> {
    let colors = resolve_set(resolver, &config.colors);
    let weather = |kind| WeatherConfig {
        kind,
        count: config.count(),
        speed: config.speed,
        angle: config.angle,
        colors: colors.clone(),
    };
    let lightning = || LightningConfig {
        bolt_frequency: config.bolt_frequency,
        colors: colors.clone(),
        ..LightningConfig::default()
    };

    match config.kind {
        EffectKind::Rain => Box::new(WeatherEffect::new(weather(WeatherKind::Rain))),
        EffectKind::Snow => Box::new(WeatherEffect::new(weather(WeatherKind::Snow))),
        EffectKind::Leaves => Box::new(WeatherEffect::new(weather(WeatherKind::Leaves))),
        EffectKind::Confetti => Box::new(ConfettiEffect::new(ConfettiConfig {
            rate: config.intensity,
            speed: config.speed,
            burst_count: config.burst_count,
            colors: colors.clone(),
        })),
        EffectKind::Fireworks => Box::new(FireworksEffect::new(FireworksConfig {
            rate: config.intensity / 60.0,
            speed: config.speed,
            colors: colors.clone(),
        })),
        EffectKind::Lightning => Box::new(LightningEffect::new(lightning())),
        EffectKind::Storm => Box::new(StormEffect::new(
            weather(WeatherKind::Rain),
            lightning(),
        )),
        EffectKind::DotMatrix => Box::new(DotMatrixEffect::new(DotMatrixConfig {
            spacing: config.dot_spacing,
            dot_size: config.dot_size,
            origin: config.reveal_origin,
            colors: colors.clone(),
            field: config.field.clone(),
            ..DotMatrixConfig::default()
        })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_core::{Color, FxRng, Palette};
    use glint_render::{CommandRecorder, DrawCommand};
    use glint_runtime::FrameContext;

    #[test]
    fn every_kind_builds_and_names_itself() {
        let palette = Palette::default();
        for kind in EffectKind::ALL {
            let effect = build_effect(&EffectConfig::new(kind), &palette);
            assert_eq!(effect.name(), kind.name());
        }
    }

    fn emitting(width: f32, height: f32) -> FrameContext {
        FrameContext {
            time: 0.0,
            dt: 1.0 / 60.0,
            width,
            height,
            emitting: true,
            progress: 2.0,
        }
    }

    #[test]
    fn weather_pool_matches_intensity() {
        let palette = Palette::default();
        let config = EffectConfig {
            intensity: 37.0,
            ..EffectConfig::new(EffectKind::Snow)
        };
        let mut effect = build_effect(&config, &palette);
        let mut rng = FxRng::seeded(1);
        effect.resize(300.0, 200.0, &mut rng);
        assert_eq!(effect.live_count(), 0);
        effect.step(&emitting(300.0, 200.0), &mut rng);
        assert_eq!(effect.live_count(), 37);
    }

    #[test]
    fn custom_resolver_is_used() {
        let resolver = |token: &str| (token == "brand").then_some(Color::from_hex(0x3366ff));
        let config = EffectConfig {
            colors: vec!["brand".into()],
            intensity: 5.0,
            ..EffectConfig::new(EffectKind::Rain)
        };
        let mut effect = build_effect(&config, &resolver);
        let mut rng = FxRng::seeded(1);
        effect.resize(100.0, 100.0, &mut rng);
        let ctx = emitting(100.0, 100.0);
        effect.step(&ctx, &mut rng);
        assert_eq!(effect.live_count(), 5);

        let mut rec = CommandRecorder::new();
        effect.draw(&mut rec, &ctx);
        for command in rec.commands() {
            if let DrawCommand::Stroke { color, .. } = command {
                assert_eq!(*color, Color::from_hex(0x3366ff));
            }
        }
    }
}
