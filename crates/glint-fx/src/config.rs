//! Effect configuration loaded from TOML

use glint_core::{GlintError, Result};
use glint_field::{FieldConfig, FieldKind, RevealOrigin};
use glint_runtime::TriggerPolicy;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Upper bound on `intensity`; larger values are clamped
pub const MAX_INTENSITY: f32 = 2000.0;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectKind {
    #[default]
    Rain,
    Snow,
    Leaves,
    Confetti,
    Fireworks,
    Lightning,
    Storm,
    DotMatrix,
}

impl EffectKind {
    pub const ALL: [Self; 8] = [
        Self::Rain,
        Self::Snow,
        Self::Leaves,
        Self::Confetti,
        Self::Fireworks,
        Self::Lightning,
        Self::Storm,
        Self::DotMatrix,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Rain => "rain",
            Self::Snow => "snow",
            Self::Leaves => "leaves",
            Self::Confetti => "confetti",
            Self::Fireworks => "fireworks",
            Self::Lightning => "lightning",
            Self::Storm => "storm",
            Self::DotMatrix => "dot-matrix",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Rain => "angled streaks over a fixed pool; intensity = drop count",
            Self::Snow => "swaying flakes with depth-driven size and speed; intensity = flake count",
            Self::Leaves => "spinning, flipping leaves with a two-color gradient; intensity = leaf count",
            Self::Confetti => "shower from the top plus pointer bursts; intensity = pieces per second",
            Self::Fireworks => "rockets exploding into fading sparks; intensity = launches per minute",
            Self::Lightning => "branching bolts with a surface flash; see bolt_frequency",
            Self::Storm => "rain with lightning; intensity = drop count",
            Self::DotMatrix => "dot lattice revealed from an origin, bent by the field distortion",
        }
    }

    /// Whether pointer bursts do anything for this kind
    pub fn supports_burst(self) -> bool {
        matches!(
            self,
            Self::Confetti | Self::Fireworks | Self::Lightning | Self::Storm
        )
    }
}

impl fmt::Display for EffectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EffectKind {
    type Err = GlintError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| GlintError::UnknownEffect(s.to_string()))
    }
}

/// Everything needed to build and drive one effect
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectConfig {
    pub kind: EffectKind,
    /// Color tokens, resolved once when the effect is built
    pub colors: Vec<String>,
    /// Density: pool size for weather, rate for emitters
    pub intensity: f32,
    /// Speed multiplier
    pub speed: f32,
    /// Weather direction in degrees from vertical
    pub angle: f32,
    pub trigger: TriggerPolicy,
    pub reveal_origin: RevealOrigin,
    /// Fixed seed for reproducible runs
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub field: FieldConfig,
    pub dot_spacing: f32,
    pub dot_size: f32,
    /// Mean bolts per second for lightning and storm
    pub bolt_frequency: f32,
    /// Pieces per pointer burst
    pub burst_count: usize,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            kind: EffectKind::Rain,
            colors: vec!["white".to_string()],
            intensity: 100.0,
            speed: 1.0,
            angle: 0.0,
            trigger: TriggerPolicy::Mount,
            reveal_origin: RevealOrigin::Center,
            seed: None,
            field: FieldConfig::default(),
            dot_spacing: 12.0,
            dot_size: 1.5,
            bolt_frequency: 0.8,
            burst_count: 80,
        }
    }
}

fn check_range(field: &str, value: f64, min: f64, max: f64) -> Result<()> {
    if !value.is_finite() || value < min || value > max {
        return Err(GlintError::ValueOutOfRange {
            field: field.to_string(),
            min,
            max,
            value,
        });
    }
    Ok(())
}

impl EffectConfig {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Parse, validate and normalize a TOML document
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config.normalized())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::debug!("loaded {} config from {}", config.kind, path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| GlintError::ConfigError(e.to_string()))
    }

    /// Reject non-finite, negative and nonsensical values
    pub fn validate(&self) -> Result<()> {
        check_range("intensity", self.intensity as f64, 0.0, f64::MAX)?;
        check_range("speed", self.speed as f64, 0.0, 20.0)?;
        check_range("angle", self.angle as f64, -80.0, 80.0)?;
        check_range("dot_spacing", self.dot_spacing as f64, 2.0, 200.0)?;
        check_range("dot_size", self.dot_size as f64, 0.1, 50.0)?;
        check_range("bolt_frequency", self.bolt_frequency as f64, 0.0, 60.0)?;
        check_range("burst_count", self.burst_count as f64, 0.0, 2000.0)?;

        let field = &self.field;
        if field.kind != FieldKind::None {
            check_range("field.duration", field.duration as f64, 0.01, 600.0)?;
            check_range("field.intensity", field.intensity as f64, 0.0, 10.0)?;
            check_range("field.delay", field.delay as f64, 0.0, 600.0)?;
        }
        Ok(())
    }

    /// Apply soft limits, warning about every value that changed
    pub fn normalized(mut self) -> Self {
        if self.intensity > MAX_INTENSITY {
            log::warn!(
                "intensity {} exceeds {MAX_INTENSITY}, clamping",
                self.intensity
            );
            self.intensity = MAX_INTENSITY;
        }
        if self.colors.is_empty() {
            log::warn!("no colors configured, using white");
            self.colors.push("white".to_string());
        }
        self
    }

    /// Intensity as a particle count
    pub fn count(&self) -> usize {
        self.intensity.max(0.0).round() as usize
    }
}
