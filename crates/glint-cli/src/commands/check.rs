//! Config validation command

use anyhow::{Context, Result};
use glint_core::{resolve_or_neutral, Palette};
use glint_fx::EffectConfig;

pub fn run(path: &str, format: &str) -> Result<()> {
    let config =
        EffectConfig::load(path).with_context(|| format!("Failed to load config {path}"))?;

    if format == "json" {
        let json = serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{json}");
        return Ok(());
    }

    println!("{path}: ok ({})", config.kind);
    let palette = Palette::default();
    for token in &config.colors {
        let [r, g, b, a] = resolve_or_neutral(&palette, token).to_rgba8();
        println!("  color {token:<12} #{r:02x}{g:02x}{b:02x}{a:02x}");
    }
    println!();
    print!("{}", config.to_toml_string().context("Failed to serialize config")?);
    Ok(())
}
