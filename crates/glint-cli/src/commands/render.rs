//! Headless simulate-and-export command

use anyhow::{Context, Result};
use glint_fx::{EffectConfig, EffectHandle, FrameStats, TriggerEvent, TriggerPolicy};
use std::path::Path;

pub struct RenderArgs {
    pub config: String,
    pub output: String,
    pub width: f32,
    pub height: f32,
    pub ratio: f32,
    pub seconds: f64,
    pub fps: u32,
    pub every: u32,
    pub stop_at: Option<f64>,
}

/// Host event that switches emission on under each trigger policy
fn activation(policy: TriggerPolicy, width: f32, height: f32) -> Option<TriggerEvent> {
    match policy {
        TriggerPolicy::Mount | TriggerPolicy::Instant => None,
        TriggerPolicy::Hover => Some(TriggerEvent::PointerEnter),
        TriggerPolicy::Click => Some(TriggerEvent::PointerDown {
            x: width * 0.5,
            y: height * 0.5,
        }),
        TriggerPolicy::External => Some(TriggerEvent::ExternalActive(true)),
    }
}

pub fn run(args: RenderArgs) -> Result<()> {
    let config = EffectConfig::load(&args.config)
        .with_context(|| format!("Failed to load config {}", args.config))?;
    println!("Loaded {} effect from {}", config.kind, args.config);

    let mut handle = EffectHandle::headless(&config);
    handle
        .resize(args.width, args.height, args.ratio)
        .context("Invalid surface size")?;

    let out_dir = Path::new(&args.output);
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    handle.handle_event(TriggerEvent::Mount, 0.0);
    if let Some(event) = activation(config.trigger, args.width, args.height) {
        handle.handle_event(event, 0.0);
    }

    let fps = f64::from(args.fps.max(1));
    let frames = (args.seconds.max(0.0) * fps).round() as u64;
    let mut stopped = false;
    let mut written = 0;
    let mut totals = FrameStats::default();
    let mut last = FrameStats::default();

    for frame in 0..=frames {
        let now = frame as f64 / fps;
        if let Some(stop_at) = args.stop_at {
            if !stopped && now >= stop_at {
                handle.stop(now);
                stopped = true;
                log::info!("emission stopped at {now:.2}s");
            }
        }

        last = handle.tick(now);
        totals.steps += last.steps;
        totals.drawn += last.drawn;
        totals.skipped += last.skipped;

        if frame % u64::from(args.every) == 0 {
            let pixels = handle.target().pixels();
            let path = out_dir.join(format!("frame_{frame:05}.png"));
            let img = image::RgbaImage::from_raw(
                pixels.width(),
                pixels.height(),
                pixels.as_bytes().to_vec(),
            )
            .context("Failed to create image from pixel data")?;
            img.save(&path)
                .with_context(|| format!("Failed to save image to {}", path.display()))?;
            written += 1;
        }
    }

    println!(
        "Simulated {} frames ({} steps) at {}x{} @ {}",
        frames + 1,
        totals.steps,
        args.width,
        args.height,
        args.ratio
    );
    println!(
        "Draw calls: {} drawn, {} skipped; {} live at end ({:?})",
        totals.drawn,
        totals.skipped,
        last.live,
        handle.phase()
    );
    println!("Wrote {written} frame(s) to {}", out_dir.display());
    Ok(())
}
