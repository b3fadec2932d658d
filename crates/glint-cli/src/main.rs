//! Glint CLI - inspect effect configs and render them to PNG frames

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, list, render};

#[derive(Parser)]
#[command(name = "glint")]
#[command(about = "Procedural 2D visual effects, simulated headlessly", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available effect kinds
    List,

    /// Parse and validate an effect config, then print it normalized
    Check {
        /// Path to effect config (TOML)
        config: String,

        /// Output format (toml or json)
        #[arg(long, default_value = "toml", value_parser = parse_format)]
        format: String,
    },

    /// Simulate an effect and write frames as PNG images
    Render {
        /// Path to effect config (TOML)
        config: String,

        /// Output directory for frames
        #[arg(short, long, default_value = "frames")]
        output: String,

        /// Logical surface width
        #[arg(long, default_value = "640")]
        width: f32,

        /// Logical surface height
        #[arg(long, default_value = "360")]
        height: f32,

        /// Device pixel ratio
        #[arg(long, default_value = "1.0")]
        ratio: f32,

        /// Simulated duration in seconds
        #[arg(long, default_value = "3.0")]
        seconds: f64,

        /// Simulated display refresh rate
        #[arg(long, default_value = "60")]
        fps: u32,

        /// Write every Nth frame
        #[arg(long, default_value = "10", value_parser = clap::value_parser!(u32).range(1..))]
        every: u32,

        /// Stop emission at this time (seconds) to capture the hide animation
        #[arg(long)]
        stop_at: Option<f64>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "toml" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{s}'; valid values: toml, json")),
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::List => list::run(),
        Commands::Check { config, format } => check::run(&config, &format),
        Commands::Render {
            config,
            output,
            width,
            height,
            ratio,
            seconds,
            fps,
            every,
            stop_at,
        } => render::run(render::RenderArgs {
            config,
            output,
            width,
            height,
            ratio,
            seconds,
            fps,
            every,
            stop_at,
        }),
    }
}
