use anyhow::{Context, Result};
use clap::Parser;
use cubewalk::{parse_path, run, RunOptions, SceneConfig};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cubewalk")]
#[command(about = "Walk a character around a cube world and report the camera", long_about = None)]
struct Cli {
    /// Scene file (TOML). A generated cube is used when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Cells added per side per level, for the generated cube
    #[arg(long, default_value_t = 5)]
    delta: u8,

    /// Basement levels, for the generated cube
    #[arg(long, default_value_t = 1)]
    basements: u8,

    /// Steps to walk, e.g. "R3 U2 L" (overrides the scene's path)
    #[arg(short, long)]
    path: Option<String>,

    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,

    /// Frames simulated after each step
    #[arg(long, default_value_t = 30)]
    frames_per_step: u32,

    /// Print every frame sample as a JSON line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.scene {
        Some(path) => SceneConfig::load(path)?,
        None => SceneConfig::demo(cli.delta, cli.basements),
    };
    if let Some(path) = cli.path {
        config.path = path;
    }
    let path = parse_path(&config.path)?;
    let options = RunOptions {
        dt: cli.dt,
        frames_per_step: cli.frames_per_step,
    };

    let mut world = config.build()?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let (report, summary) = run(&mut world, config.follow.clone(), &path, &options, |sample| {
        if cli.json {
            let line = serde_json::to_string(sample).context("Failed to encode frame")?;
            writeln!(out, "{line}")?;
        }
        Ok(())
    })?;

    if !report.rejections.is_empty() {
        tracing::warn!("{} map(s) were left out of the cube", report.rejections.len());
    }
    if !cli.json {
        println!(
            "{} steps: {} moves, {} crossings, {} blocked, {} transitions",
            summary.steps, summary.moves, summary.crossings, summary.blocked, summary.transitions
        );
        println!(
            "Ended on '{}' at ({}, {})",
            summary.final_map, summary.final_cell.x, summary.final_cell.y
        );
    }
    Ok(())
}
