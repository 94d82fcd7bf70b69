//! Application entry point for the particle-life viewer.
//!
//! This binary parses the command line, builds a [`World`] and hands it to
//! [`Viewer`] from the `viewer` module, which runs it inside eframe/egui.

mod viewer;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use particle_life_core::{config::Config, world::World};
use std::path::PathBuf;
use tracing::info;
use viewer::Viewer;

/// Built-in configurations.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum Preset {
    /// 160×120 canvas over a 4×3 world with 500 particles.
    Desktop,
    /// 64×32 LED panel over a 2×1 world with 12 particles.
    Led,
}

#[derive(Parser, Debug)]
#[command(name = "particle-life", about = "Real-time particle-life simulation viewer")]
struct Args {
    /// JSON config file; fields it leaves out take the desktop defaults.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for particle placement and random matrices.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, value_enum, default_value_t = Preset::Desktop)]
    preset: Preset,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut cfg = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => match args.preset {
            Preset::Desktop => Config::default(),
            Preset::Led => Config::led_matrix(),
        },
    };
    if let Some(seed) = args.seed {
        cfg.rng_seed = Some(seed);
    }

    let world = World::new(cfg).context("invalid world configuration")?;
    info!(preset = ?args.preset, "Starting particle-life viewer");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([1000.0, 700.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Particle Life",
        options,
        Box::new(move |_cc| Ok(Box::new(Viewer::new(world)))),
    )
    .map_err(|e| anyhow::anyhow!("viewer failed: {e}"))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
