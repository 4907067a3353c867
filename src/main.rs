//! Satellites orbiting a black hole
//!
//! Headless driver: spawns the scenario, runs the frame loop and prints frame
//! latencies. The first frames are cross-checked against the sequential
//! oracles.

mod stats;

use anyhow::{bail, Result};
use clap::Parser;
use glam::Vec2;
use satellite_field::FieldMode;
use satellite_physics::{BODY_COUNT, SUBSTEPS, WINDOW_HEIGHT, WINDOW_WIDTH};
use satellite_simulation::{Simulation, SimulationParams};
use stats::FrameStats;
use std::hash::{DefaultHasher, Hasher};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "satellites")]
#[command(about = "Satellites orbiting a movable black hole, painted as a color field")]
struct Cli {
    /// Scenario seed (0 picks a random one)
    #[arg(default_value_t = 0)]
    seed: u64,

    /// Frames to run
    #[arg(long, default_value_t = 10)]
    frames: u64,

    #[arg(long, default_value_t = WINDOW_WIDTH)]
    width: u32,

    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    height: u32,

    /// Number of satellites
    #[arg(long, default_value_t = BODY_COUNT)]
    bodies: usize,

    /// Euler sub-steps per frame
    #[arg(long, default_value_t = SUBSTEPS)]
    substeps: u32,

    /// Frames checked against the sequential oracles
    #[arg(long, default_value_t = 2)]
    validation_frames: u64,

    /// Paint produced frames with the sqrt-based oracle shader
    #[arg(long)]
    reference_paint: bool,

    /// Black hole position after the validation frames, as "X,Y"
    #[arg(long, value_parser = parse_point)]
    pointer: Option<Vec2>,

    /// Exit with an error on the first frame that fails validation
    #[arg(long)]
    halt_on_failure: bool,
}

fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad X {x:?}: {e}"))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad Y {y:?}: {e}"))?;
    Ok(Vec2::new(x, y))
}

fn frame_digest(bytes: &[u8]) -> u64 {
    let mut hasher = DefaultHasher::new();
    hasher.write(bytes);
    hasher.finish()
}

fn main() -> Result<()> {
    // Initialize logger (RUST_LOG=debug for per-pixel diagnostics)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if cli.seed != 0 {
        log::info!("Using seed: {}", cli.seed);
    }

    let mut params = SimulationParams {
        width: cli.width,
        height: cli.height,
        body_count: cli.bodies,
        seed: cli.seed,
        validation_frames: cli.validation_frames,
        ..Default::default()
    };
    params.integrator.substeps = cli.substeps;
    if cli.reference_paint {
        params.paint_mode = FieldMode::Reference;
    }

    let mut simulation = Simulation::new(params)?;
    let mut stats = FrameStats::new(params.validation_frames);
    let mut failed_frames = 0u64;

    log::info!(
        "✓ Simulation initialized: {} satellites, {}x{}, {} sub-steps per frame",
        params.body_count,
        params.width,
        params.height,
        params.integrator.substeps
    );

    for _ in 0..cli.frames {
        let report = simulation.step(cli.pointer)?;
        stats.record(&report, Instant::now());

        log::debug!(
            "frame {} attractor {:?} digest {:016x}",
            report.frame,
            report.attractor,
            frame_digest(simulation.pixels().as_bytes())
        );

        if !report.passed() {
            failed_frames += 1;
            if cli.halt_on_failure {
                bail!("frame {} failed validation", report.frame);
            }
        }
    }

    if let Some((physics, paint, total)) = stats.averages() {
        log::info!(
            "Finished {} frames ({} timed): {:.1} + {:.1} : {:.1}ms average",
            simulation.frame(),
            stats.timed_frames(),
            physics.as_secs_f64() * 1000.0,
            paint.as_secs_f64() * 1000.0,
            total.as_secs_f64() * 1000.0
        );
    }
    if failed_frames > 0 {
        log::error!("{} frame(s) failed validation", failed_frames);
    }
    if cli.seed != 0 {
        log::info!("Used seed: {}", cli.seed);
    }

    Ok(())
}
