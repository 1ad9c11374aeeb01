//! Ember Field entry point
//!
//! Headless driver: runs the fixed-rate loop, feeds a scripted pointer drag
//! through the input layer and builds a draw list every frame.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use glam::DVec2;

use ember_field::SimConfig;
use ember_field::platform::{PointerEvent, PointerTracker};
use ember_field::renderer::{FrameBuilder, HeatPalette, Presenter};
use ember_field::runner::{StopSignal, Stepper};
use ember_field::sim::{SimState, TickInput};

#[derive(Parser, Debug)]
#[command(version, about = "Toroidal N-body particle field with force-driven heat")]
struct Args {
    /// JSON configuration file (defaults are used for missing fields)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Stop after this many ticks
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Override the configured RNG seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run ticks back to back instead of pacing to the tick rate
    #[arg(long)]
    unpaced: bool,

    /// Write the final particle list as JSON
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

/// Scripted drag: press at tick 60, sweep a circle for a second, release
fn scripted_pointer(tick: u64, config: &SimConfig) -> Vec<PointerEvent> {
    let center = DVec2::new(config.width / 2.0, config.height / 2.0);
    let at = |t: u64| {
        let angle = t as f64 * 0.1;
        center + DVec2::new(angle.cos(), angle.sin()) * 120.0
    };
    match tick {
        60 => vec![PointerEvent::Moved(at(tick)), PointerEvent::Pressed],
        61..=119 => vec![PointerEvent::Moved(at(tick))],
        120 => vec![PointerEvent::Released],
        _ => Vec::new(),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }

    log::info!("Ember Field (native) starting...");
    let mut state = SimState::new(config.clone()).context("invalid simulation configuration")?;

    let stop = StopSignal::new();
    let mut stepper = Stepper::new(config.tick_rate, stop.clone());
    let mut tracker = PointerTracker::new();
    let mut presenter = FrameBuilder::new(HeatPalette::default());

    loop {
        let frame_start = Instant::now();
        if state.time_ticks >= args.ticks {
            stop.raise();
        }

        for event in scripted_pointer(stepper.frames(), &config) {
            tracker.handle(event);
        }
        let input = TickInput {
            spawn: tracker.end_frame(),
        };

        let outcome = stepper.step(&mut state, &input)?;
        if outcome.stopped {
            break;
        }
        presenter.present(state.particles())?;

        if let Some(report) = outcome.report.filter(|r| r.tick % 60 == 0) {
            let stats = presenter.stats();
            log::info!(
                "tick {}: {} particles ({} glowing), heat total {:.2} max {:.3}, {} vertices",
                report.tick,
                report.particles,
                stats.glowing,
                report.total_heat,
                report.max_heat,
                stats.vertices
            );
        }

        if !args.unpaced {
            std::thread::sleep(stepper.remaining(frame_start.elapsed()));
        }
    }

    log::info!(
        "Stopped after {} ticks with {} particles",
        state.time_ticks,
        state.store.count()
    );
    if let Some(path) = &args.snapshot {
        let file = File::create(path)
            .with_context(|| format!("failed to create snapshot {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), state.particles())
            .context("failed to write snapshot")?;
        log::info!("Snapshot written to {}", path.display());
    }
    Ok(())
}
