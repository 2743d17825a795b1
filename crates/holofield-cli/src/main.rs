// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Holofield Runner
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Runs one Holofield simulation to completion.
//!
//! Usage: `holofield [--config FILE.json] [--steps N] [--grid-size N]
//! [--window N] [--precision N] [--step-size F] [--display-interval N]
//! [--constant pi|e] [--digits-file FILE] [--frames FILE.jsonl] [--quiet]`
//!
//! Flags override values from `--config`. Frames are logged at `info`
//! (silenced by `--quiet`) and optionally streamed as JSON lines.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::process;

use clap::Parser;

use holofield_core::{FanOut, JsonLinesObserver, LogObserver, NullObserver, Simulation};
use holofield_signal::PrecomputedDigits;
use holofield_types::{Constant, HolofieldResult, RunSummary, SimulationConfig};

#[derive(Parser, Debug)]
#[command(name = "holofield")]
#[command(about = "Digit-driven toroidal diffusion: whole and part from one signal")]
struct Args {
    /// JSON config file; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulation steps
    #[arg(long)]
    steps: Option<usize>,

    /// Grid side length
    #[arg(long)]
    grid_size: Option<usize>,

    /// Moving-average window over the digits
    #[arg(long)]
    window: Option<usize>,

    /// Digits to expand from the constant
    #[arg(long)]
    precision: Option<usize>,

    /// Integration step (Ψ += step_size · ΔΨ)
    #[arg(long)]
    step_size: Option<f64>,

    /// Frame cadence in steps
    #[arg(long)]
    display_interval: Option<usize>,

    /// Constant whose digits drive the run (pi or e)
    #[arg(long)]
    constant: Option<Constant>,

    /// Read pre-computed fractional digits from a text file instead
    #[arg(long, conflicts_with = "constant")]
    digits_file: Option<PathBuf>,

    /// Write one JSON record per frame to this file
    #[arg(long)]
    frames: Option<PathBuf>,

    /// Do not log per-frame lines
    #[arg(long)]
    quiet: bool,
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .init();
}

fn build_config(args: &Args) -> HolofieldResult<SimulationConfig> {
    let mut cfg = match &args.config {
        Some(path) => SimulationConfig::from_json(&fs::read_to_string(path)?)?,
        None => SimulationConfig::default(),
    };

    if let Some(v) = args.steps {
        cfg.simulation_length = v;
    }
    if let Some(v) = args.grid_size {
        cfg.grid_size = v;
    }
    if let Some(v) = args.window {
        cfg.window_size = v;
    }
    if let Some(v) = args.step_size {
        cfg.step_size = v;
    }
    if let Some(v) = args.display_interval {
        cfg.display_interval = v;
    }
    if let Some(v) = args.constant {
        cfg.constant = v;
    }
    // Shape flags without an explicit precision: size the expansion to fit.
    match args.precision {
        Some(v) => cfg.digit_precision = v,
        None if args.config.is_none() => cfg.digit_precision = cfg.required_digits(),
        None => {}
    }
    Ok(cfg)
}

fn run(args: &Args) -> HolofieldResult<RunSummary> {
    let cfg = build_config(args)?;
    let source = match &args.digits_file {
        Some(path) => path.display().to_string(),
        None => cfg.constant.name().to_string(),
    };
    log::info!(
        "config: steps={} grid={} window={} precision={} step_size={} interval={} source={source}",
        cfg.simulation_length,
        cfg.grid_size,
        cfg.window_size,
        cfg.digit_precision,
        cfg.step_size,
        cfg.display_interval
    );

    let mut sim = match &args.digits_file {
        Some(path) => {
            let source = PrecomputedDigits::from_text(&fs::read_to_string(path)?)?;
            log::info!("loaded {} digits from {}", source.len(), path.display());
            Simulation::from_digits(cfg, source.as_slice())?
        }
        None => Simulation::new(cfg)?,
    };

    let mut log_obs = LogObserver;
    let mut null_obs = NullObserver;
    let mut json_obs = match &args.frames {
        Some(path) => Some(JsonLinesObserver::new(BufWriter::new(File::create(path)?))),
        None => None,
    };

    let mut fan = FanOut::new();
    if args.quiet {
        fan.push(&mut null_obs);
    } else {
        fan.push(&mut log_obs);
    }
    if let Some(obs) = json_obs.as_mut() {
        fan.push(obs);
    }

    sim.run(&mut fan)
}

fn main() {
    init_logging();
    let args = Args::parse();

    match run(&args) {
        Ok(summary) => {
            if let Some(step) = summary.diverged_at {
                log::warn!("grid diverged at step {step}");
            }
            log::info!(
                "done: {} steps, Λ ∈ [{:+.4}, {:+.4}], final Ψ mean={:+.5} var={:.3e}",
                summary.steps,
                summary.driver_min,
                summary.driver_max,
                summary.final_stats.mean,
                summary.final_stats.variance
            );
        }
        Err(e) => {
            log::error!("{e}");
            process::exit(1);
        }
    }
}
