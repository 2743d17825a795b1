// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Holofield Simulation (Time-Loop Orchestrator)
// ─────────────────────────────────────────────────────────────────────
//! Construction:
//!   1. Validate config
//!   2. Pull digits from the source
//!   3. Build Λ from digits[0 .. length + window]  (fatal if too short)
//!   4. Build Ψ₀ from the next grid_size² digits
//!
//! Per step t:
//!   1. ΔΨ = Λ[t] · ∇²Ψ   (frozen snapshot, row-parallel)
//!   2. Ψ += step_size · ΔΨ
//!   3. Whole/part history now covers Λ[0 ..= t]
//!   4. Frame to the observer if t % display_interval == 0 or t is last

use std::time::Instant;

use holofield_grid::{GridEvolver, Parallelism, PhenomenalGrid};
use holofield_signal::{generate_driver_signal, DigitSource, DriverSignal};
use holofield_types::{GridStats, HolofieldError, HolofieldResult, RunSummary, SimulationConfig};

use crate::history::HistoryView;
use crate::observer::{Frame, FrameObserver};

/// Single-owner simulation state.
pub struct Simulation {
    config: SimulationConfig,
    signal: DriverSignal,
    grid: PhenomenalGrid,
    evolver: GridEvolver,
    initial_stats: GridStats,
    steps_done: usize,
    diverged_at: Option<usize>,
}

impl Simulation {
    /// Expand `config.constant` to `config.digit_precision` digits and
    /// build the run.
    pub fn new(config: SimulationConfig) -> HolofieldResult<Self> {
        let constant = config.constant;
        Self::with_source(config, &constant)
    }

    /// Build the run from an arbitrary digit source.
    pub fn with_source(
        config: SimulationConfig,
        source: &dyn DigitSource,
    ) -> HolofieldResult<Self> {
        config.validate()?;
        let start = Instant::now();
        let digits = source.digits(config.digit_precision)?;
        log::info!(
            "digit source '{}': {} digits in {:.1} ms",
            source.label(),
            digits.len(),
            start.elapsed().as_secs_f64() * 1000.0
        );
        Self::from_digits(config, &digits)
    }

    /// Build the run from a pre-computed digit sequence.
    ///
    /// `config.digit_precision` is ignored; `digits` must hold at least
    /// `simulation_length + window_size + grid_size²` entries.
    pub fn from_digits(config: SimulationConfig, digits: &[u8]) -> HolofieldResult<Self> {
        config.validate_parameters()?;

        // The signal is a hard prerequisite: fail here before any grid work.
        let signal =
            generate_driver_signal(digits, config.simulation_length, config.window_size)?;

        let offset = config.signal_digits();
        let grid_digits = digits.get(offset..).unwrap_or(&[]);
        let grid = PhenomenalGrid::from_digits(grid_digits, config.grid_size).map_err(|e| {
            match e {
                HolofieldError::InsufficientSource { .. } => HolofieldError::InsufficientSource {
                    required: config.required_digits(),
                    available: digits.len(),
                },
                other => other,
            }
        })?;

        let initial_stats = grid.stats();
        let (lo, hi) = signal.range();
        log::info!(
            "simulation ready: {} steps, {}x{} grid, window {}, Λ ∈ [{lo:.4}, {hi:.4}]",
            config.simulation_length,
            config.grid_size,
            config.grid_size,
            config.window_size
        );

        Ok(Self {
            evolver: GridEvolver::new(config.grid_size),
            config,
            signal,
            grid,
            initial_stats,
            steps_done: 0,
            diverged_at: None,
        })
    }

    /// Switch between rayon and single-threaded cell passes.
    pub fn with_parallelism(mut self, parallelism: Parallelism) -> Self {
        self.evolver = GridEvolver::with_parallelism(self.config.grid_size, parallelism);
        self
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn signal(&self) -> &DriverSignal {
        &self.signal
    }

    pub fn grid(&self) -> &PhenomenalGrid {
        &self.grid
    }

    /// Number of completed steps.
    pub fn steps_done(&self) -> usize {
        self.steps_done
    }

    pub fn is_finished(&self) -> bool {
        self.steps_done >= self.config.simulation_length
    }

    /// First step after which the grid held a non-finite cell.
    pub fn diverged_at(&self) -> Option<usize> {
        self.diverged_at
    }

    /// Whole/part views over every driver value consumed so far.
    pub fn history(&self) -> HistoryView<'_> {
        match self.steps_done {
            0 => HistoryView::empty(),
            n => HistoryView::through(&self.signal, n - 1),
        }
    }

    /// Frame for the most recent step, or `None` before the first step.
    pub fn frame(&self) -> Option<Frame<'_>> {
        let t = self.steps_done.checked_sub(1)?;
        Some(Frame {
            step: t,
            driver: self.signal.as_slice()[t],
            grid: &self.grid,
            history: self.history(),
        })
    }

    /// Advance one step. Returns `false` once the run is complete.
    pub fn step(&mut self) -> HolofieldResult<bool> {
        let t = self.steps_done;
        let Some(driver) = self.signal.get(t) else {
            return Ok(false);
        };

        self.evolver
            .step(&mut self.grid, driver, self.config.step_size)?;
        self.steps_done += 1;

        if self.diverged_at.is_none() && !self.grid.is_finite() {
            self.diverged_at = Some(t);
            log::warn!(
                "grid went non-finite at step {t} (Λ={driver:+.5}, step_size={}); continuing unguarded",
                self.config.step_size
            );
        }
        Ok(true)
    }

    /// Run the remaining steps, delivering frames to `observer`.
    ///
    /// Any observer error aborts the run and is returned as-is.
    pub fn run(&mut self, observer: &mut dyn FrameObserver) -> HolofieldResult<RunSummary> {
        let start = Instant::now();
        let interval = self.config.display_interval;
        let mut frames = 0usize;

        while self.step()? {
            let t = self.steps_done - 1;
            if t % interval == 0 || self.is_finished() {
                if let Some(frame) = self.frame() {
                    observer.on_frame(&frame)?;
                    frames += 1;
                }
            }
        }

        let summary = self.summary(frames, start.elapsed().as_secs_f64() * 1000.0);
        observer.on_finish(&summary)?;
        Ok(summary)
    }

    fn summary(&self, frames: usize, elapsed_ms: f64) -> RunSummary {
        let (driver_min, driver_max) = self.signal.range();
        RunSummary {
            steps: self.steps_done,
            frames,
            driver_min,
            driver_max,
            initial: self.initial_stats,
            final_stats: self.grid.stats(),
            diverged_at: self.diverged_at,
            elapsed_ms,
        }
    }
}
