// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Holofield Summary Types
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

/// Descriptive statistics of a grid snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    /// Count of NaN/Inf cells.
    pub non_finite: usize,
}

impl GridStats {
    /// Compute statistics over the finite values of `cells`.
    ///
    /// Non-finite cells are counted but excluded from the moments. An empty
    /// or fully non-finite input yields zeros.
    pub fn from_cells(cells: &[f64]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut count = 0usize;
        let mut non_finite = 0usize;

        for &v in cells {
            if !v.is_finite() {
                non_finite += 1;
                continue;
            }
            min = min.min(v);
            max = max.max(v);
            sum += v;
            count += 1;
        }

        if count == 0 {
            if non_finite > 0 {
                log::warn!("GridStats: all {non_finite} cells are non-finite");
            }
            return Self {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                variance: 0.0,
                non_finite,
            };
        }

        let mean = sum / count as f64;
        let variance = cells
            .iter()
            .filter(|v| v.is_finite())
            .map(|&v| (v - mean).powi(2))
            .sum::<f64>()
            / count as f64;

        Self {
            min,
            max,
            mean,
            variance,
            non_finite,
        }
    }

    /// True if every cell was finite.
    pub fn is_finite(&self) -> bool {
        self.non_finite == 0
    }
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    /// Steps executed.
    pub steps: usize,
    /// Frames delivered to the observer.
    pub frames: usize,
    /// Driver signal value range over the run.
    pub driver_min: f64,
    pub driver_max: f64,
    /// Grid statistics before the first step.
    pub initial: GridStats,
    /// Grid statistics after the last step.
    pub final_stats: GridStats,
    /// First step at which a non-finite cell appeared, if any.
    pub diverged_at: Option<usize>,
    pub elapsed_ms: f64,
}
