// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Holofield Kernel Configuration
// ─────────────────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

use crate::error::{HolofieldError, HolofieldResult};

/// Mathematical constant whose fractional digits feed the simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Constant {
    /// π = 3.14159…
    #[default]
    Pi,
    /// Euler's number e = 2.71828…
    E,
}

impl Constant {
    pub fn name(&self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::E => "e",
        }
    }
}

impl std::str::FromStr for Constant {
    type Err = HolofieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pi" | "π" => Ok(Constant::Pi),
            "e" => Ok(Constant::E),
            other => Err(HolofieldError::Config(format!(
                "unknown constant '{other}', expected 'pi' or 'e'"
            ))),
        }
    }
}

/// Runtime configuration for one simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of time steps; also the driver signal length.
    /// Default: 10000.
    pub simulation_length: usize,

    /// Side length N of the N×N grid.
    /// Default: 100.
    pub grid_size: usize,

    /// Moving-average window over the digit source.
    /// Default: 100.
    pub window_size: usize,

    /// Number of fractional digits to expand from `constant`.
    /// Default: 20100 (length + window + grid_size²).
    pub digit_precision: usize,

    /// Euler integration step: Ψ += step_size · ΔΨ.
    /// Default: 0.1.
    pub step_size: f64,

    /// Observers receive a frame every `display_interval` steps.
    /// Default: 50.
    pub display_interval: usize,

    /// Digit source constant.
    /// Default: π.
    pub constant: Constant,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            simulation_length: 10_000,
            grid_size: 100,
            window_size: 100,
            digit_precision: 20_100,
            step_size: 0.1,
            display_interval: 50,
            constant: Constant::Pi,
        }
    }
}

impl SimulationConfig {
    /// Digits consumed by the driver signal: `simulation_length + window_size`.
    /// Saturates at `usize::MAX`; `validate_parameters` rejects that case.
    pub fn signal_digits(&self) -> usize {
        self.checked_signal_digits().unwrap_or(usize::MAX)
    }

    /// Number of grid cells, `grid_size²`. Saturates like `signal_digits`.
    pub fn cell_count(&self) -> usize {
        self.checked_cell_count().unwrap_or(usize::MAX)
    }

    /// Total digits a run needs: the driver slice followed by the
    /// non-overlapping grid initialisation slice.
    pub fn required_digits(&self) -> usize {
        self.checked_required_digits().unwrap_or(usize::MAX)
    }

    fn checked_signal_digits(&self) -> Option<usize> {
        self.simulation_length.checked_add(self.window_size)
    }

    fn checked_cell_count(&self) -> Option<usize> {
        self.grid_size.checked_mul(self.grid_size)
    }

    fn checked_required_digits(&self) -> Option<usize> {
        self.checked_signal_digits()?
            .checked_add(self.checked_cell_count()?)
    }

    /// Validate configuration parameters, including `digit_precision`.
    pub fn validate(&self) -> HolofieldResult<()> {
        self.validate_parameters()?;
        let required = self.required_digits();
        if self.digit_precision < required {
            return Err(HolofieldError::Config(format!(
                "digit_precision must be >= simulation_length + window_size + grid_size² = {required}, got {}",
                self.digit_precision
            )));
        }
        Ok(())
    }

    /// Validate everything except `digit_precision`, for runs fed by an
    /// externally supplied digit sequence.
    pub fn validate_parameters(&self) -> HolofieldResult<()> {
        if self.simulation_length < 1 {
            return Err(HolofieldError::Config(format!(
                "simulation_length must be >= 1, got {}",
                self.simulation_length
            )));
        }
        if self.grid_size < 1 {
            return Err(HolofieldError::Config(format!(
                "grid_size must be >= 1, got {}",
                self.grid_size
            )));
        }
        if self.window_size < 1 {
            return Err(HolofieldError::Config(format!(
                "window_size must be >= 1, got {}",
                self.window_size
            )));
        }
        if self.display_interval < 1 {
            return Err(HolofieldError::Config(format!(
                "display_interval must be >= 1, got {}",
                self.display_interval
            )));
        }
        if self.checked_signal_digits().is_none() {
            return Err(HolofieldError::Config(format!(
                "simulation_length + window_size = {} + {} overflows usize",
                self.simulation_length, self.window_size
            )));
        }
        if self.checked_cell_count().is_none() {
            return Err(HolofieldError::Config(format!(
                "grid_size² overflows usize (grid_size = {})",
                self.grid_size
            )));
        }
        if self.checked_required_digits().is_none() {
            return Err(HolofieldError::Config(
                "simulation_length + window_size + grid_size² overflows usize".into(),
            ));
        }
        if !self.step_size.is_finite() {
            return Err(HolofieldError::Config(format!(
                "step_size must be finite, got {}",
                self.step_size
            )));
        }
        Ok(())
    }

    /// Load from JSON string. Missing fields take their defaults.
    pub fn from_json(json: &str) -> HolofieldResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| HolofieldError::Config(format!("JSON parse error: {e}")))
    }

    /// Serialise to pretty-printed JSON.
    pub fn to_json(&self) -> HolofieldResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| HolofieldError::Config(format!("JSON encode error: {e}")))
    }
}
