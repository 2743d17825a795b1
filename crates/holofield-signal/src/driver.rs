// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Driver Signal Generator
// ─────────────────────────────────────────────────────────────────────
//! Smoothed, normalised scalar signal Λ derived from a digit sequence.
//!
//!   Λ[t] = (mean(digits[t .. t + w]) − 4.5) / 4.5
//!
//! 4.5 is the expected mean of a uniform digit, so Λ is centred on 0
//! and nominally spans [-1, 1]. It is not clamped: a window of all 9s
//! gives exactly 1.0, and nothing stops local statistics from sitting
//! anywhere in that range.
//!
//! Λ[t] depends only on its own digit window, never on grid state.

use serde::{Deserialize, Serialize};

use holofield_types::{HolofieldError, HolofieldResult};

/// Expected mean of a uniformly distributed decimal digit.
pub const DIGIT_MEAN: f64 = 4.5;
/// Half-range used to scale the centred mean toward [-1, 1].
pub const DIGIT_HALF_RANGE: f64 = 4.5;

/// Read-only driver signal, one value per time step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverSignal {
    values: Vec<f64>,
    window_size: usize,
}

impl DriverSignal {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Λ[t], or `None` past the end.
    pub fn get(&self, t: usize) -> Option<f64> {
        self.values.get(t).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Λ[0 ..= t], clamped to the signal length.
    pub fn prefix(&self, t: usize) -> &[f64] {
        let end = (t + 1).min(self.values.len());
        &self.values[..end]
    }

    /// Smoothing window the signal was built with.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Observed (min, max). `(0.0, 0.0)` for an empty signal.
    pub fn range(&self) -> (f64, f64) {
        if self.values.is_empty() {
            return (0.0, 0.0);
        }
        self.values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }
}

/// Map a window mean onto the centred driver scale.
#[inline]
pub fn normalize_digit_mean(mean: f64) -> f64 {
    (mean - DIGIT_MEAN) / DIGIT_HALF_RANGE
}

/// Simple moving average over every full window ("valid" convolution).
///
/// Output length is `digits.len() − window_size + 1`, or 0 when the
/// input is shorter than one window. Window sums are kept as exact
/// integers, so each mean is rounded once.
pub fn moving_average(digits: &[u8], window_size: usize) -> HolofieldResult<Vec<f64>> {
    if window_size == 0 {
        return Err(HolofieldError::Validation(
            "window_size must be >= 1".to_string(),
        ));
    }
    if digits.len() < window_size {
        return Ok(Vec::new());
    }

    let w = window_size as f64;
    let mut out = Vec::with_capacity(digits.len() - window_size + 1);
    let mut sum: u64 = digits[..window_size].iter().map(|&d| u64::from(d)).sum();
    out.push(sum as f64 / w);

    for i in window_size..digits.len() {
        sum += u64::from(digits[i]);
        sum -= u64::from(digits[i - window_size]);
        out.push(sum as f64 / w);
    }
    Ok(out)
}

/// Build the driver signal: exactly `length` samples from `digits`.
///
/// Fails with `InsufficientSource` when
/// `digits.len() < length + window_size`; the check runs before any
/// smoothing work.
pub fn generate_driver_signal(
    digits: &[u8],
    length: usize,
    window_size: usize,
) -> HolofieldResult<DriverSignal> {
    let required = length.checked_add(window_size).ok_or_else(|| {
        HolofieldError::Validation(format!(
            "length + window_size = {length} + {window_size} overflows usize"
        ))
    })?;
    if digits.len() < required {
        return Err(HolofieldError::InsufficientSource {
            required,
            available: digits.len(),
        });
    }
    if let Some(pos) = digits.iter().position(|&d| d > 9) {
        return Err(HolofieldError::Validation(format!(
            "digit at index {pos} is {}, expected 0..=9",
            digits[pos]
        )));
    }

    let mut values = moving_average(&digits[..required], window_size)?;
    values.truncate(length);
    for v in values.iter_mut() {
        *v = normalize_digit_mean(*v);
    }

    let signal = DriverSignal {
        values,
        window_size,
    };
    let (lo, hi) = signal.range();
    log::debug!(
        "driver signal: {length} samples, window {window_size}, range [{lo:.4}, {hi:.4}]"
    );
    Ok(signal)
}
