// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Phenomenal Grid
// ─────────────────────────────────────────────────────────────────────
//! Square N×N field Ψ, row-major, toroidal adjacency.
//!
//! The grid is mutated only through [`PhenomenalGrid::integrate`];
//! evolvers read it as a frozen snapshot.

use serde::{Deserialize, Serialize};

use holofield_signal::normalize_digit_mean;
use holofield_types::{GridStats, HolofieldError, HolofieldResult};

/// N×N grid of reals, row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhenomenalGrid {
    n: usize,
    cells: Vec<f64>,
}

fn cell_count(n: usize) -> HolofieldResult<usize> {
    n.checked_mul(n)
        .ok_or_else(|| HolofieldError::Validation(format!("grid side {n} squared overflows usize")))
}

impl PhenomenalGrid {
    /// Zero-filled N×N grid.
    pub fn new(n: usize) -> Self {
        Self::uniform(n, 0.0)
    }

    /// N×N grid with every cell set to `value`.
    pub fn uniform(n: usize, value: f64) -> Self {
        Self {
            n,
            cells: vec![value; n * n],
        }
    }

    /// Wrap existing row-major cells. `cells.len()` must equal `n²`.
    pub fn from_cells(n: usize, cells: Vec<f64>) -> HolofieldResult<Self> {
        let count = cell_count(n)?;
        if cells.len() != count {
            return Err(HolofieldError::Validation(format!(
                "grid of side {n} needs {count} cells, got {}",
                cells.len()
            )));
        }
        Ok(Self { n, cells })
    }

    /// Initial condition from the first `n²` digits: each digit `d`
    /// becomes `(d − 4.5) / 4.5`, so every cell starts in [-1, 1].
    pub fn from_digits(digits: &[u8], n: usize) -> HolofieldResult<Self> {
        let count = cell_count(n)?;
        if digits.len() < count {
            return Err(HolofieldError::InsufficientSource {
                required: count,
                available: digits.len(),
            });
        }
        let cells = digits[..count]
            .iter()
            .map(|&d| normalize_digit_mean(f64::from(d)))
            .collect();
        Ok(Self { n, cells })
    }

    /// Side length N.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Cell count N².
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    #[inline]
    pub fn index(&self, i: usize, j: usize) -> usize {
        i * self.n + j
    }

    /// Ψ[i, j]. Panics if out of bounds.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.cells[self.index(i, j)]
    }

    /// Set Ψ[i, j]. Panics if out of bounds.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        let idx = self.index(i, j);
        self.cells[idx] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.cells
    }

    /// Row `i` as a slice.
    pub fn row(&self, i: usize) -> &[f64] {
        &self.cells[i * self.n..(i + 1) * self.n]
    }

    /// Euler integration: Ψ += step_size · Δ.
    pub fn integrate(&mut self, delta: &PhenomenalGrid, step_size: f64) -> HolofieldResult<()> {
        if delta.n != self.n {
            return Err(HolofieldError::Validation(format!(
                "delta grid side {} does not match grid side {}",
                delta.n, self.n
            )));
        }
        self.integrate_slice(&delta.cells, step_size);
        Ok(())
    }

    /// Unchecked-shape integration used by the evolver's scratch path.
    pub(crate) fn integrate_slice(&mut self, delta: &[f64], step_size: f64) {
        debug_assert_eq!(delta.len(), self.cells.len());
        for (cell, &d) in self.cells.iter_mut().zip(delta) {
            *cell += step_size * d;
        }
    }

    pub fn stats(&self) -> GridStats {
        GridStats::from_cells(&self.cells)
    }

    /// True if no cell is NaN or infinite.
    pub fn is_finite(&self) -> bool {
        self.cells.iter().all(|v| v.is_finite())
    }
}
