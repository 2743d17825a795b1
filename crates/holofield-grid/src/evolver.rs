// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Toroidal Laplacian Evolver
// ─────────────────────────────────────────────────────────────────────
//! Per-step grid update driven by one scalar Λ(t):
//!
//!   ΔΨ[i,j] = Λ(t) · ( Ψ[i−1,j] + Ψ[i+1,j] + Ψ[i,j−1] + Ψ[i,j+1] − 4 Ψ[i,j] )
//!
//! Indices wrap modulo N. Λ(t) acts as one isotropic diffusion
//! coefficient for the whole grid; it never varies in space.
//!
//! Every cell reads the frozen previous state and writes only its own
//! delta entry, so rows are filled in parallel with no ordering
//! constraints. The caller (or [`GridEvolver::step`]) integrates
//! Ψ += step_size · ΔΨ afterwards.
//!
//! No stability bound is applied: once |step_size · Λ| grows past
//! roughly 1/4 the field can blow up, and NaN/Inf are passed through.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use holofield_types::{HolofieldError, HolofieldResult};

use crate::grid::PhenomenalGrid;

/// How the per-cell pass is scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parallelism {
    /// Rows distributed over the rayon thread pool.
    #[default]
    Rayon,
    /// Single-threaded row loop.
    Sequential,
}

#[inline]
fn wrap_prev(k: usize, n: usize) -> usize {
    if k == 0 {
        n - 1
    } else {
        k - 1
    }
}

#[inline]
fn wrap_next(k: usize, n: usize) -> usize {
    if k + 1 == n {
        0
    } else {
        k + 1
    }
}

/// Five-point Laplacian on a row-major N×N torus.
///
/// Neighbours are summed in pairs so a uniform field gives exactly 0.
#[inline]
fn laplacian(src: &[f64], n: usize, i: usize, j: usize) -> f64 {
    let up = wrap_prev(i, n);
    let down = wrap_next(i, n);
    let left = wrap_prev(j, n);
    let right = wrap_next(j, n);
    let vertical = src[up * n + j] + src[down * n + j];
    let horizontal = src[i * n + left] + src[i * n + right];
    (vertical + horizontal) - 4.0 * src[i * n + j]
}

/// Discrete Laplacian at cell (i, j) with toroidal wrap.
pub fn laplacian_at(grid: &PhenomenalGrid, i: usize, j: usize) -> f64 {
    laplacian(grid.as_slice(), grid.size(), i, j)
}

fn fill_row(src: &[f64], n: usize, i: usize, driver: f64, row: &mut [f64]) {
    for (j, out) in row.iter_mut().enumerate() {
        *out = driver * laplacian(src, n, i, j);
    }
}

/// Laplacian evolver with a pre-allocated delta buffer.
#[derive(Debug, Clone)]
pub struct GridEvolver {
    n: usize,
    parallelism: Parallelism,
    // Scratch for `step`
    delta: Vec<f64>,
}

impl GridEvolver {
    pub fn new(n: usize) -> Self {
        Self::with_parallelism(n, Parallelism::default())
    }

    pub fn with_parallelism(n: usize, parallelism: Parallelism) -> Self {
        Self {
            n,
            parallelism,
            delta: vec![0.0; n * n],
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn parallelism(&self) -> Parallelism {
        self.parallelism
    }

    fn check_shape(&self, grid: &PhenomenalGrid) -> HolofieldResult<()> {
        if grid.size() != self.n {
            return Err(HolofieldError::Validation(format!(
                "grid side {} does not match evolver side {}",
                grid.size(),
                self.n
            )));
        }
        Ok(())
    }

    /// Write ΔΨ for `driver` into `out` (length N²).
    pub fn delta_into(
        &self,
        grid: &PhenomenalGrid,
        driver: f64,
        out: &mut [f64],
    ) -> HolofieldResult<()> {
        self.check_shape(grid)?;
        if out.len() != grid.len() {
            return Err(HolofieldError::Validation(format!(
                "delta buffer holds {} cells, grid has {}",
                out.len(),
                grid.len()
            )));
        }
        compute_delta(grid.as_slice(), self.n, driver, out, self.parallelism);
        Ok(())
    }

    /// Allocating variant of [`delta_into`](Self::delta_into).
    pub fn delta(&self, grid: &PhenomenalGrid, driver: f64) -> HolofieldResult<PhenomenalGrid> {
        let mut out = vec![0.0; grid.len()];
        self.delta_into(grid, driver, &mut out)?;
        PhenomenalGrid::from_cells(self.n, out)
    }

    /// Advance one step: ΔΨ from the current state, then Ψ += step_size · ΔΨ.
    pub fn step(
        &mut self,
        grid: &mut PhenomenalGrid,
        driver: f64,
        step_size: f64,
    ) -> HolofieldResult<()> {
        self.check_shape(grid)?;
        compute_delta(
            grid.as_slice(),
            self.n,
            driver,
            &mut self.delta,
            self.parallelism,
        );
        grid.integrate_slice(&self.delta, step_size);
        Ok(())
    }

    /// Run one step per driver value, in order.
    pub fn run(
        &mut self,
        grid: &mut PhenomenalGrid,
        drivers: &[f64],
        step_size: f64,
    ) -> HolofieldResult<()> {
        for &driver in drivers {
            self.step(grid, driver, step_size)?;
        }
        log::debug!(
            "evolved {}x{} grid for {} steps",
            self.n,
            self.n,
            drivers.len()
        );
        Ok(())
    }

    /// Last delta written by [`step`](Self::step).
    pub fn last_delta(&self) -> &[f64] {
        &self.delta
    }
}

fn compute_delta(src: &[f64], n: usize, driver: f64, out: &mut [f64], parallelism: Parallelism) {
    if n == 0 {
        return;
    }
    match parallelism {
        Parallelism::Rayon => out
            .par_chunks_mut(n)
            .enumerate()
            .for_each(|(i, row)| fill_row(src, n, i, driver, row)),
        Parallelism::Sequential => out
            .chunks_mut(n)
            .enumerate()
            .for_each(|(i, row)| fill_row(src, n, i, driver, row)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic non-trivial field in [-1, 1].
    fn textured(n: usize) -> PhenomenalGrid {
        let cells = (0..n * n)
            .map(|k| ((k as f64) * 0.37).sin() * ((k % 7) as f64 / 7.0 + 0.1))
            .collect();
        PhenomenalGrid::from_cells(n, cells).unwrap()
    }

    #[test]
    fn test_uniform_grid_zero_laplacian() {
        let g = PhenomenalGrid::uniform(6, 0.731);
        for i in 0..6 {
            for j in 0..6 {
                assert_eq!(laplacian_at(&g, i, j), 0.0);
            }
        }
        let evolver = GridEvolver::new(6);
        for driver in [-3.5, 0.0, 0.2, 1e6] {
            let delta = evolver.delta(&g, driver).unwrap();
            assert!(delta.as_slice().iter().all(|&d| d == 0.0));
        }
    }

    #[test]
    fn test_single_spike_laplacian() {
        let mut g = PhenomenalGrid::new(5);
        g.set(2, 2, 1.0);
        assert_eq!(laplacian_at(&g, 2, 2), -4.0);
        assert_eq!(laplacian_at(&g, 1, 2), 1.0);
        assert_eq!(laplacian_at(&g, 3, 2), 1.0);
        assert_eq!(laplacian_at(&g, 2, 1), 1.0);
        assert_eq!(laplacian_at(&g, 2, 3), 1.0);
        assert_eq!(laplacian_at(&g, 1, 1), 0.0);
    }

    #[test]
    fn test_delta_is_driver_times_laplacian() {
        let g = textured(7);
        let evolver = GridEvolver::new(7);
        let delta = evolver.delta(&g, 0.3).unwrap();
        for i in 0..7 {
            for j in 0..7 {
                assert_eq!(delta.get(i, j), 0.3 * laplacian_at(&g, i, j));
            }
        }
    }

    #[test]
    fn test_linear_in_driver_integer_k() {
        let g = textured(9);
        let evolver = GridEvolver::new(9);
        let v = 0.25;
        let base = evolver.delta(&g, v).unwrap();
        for k in [2.0, 3.0, 4.0, -5.0] {
            let scaled = evolver.delta(&g, k * v).unwrap();
            for (s, b) in scaled.as_slice().iter().zip(base.as_slice()) {
                assert_eq!(*s, k * b, "k={k}");
            }
        }
    }

    #[test]
    fn test_linear_in_driver_fractional_k() {
        let g = textured(9);
        let evolver = GridEvolver::new(9);
        let v = -0.0731;
        let k = 1.618;
        let base = evolver.delta(&g, v).unwrap();
        let scaled = evolver.delta(&g, k * v).unwrap();
        for (s, b) in scaled.as_slice().iter().zip(base.as_slice()) {
            assert!((s - k * b).abs() < 1e-9);
        }
    }

    #[test]
    fn test_toroidal_wrap() {
        let n = 8;
        let g = textured(n);
        let mut bumped = g.clone();
        bumped.set(0, 0, g.get(0, 0) + 1.0);

        assert_ne!(laplacian_at(&g, n - 1, 0), laplacian_at(&bumped, n - 1, 0));
        assert_ne!(laplacian_at(&g, 0, n - 1), laplacian_at(&bumped, 0, n - 1));
        assert_eq!(
            laplacian_at(&g, n / 2, n / 2),
            laplacian_at(&bumped, n / 2, n / 2)
        );
    }

    #[test]
    fn test_every_cell_has_four_neighbours() {
        let n = 4;
        let mut g = PhenomenalGrid::new(n);
        g.set(0, 0, 1.0);
        // Exactly the centre plus four wrapped neighbours see the spike.
        let mut touched = 0;
        for i in 0..n {
            for j in 0..n {
                if laplacian_at(&g, i, j) != 0.0 {
                    touched += 1;
                }
            }
        }
        assert_eq!(touched, 5);
    }

    #[test]
    fn test_small_grids() {
        let g1 = PhenomenalGrid::uniform(1, 3.0);
        assert_eq!(laplacian_at(&g1, 0, 0), 0.0);

        let g2 = PhenomenalGrid::from_cells(2, vec![1.0, 0.0, 0.0, 0.0]).unwrap();
        // Both vertical neighbours are row 1, both horizontal are column 1.
        assert_eq!(laplacian_at(&g2, 0, 0), -4.0);
        assert_eq!(laplacian_at(&g2, 1, 0), 2.0);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let g = textured(33);
        let par = GridEvolver::with_parallelism(33, Parallelism::Rayon);
        let seq = GridEvolver::with_parallelism(33, Parallelism::Sequential);
        let a = par.delta(&g, 0.417).unwrap();
        let b = seq.delta(&g, 0.417).unwrap();
        let bits = |x: &PhenomenalGrid| x.as_slice().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn test_zero_driver_is_noop() {
        let mut g = textured(10);
        let before = g.clone();
        let mut evolver = GridEvolver::new(10);
        evolver.step(&mut g, 0.0, 0.1).unwrap();
        assert_eq!(g, before);
    }

    #[test]
    fn test_step_matches_manual_integration() {
        let g0 = textured(6);
        let mut evolver = GridEvolver::new(6);
        let delta = evolver.delta(&g0, 0.8).unwrap();
        let mut manual = g0.clone();
        manual.integrate(&delta, 0.1).unwrap();

        let mut stepped = g0.clone();
        evolver.step(&mut stepped, 0.8, 0.1).unwrap();
        assert_eq!(stepped, manual);
        assert_eq!(evolver.last_delta(), delta.as_slice());
    }

    #[test]
    fn test_diffusion_preserves_total() {
        // Σ Laplacian over a torus is zero, so the grid sum is conserved.
        let mut g = textured(12);
        let total = |g: &PhenomenalGrid| g.as_slice().iter().sum::<f64>();
        let before = total(&g);
        let mut evolver = GridEvolver::new(12);
        evolver.run(&mut g, &[0.2, 0.1, -0.05, 0.2], 0.1).unwrap();
        assert!((total(&g) - before).abs() < 1e-9);
    }

    #[test]
    fn test_positive_driver_smooths() {
        let mut g = textured(16);
        let v0 = g.stats().variance;
        let mut evolver = GridEvolver::new(16);
        evolver.run(&mut g, &[0.2; 50], 0.1).unwrap();
        assert!(g.stats().variance < v0);
    }

    #[test]
    fn test_unguarded_divergence() {
        // step_size · driver well past the stable range: values blow up.
        let mut g = textured(8);
        let mut evolver = GridEvolver::new(8);
        evolver.run(&mut g, &[1.0; 400], 10.0).unwrap();
        assert!(!g.is_finite() || g.stats().max.abs() > 1e100);
    }

    #[test]
    fn test_shape_mismatch_rejected() {
        let g = PhenomenalGrid::new(4);
        let evolver = GridEvolver::new(5);
        assert!(evolver.delta(&g, 1.0).is_err());
        let evolver = GridEvolver::new(4);
        let mut short = vec![0.0; 15];
        assert!(evolver.delta_into(&g, 1.0, &mut short).is_err());
    }
}
