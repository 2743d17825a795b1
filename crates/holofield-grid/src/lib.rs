// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Holofield Grid Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Phenomenal grid Ψ and the toroidal Laplacian evolver.
//!
//! - `grid`: N×N row-major container, digit initialisation, integration
//! - `evolver`: ΔΨ = Λ(t) · ∇²Ψ, rayon row-parallel

pub mod evolver;
pub mod grid;

pub use evolver::{laplacian_at, GridEvolver, Parallelism};
pub use grid::PhenomenalGrid;
