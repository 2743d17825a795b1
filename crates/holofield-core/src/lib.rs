// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Holofield Kernel Core Engine
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Time-loop orchestration for the Holofield kernel: a driver signal
//! Λ derived from the digits of a constant modulates toroidal diffusion
//! on the phenomenal grid Ψ, while the same Λ prefix is exposed as both
//! the "whole" and the "part" history.
//!
//! # Invariants
//!
//! 1. **Causality is one-way**: Λ is fixed at construction from its own
//!    digit windows. Nothing the grid does can reach back into it.
//!
//! 2. **Whole ≡ Part**: both histories are accessors over the same
//!    slice of Λ. They are bit-identical at every step because there is
//!    only one sequence.
//!
//! 3. **Steps are strictly sequential; cells are not**: step t+1 reads
//!    the fully integrated grid from step t. Inside a step every cell
//!    reads the frozen snapshot and writes only its delta entry.
//!
//! 4. **No stability guard**: large `step_size · Λ` may blow the grid
//!    up. Divergence is logged once and recorded in the summary; values
//!    are never clamped.

pub mod history;
pub mod observer;
pub mod simulation;

pub use history::HistoryView;
pub use observer::{
    FanOut, FnObserver, Frame, FrameObserver, FrameRecord, JsonLinesObserver, LogObserver,
    NullObserver, RecordingObserver, DISPLAY_RANGE, clipped_cells,
};
pub use simulation::Simulation;
