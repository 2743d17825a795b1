// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — Holofield Kernel Types
// (C) 1998-2026 Miroslav Sotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
#![deny(unsafe_code)]
//! Configuration, error hierarchy, and summary types for the
//! Holofield kernel: a digit-driven toroidal diffusion field.

pub mod config;
pub mod error;
pub mod summary;

pub use config::{Constant, SimulationConfig};
pub use error::{HolofieldError, HolofieldResult};
pub use summary::{GridStats, RunSummary};
